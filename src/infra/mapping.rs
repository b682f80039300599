use std::collections::HashMap;

use crate::api::dto::{LeagueViewDto, MatchViewDto, StandingRowDto, TeamViewDto};
use crate::domain::fixture::Match;
use crate::domain::league::League;
use crate::domain::team::Team;
use crate::domain::TeamId;
use crate::engine::standings::StandingRow;

/// Маппинг League -> LeagueViewDto.
pub fn map_league_to_dto(league: &League) -> LeagueViewDto {
    LeagueViewDto {
        league_id: league.id,
        name: league.config.name.clone(),
        sport: league.config.sport.clone(),
        format: league.config.format.clone(),
        venue: league.config.venue.clone(),
        owner_id: league.owner_id,
        visibility: league.config.visibility,
        has_password: league.config.password_hash.is_some(),
        result_policy: league.config.result_policy,
        participants: league.participants.len() as u32,
    }
}

pub fn map_team_to_dto(team: &Team) -> TeamViewDto {
    TeamViewDto {
        team_id: team.id,
        name: team.name.clone(),
        initials: team.initials.clone(),
        color: team.color.clone(),
        max_players: team.max_players,
        captain: team.captain,
        members: team.members.iter().copied().collect(),
    }
}

/// Утилита: быстрый индекс TeamId -> Team.
pub fn index_teams(teams: &[Team]) -> HashMap<TeamId, &Team> {
    teams.iter().map(|t| (t.id, t)).collect()
}

/// Маппинг Match -> MatchViewDto.
///
/// Если команда уже удалена, вместо имени – "Team {id}".
pub fn map_match_to_dto(m: &Match, teams: &HashMap<TeamId, &Team>) -> MatchViewDto {
    let name_of = |id: TeamId| {
        teams
            .get(&id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("Team {id}"))
    };

    MatchViewDto {
        match_id: m.id,
        round: m.round,
        home_team_id: m.home_team_id,
        home_team_name: name_of(m.home_team_id),
        away_team_id: m.away_team_id,
        away_team_name: name_of(m.away_team_id),
        home_score: m.home_score(),
        away_score: m.away_score(),
        status: m.status(),
        date: m.date.clone(),
    }
}

/// Матчи в порядке туров (внутри тура – по id).
pub fn map_matches_to_dto(matches: &[Match], teams: &[Team]) -> Vec<MatchViewDto> {
    let index = index_teams(teams);
    let mut sorted: Vec<&Match> = matches.iter().collect();
    sorted.sort_by_key(|m| (m.round, m.id));

    sorted
        .into_iter()
        .map(|m| map_match_to_dto(m, &index))
        .collect()
}

/// Маппинг отсортированной таблицы в DTO с местами (1-based).
pub fn map_standings_to_dto(rows: &[StandingRow], teams: &[Team]) -> Vec<StandingRowDto> {
    let index = index_teams(teams);

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let (initials, color) = index
                .get(&row.team_id)
                .map(|t| (t.initials.clone(), t.color.clone()))
                .unwrap_or_default();

            StandingRowDto {
                position: idx as u32 + 1,
                team_id: row.team_id,
                name: row.name.clone(),
                initials,
                color,
                played: row.played,
                wins: row.wins,
                draws: row.draws,
                losses: row.losses,
                goals_for: row.goals_for,
                goals_against: row.goals_against,
                goal_difference: row.goal_difference,
                points: row.points,
            }
        })
        .collect()
}
