// src/league/dispatch.rs
//
// Разбор api::Command / api::Query и вызов сервиса. Ответы – уже DTO.
// DTO строятся из снимка, прочитанного до записи: после коммита
// хранилище не читается.

use crate::api::commands::{Command, LeagueCommand, MatchCommand, TeamCommand};
use crate::api::dto::CommandResponse;
use crate::api::errors::ApiError;
use crate::api::queries::{Query, QueryResponse};
use crate::domain::fixture::Match;
use crate::domain::team::Team;
use crate::domain::UserId;
use crate::infra::mapping::{
    index_teams, map_league_to_dto, map_match_to_dto, map_matches_to_dto, map_standings_to_dto,
    map_team_to_dto,
};
use crate::infra::store::LeagueStore;
use crate::league::config::GenerateOptions;
use crate::league::service::LeagueService;

fn match_state(m: &Match, teams: &[Team]) -> CommandResponse {
    let index = index_teams(teams);
    CommandResponse::MatchState(map_match_to_dto(m, &index))
}

impl<S: LeagueStore> LeagueService<S> {
    /// Выполнить команду от имени `actor`.
    pub async fn execute(
        &mut self,
        actor: UserId,
        command: Command,
    ) -> Result<CommandResponse, ApiError> {
        match command {
            Command::League(cmd) => self.execute_league(actor, cmd).await,
            Command::Team(cmd) => self.execute_team(actor, cmd).await,
            Command::Match(cmd) => self.execute_match(actor, cmd).await,
        }
    }

    async fn execute_league(
        &mut self,
        actor: UserId,
        cmd: LeagueCommand,
    ) -> Result<CommandResponse, ApiError> {
        let league = match cmd {
            LeagueCommand::Create { config, password } => {
                self.create_league(actor, config, password.as_deref()).await?
            }
            LeagueCommand::Join { league_id } => self.join_league(league_id, actor).await?,
            LeagueCommand::Leave { league_id } => self.leave_league(league_id, actor).await?,
            LeagueCommand::Delete { league_id } => {
                self.delete_league(league_id, actor).await?;
                return Ok(CommandResponse::Ok);
            }
            LeagueCommand::ResetMatches { league_id } => {
                self.reset_matches(league_id, actor).await?;
                return Ok(CommandResponse::Ok);
            }
            LeagueCommand::ResetTeams { league_id } => {
                self.reset_teams(league_id, actor).await?;
                return Ok(CommandResponse::Ok);
            }
        };

        Ok(CommandResponse::LeagueState(map_league_to_dto(&league)))
    }

    async fn execute_team(
        &mut self,
        actor: UserId,
        cmd: TeamCommand,
    ) -> Result<CommandResponse, ApiError> {
        let team = match cmd {
            TeamCommand::Create { league_id, draft } => {
                self.create_team(league_id, actor, draft).await?
            }
            TeamCommand::Join { league_id, team_id } => {
                self.join_team(league_id, team_id, actor).await?
            }
            TeamCommand::Leave { league_id, team_id } => {
                self.leave_team(league_id, team_id, actor).await?
            }
            TeamCommand::Kick {
                league_id,
                team_id,
                user_id,
            } => self.kick_player(league_id, team_id, actor, user_id).await?,
            TeamCommand::SetCaptain {
                league_id,
                team_id,
                user_id,
            } => self.set_captain(league_id, team_id, actor, user_id).await?,
            TeamCommand::Delete { league_id, team_id } => {
                self.delete_team(league_id, team_id, actor).await?;
                return Ok(CommandResponse::Ok);
            }
        };

        Ok(CommandResponse::TeamState(map_team_to_dto(&team)))
    }

    async fn execute_match(
        &mut self,
        actor: UserId,
        cmd: MatchCommand,
    ) -> Result<CommandResponse, ApiError> {
        let (m, teams) = match cmd {
            MatchCommand::GenerateSchedule { league_id, force } => {
                let (matches, teams) = self
                    .generate_with_teams(league_id, actor, GenerateOptions { force })
                    .await?;
                return Ok(CommandResponse::ScheduleGenerated(map_matches_to_dto(
                    &matches, &teams,
                )));
            }
            MatchCommand::Create {
                league_id,
                home_team_id,
                away_team_id,
                round,
                date,
            } => {
                self.create_match_with_teams(league_id, actor, home_team_id, away_team_id, round, date)
                    .await?
            }
            MatchCommand::Delete {
                league_id,
                match_id,
            } => {
                self.delete_match(league_id, match_id, actor).await?;
                return Ok(CommandResponse::Ok);
            }
            MatchCommand::ProposeScore {
                match_id,
                home_score,
                away_score,
            } => {
                self.propose_with_teams(match_id, actor, home_score, away_score)
                    .await?
            }
            MatchCommand::ForceScore {
                league_id,
                match_id,
                home_score,
                away_score,
            } => {
                self.force_with_teams(league_id, match_id, actor, home_score, away_score)
                    .await?
            }
        };

        Ok(match_state(&m, &teams))
    }

    /// Запрос "только чтение".
    pub async fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        match query {
            Query::GetLeague { league_id } => {
                let league = self.get_league(league_id).await?;
                Ok(QueryResponse::League(map_league_to_dto(&league)))
            }
            Query::ListLeagues => {
                let leagues = self.list_leagues().await?;
                Ok(QueryResponse::Leagues(
                    leagues.iter().map(map_league_to_dto).collect(),
                ))
            }
            Query::ListTeams { league_id } => {
                let teams = self.list_teams(league_id).await?;
                Ok(QueryResponse::Teams(teams.iter().map(map_team_to_dto).collect()))
            }
            Query::ListMatches { league_id } => {
                let teams = self.list_teams(league_id).await?;
                let matches = self.list_matches(league_id).await?;
                Ok(QueryResponse::Matches(map_matches_to_dto(&matches, &teams)))
            }
            Query::GetStandings { league_id } => {
                let (rows, teams) = self.standings_with_teams(league_id).await?;
                Ok(QueryResponse::Standings(map_standings_to_dto(&rows, &teams)))
            }
            Query::CheckAccess {
                league_id,
                user_id,
                password,
            } => {
                let allowed = self
                    .check_access(league_id, user_id, password.as_deref())
                    .await?;
                Ok(QueryResponse::Access(allowed))
            }
        }
    }
}
