use serde::{Deserialize, Serialize};

use crate::domain::fixture::MatchStatus;
use crate::domain::league::{ResultPolicy, Visibility};
use crate::domain::{LeagueId, MatchId, Round, TeamId, UserId};

/// DTO лиги (для лобби / страницы лиги). Хэш пароля наружу не отдаём.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueViewDto {
    pub league_id: LeagueId,
    pub name: String,
    pub sport: String,
    pub format: String,
    pub venue: Option<String>,
    pub owner_id: UserId,
    pub visibility: Visibility,
    pub has_password: bool,
    pub result_policy: ResultPolicy,
    pub participants: u32,
}

/// DTO команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamViewDto {
    pub team_id: TeamId,
    pub name: String,
    pub initials: String,
    pub color: String,
    pub max_players: u32,
    pub captain: Option<UserId>,
    pub members: Vec<UserId>,
}

/// DTO матча. Имена команд подставлены, чтобы фронту не склеивать самому.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchViewDto {
    pub match_id: MatchId,
    pub round: Round,
    pub home_team_id: TeamId,
    pub home_team_name: String,
    pub away_team_id: TeamId,
    pub away_team_name: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: MatchStatus,
    pub date: Option<String>,
}

/// Строка турнирной таблицы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingRowDto {
    /// Место в таблице (1-based).
    pub position: u32,
    pub team_id: TeamId,
    pub name: String,
    pub initials: String,
    pub color: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u32,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Создана новая лига / обновлены участники.
    LeagueState(LeagueViewDto),

    /// Состояние команды после командной операции.
    TeamState(TeamViewDto),

    /// Сгенерировано расписание (матчи по порядку туров).
    ScheduleGenerated(Vec<MatchViewDto>),

    /// Состояние матча после создания / предложения / force.
    MatchState(MatchViewDto),
}
