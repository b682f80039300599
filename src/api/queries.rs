use serde::{Deserialize, Serialize};

use crate::domain::{LeagueId, UserId};

use super::dto::{LeagueViewDto, MatchViewDto, StandingRowDto, TeamViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Получить лигу.
    GetLeague { league_id: LeagueId },

    /// Все лиги (для лобби).
    ListLeagues,

    ListTeams { league_id: LeagueId },

    /// Матчи лиги по турам.
    ListMatches { league_id: LeagueId },

    /// Турнирная таблица (пересчитывается на каждый запрос).
    GetStandings { league_id: LeagueId },

    /// Пускать ли пользователя в лигу (приватные лиги – по паролю).
    CheckAccess {
        league_id: LeagueId,
        user_id: UserId,
        password: Option<String>,
    },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    League(LeagueViewDto),
    Leagues(Vec<LeagueViewDto>),
    Teams(Vec<TeamViewDto>),
    Matches(Vec<MatchViewDto>),
    Standings(Vec<StandingRowDto>),
    Access(bool),
}
