use serde::{Deserialize, Serialize};

use crate::domain::league::LeagueConfig;
use crate::domain::team::TeamDraft;
use crate::domain::{LeagueId, MatchId, Round, TeamId, UserId};

/// Команда верхнего уровня.
///
/// Автор команды (actor) передаётся отдельно – в `LeagueOperation::Command`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Команды уровня лиги (создание, участники, удаление, сбросы).
    League(LeagueCommand),

    /// Операции с командами и их составами.
    Team(TeamCommand),

    /// Расписание и результаты.
    Match(MatchCommand),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LeagueCommand {
    /// Создать лигу. Автор становится владельцем.
    ///
    /// `password` – открытый пароль приватной лиги; хранится только хэш.
    Create {
        config: LeagueConfig,
        password: Option<String>,
    },

    Join { league_id: LeagueId },

    Leave { league_id: LeagueId },

    /// Удалить лигу вместе с командами и матчами (только владелец).
    Delete { league_id: LeagueId },

    /// Удалить все матчи лиги (только владелец).
    ResetMatches { league_id: LeagueId },

    /// Удалить все команды лиги и их матчи (только владелец).
    ResetTeams { league_id: LeagueId },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TeamCommand {
    /// Создать команду (только владелец лиги).
    Create { league_id: LeagueId, draft: TeamDraft },

    /// Вступить в команду самому.
    Join { league_id: LeagueId, team_id: TeamId },

    /// Выйти из команды самому.
    Leave { league_id: LeagueId, team_id: TeamId },

    /// Исключить игрока (только владелец лиги).
    Kick {
        league_id: LeagueId,
        team_id: TeamId,
        user_id: UserId,
    },

    /// Назначить капитана (только владелец лиги).
    SetCaptain {
        league_id: LeagueId,
        team_id: TeamId,
        user_id: UserId,
    },

    /// Удалить команду и её матчи (только владелец лиги).
    Delete { league_id: LeagueId, team_id: TeamId },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum MatchCommand {
    /// Сгенерировать круговое расписание.
    ///
    /// `force = true` атомарно заменяет существующие матчи (с результатами).
    GenerateSchedule { league_id: LeagueId, force: bool },

    /// Создать матч вручную.
    Create {
        league_id: LeagueId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        round: Round,
        date: Option<String>,
    },

    /// Удалить матч (только владелец лиги).
    Delete { league_id: LeagueId, match_id: MatchId },

    /// Капитан предлагает счёт.
    ProposeScore {
        match_id: MatchId,
        home_score: u32,
        away_score: u32,
    },

    /// Владелец фиксирует счёт принудительно.
    ForceScore {
        league_id: LeagueId,
        match_id: MatchId,
        home_score: u32,
        away_score: u32,
    },
}
