use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{TeamId, UserId};

/// Ошибки доменной логики лиги (конфиги, составы команд).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum LeagueError {
    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),

    #[error("Команда {team_id} заполнена")]
    TeamFull { team_id: TeamId },

    #[error("Игрок {user_id} уже состоит в команде {team_id}")]
    AlreadyInAnotherTeam { user_id: UserId, team_id: TeamId },

    #[error("Игрок {user_id} не состоит в команде {team_id}")]
    NotAMember { user_id: UserId, team_id: TeamId },

    #[error("Владелец не может покинуть собственную лигу")]
    OwnerCannotLeave,

    #[error("Команда не может играть сама с собой")]
    SameTeam,
}
