use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{LeagueError, LeagueId, MatchId, TeamId, UserId};
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum ApiError {
    /// У вызывающего нет нужной роли (владелец / капитан). Не ретраить.
    #[error("Пользователь {user_id} не может выполнить {action}")]
    NotAuthorized { user_id: UserId, action: String },

    /// Для расписания нужно минимум две команды.
    #[error("В лиге {league_id} всего {found} команд(ы), нужно минимум 2")]
    InsufficientTeams { league_id: LeagueId, found: usize },

    /// Расписание уже есть, а `force` не передан.
    #[error("В лиге {league_id} уже есть {existing} матч(ей)")]
    ScheduleAlreadyExists { league_id: LeagueId, existing: usize },

    /// Транзакционная проверка увидела чужую запись. Перечитать и повторить.
    #[error("{operation}: параллельное изменение (лига {league_id:?})")]
    ConcurrentModification {
        league_id: Option<LeagueId>,
        operation: String,
    },

    /// Хранилище не ответило. Ядро само не ретраит.
    #[error("{operation}: хранилище недоступно ({reason})")]
    StoreUnavailable {
        league_id: Option<LeagueId>,
        operation: String,
        reason: String,
    },

    #[error("Лига {0} не найдена")]
    LeagueNotFound(LeagueId),

    #[error("Команда {0} не найдена")]
    TeamNotFound(TeamId),

    #[error("Матч {0} не найден")]
    MatchNotFound(MatchId),

    /// Команда не может быть выполнена в текущем состоянии.
    #[error("Некорректная команда: {0}")]
    InvalidCommand(String),

    /// Нарушено доменное правило (состав, конфиг).
    #[error("{0}")]
    Domain(LeagueError),

    /// Ошибка перехода состояния матча.
    #[error("{0}")]
    Engine(EngineError),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err)
    }
}

impl From<LeagueError> for ApiError {
    fn from(err: LeagueError) -> Self {
        ApiError::Domain(err)
    }
}
