// src/league/config.rs

use serde::{Deserialize, Serialize};

use crate::domain::errors::LeagueError;

/// Настройки сервисного слоя (оркестрации поверх хранилища).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Сколько раз повторить транзакцию "прочитал-проверил-записал",
    /// если параллельный клиент успел записать раньше.
    ///
    /// Генерация расписания не ретраится никогда: проигравший гонку
    /// получает `ConcurrentModification`.
    pub transaction_retries: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            transaction_retries: 5,
        }
    }
}

impl ServiceConfig {
    /// Прочитать конфиг из JSON. Отсутствующие поля берутся по умолчанию.
    pub fn from_json_str(raw: &str) -> Result<Self, LeagueError> {
        serde_json::from_str(raw)
            .map_err(|e| LeagueError::InvalidConfig(format!("ServiceConfig: {e}")))
    }
}

/// Опции одного вызова генерации расписания.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Заменить существующие матчи (вместе с результатами).
    pub force: bool,
}
