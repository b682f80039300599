// src/domain/league.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::errors::LeagueError;
use crate::domain::{LeagueId, UserId};

/// Видимость лиги.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    /// Вход по паролю (если задан `password_hash`).
    Private,
}

/// Кто и как фиксирует результат матча.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResultPolicy {
    /// Только владелец лиги, напрямую (force).
    OwnerOnly,
    /// Капитаны предлагают счёт, совпадение двух предложений подтверждает матч.
    /// Владелец при этом всё равно может зафиксировать счёт принудительно.
    #[default]
    CaptainConfirmation,
}

/// Настройки генерации расписания.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Двойной круг (дома и в гостях): второй проход с зеркальными парами.
    pub double_round_robin: bool,

    /// Если задан – порядок команд перед генерацией детерминированно
    /// перемешивается этим seed'ом. Иначе порядок = по возрастанию TeamId.
    pub shuffle_seed: Option<u64>,
}

/// Конфигурация лиги.
/// Всё, что приходит при создании лиги через фронт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueConfig {
    /// Название лиги.
    pub name: String,

    /// Вид спорта ("football", "padel", ...), косметика.
    pub sport: String,

    /// Формат ("5v5", "league", ...), косметика.
    pub format: String,

    /// Площадка по умолчанию.
    pub venue: Option<String>,

    pub visibility: Visibility,

    /// Солёный SHA-256 пароля приватной лиги (hex), см. `infra::password`.
    pub password_hash: Option<String>,

    /// Вместимость команды, если при создании команды не указана своя.
    pub default_team_capacity: u32,

    pub result_policy: ResultPolicy,

    pub schedule: ScheduleOptions,
}

impl LeagueConfig {
    /// Пресет: публичная лига, команды по 5 игроков, подтверждение капитанами.
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sport: "football".into(),
            format: "league".into(),
            venue: None,
            visibility: Visibility::Public,
            password_hash: None,
            default_team_capacity: 5,
            result_policy: ResultPolicy::CaptainConfirmation,
            schedule: ScheduleOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.name.trim().is_empty() {
            return Err(LeagueError::InvalidConfig(
                "LeagueConfig: name is empty".into(),
            ));
        }

        if self.default_team_capacity == 0 {
            return Err(LeagueError::InvalidConfig(
                "LeagueConfig: default_team_capacity = 0".into(),
            ));
        }

        if self.visibility == Visibility::Public && self.password_hash.is_some() {
            return Err(LeagueError::InvalidConfig(
                "LeagueConfig: public league must not carry a password".into(),
            ));
        }

        Ok(())
    }
}

/// Лига: владелец + настройки + участники.
/// Команды и матчи лежат в хранилище отдельно и ссылаются на `id` лиги.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct League {
    pub id: LeagueId,
    /// Единственный, кто управляет расписанием и принудительными результатами.
    pub owner_id: UserId,
    pub config: LeagueConfig,
    pub participants: BTreeSet<UserId>,
}

impl League {
    pub fn new(id: LeagueId, owner_id: UserId, config: LeagueConfig) -> Result<Self, LeagueError> {
        config.validate()?;

        let mut participants = BTreeSet::new();
        participants.insert(owner_id);

        Ok(Self {
            id,
            owner_id,
            config,
            participants,
        })
    }

    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    pub fn is_private(&self) -> bool {
        self.config.visibility == Visibility::Private
    }

    /// Добавить участника. Повторный вход – no-op.
    pub fn join(&mut self, user_id: UserId) {
        self.participants.insert(user_id);
    }

    pub fn leave(&mut self, user_id: UserId) -> Result<(), LeagueError> {
        if self.is_owner(user_id) {
            return Err(LeagueError::OwnerCannotLeave);
        }
        self.participants.remove(&user_id);
        Ok(())
    }
}
