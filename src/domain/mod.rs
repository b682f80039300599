//! Доменная модель лиги: лиги, команды, матчи, счёт.

pub mod errors;
pub mod fixture;
pub mod league;
pub mod team;

// Базовые идентификаторы (непрозрачные, выдаются хранилищем).
pub type LeagueId = u64;
pub type TeamId = u64;
pub type MatchId = u64;
pub type UserId = u64;

/// Номер тура (1-based).
pub type Round = u32;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Team и т.п.
pub use errors::*;
pub use fixture::*;
pub use league::*;
pub use team::*;
