//! Чистые алгоритмы лиги: генерация расписания, таблица, фиксация счёта.
//!
//! Ничего не знают о хранилище:
//!   - `generate_round_robin` – круговая система (circle method, с bye)
//!   - `compute_standings` – турнирная таблица из сыгранных матчей
//!   - `submit_proposal` / `force_result` – переходы состояния матча

pub mod errors;
pub mod schedule;
pub mod scoring;
pub mod standings;

pub use errors::EngineError;
pub use schedule::{generate_round_robin, Fixture, Schedule};
pub use scoring::{force_result, submit_proposal};
pub use standings::{compute_standings, StandingRow, DRAW_POINTS, WIN_POINTS};

/// RNG интерфейс для перемешивания порядка команд.
/// Реализации лежат в infra (обёртка над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
