use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::{LeagueId, MatchId, TeamId};

/// Какую сущность нумеруем.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IdKind {
    League,
    Team,
    Match,
}

/// Простая генерация ID на основе монотонных счётчиков.
/// Используется in-memory хранилищем и оффчейн-тестами.
///
/// В Linera-состоянии ID выдаёт счётчик в `LeagueState::next_id`.
#[derive(Debug)]
pub struct IdGenerator {
    league_counter: AtomicU64,
    team_counter: AtomicU64,
    match_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            league_counter: AtomicU64::new(1),
            team_counter: AtomicU64::new(1),
            match_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_league_id(&self) -> LeagueId {
        self.league_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_team_id(&self) -> TeamId {
        self.team_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_match_id(&self) -> MatchId {
        self.match_counter.fetch_add(1, Ordering::Relaxed)
    }

    pub fn next(&self, kind: IdKind) -> u64 {
        match kind {
            IdKind::League => self.next_league_id(),
            IdKind::Team => self.next_team_id(),
            IdKind::Match => self.next_match_id(),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
