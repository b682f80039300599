// src/domain/fixture.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{LeagueId, MatchId, Round, TeamId, UserId};

/// Итоговый счёт матча. Либо есть целиком, либо матча ещё не было.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MatchScore {
    pub home: u32,
    pub away: u32,
}

impl MatchScore {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }
}

/// Сторона матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

/// Предложение счёта от капитана одной из сторон.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreProposal {
    pub side: Side,
    pub score: MatchScore,
    /// Порядковый номер внутри матча: чем больше, тем свежее.
    pub seq: u64,
}

/// Статус матча. Не хранится – выводится из записи (см. `Match::status`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStatus {
    /// Матч не сыгран, предложений нет.
    Scheduled,
    /// Есть хотя бы одно предложение, но две стороны ещё не сошлись.
    AwaitingConfirmation,
    /// Счёт зафиксирован. Терминальное состояние.
    Confirmed,
}

/// Матч (фикстура) внутри лиги.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    pub league_id: LeagueId,
    pub round: Round,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    /// Дата/время в свободной форме (для матчей, созданных вручную).
    pub date: Option<String>,
    pub result: Option<MatchScore>,
    /// Предложения счёта по автору. Разные предложения не перетирают друг друга.
    pub proposals: BTreeMap<UserId, ScoreProposal>,
    /// Счётчик для `ScoreProposal::seq`.
    pub proposal_seq: u64,
}

impl Match {
    /// Новый несыгранный матч.
    pub fn scheduled(
        id: MatchId,
        league_id: LeagueId,
        round: Round,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Self {
        Self {
            id,
            league_id,
            round,
            home_team_id,
            away_team_id,
            date: None,
            result: None,
            proposals: BTreeMap::new(),
            proposal_seq: 0,
        }
    }

    pub fn status(&self) -> MatchStatus {
        if self.result.is_some() {
            MatchStatus::Confirmed
        } else if !self.proposals.is_empty() {
            MatchStatus::AwaitingConfirmation
        } else {
            MatchStatus::Scheduled
        }
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    pub fn home_score(&self) -> Option<u32> {
        self.result.map(|s| s.home)
    }

    pub fn away_score(&self) -> Option<u32> {
        self.result.map(|s| s.away)
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Самое свежее предложение указанной стороны.
    pub fn latest_proposal(&self, side: Side) -> Option<&ScoreProposal> {
        self.proposals
            .values()
            .filter(|p| p.side == side)
            .max_by_key(|p| p.seq)
    }
}
