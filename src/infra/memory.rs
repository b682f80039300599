use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::fixture::Match;
use crate::domain::league::League;
use crate::domain::team::Team;
use crate::domain::{LeagueId, MatchId, TeamId};
use crate::infra::ids::{IdGenerator, IdKind};
use crate::infra::store::{same_ids, same_teams, LeagueStore, Precondition, StoreError, WriteOp};

#[derive(Debug, Default)]
struct Tables {
    leagues: BTreeMap<LeagueId, League>,
    teams: BTreeMap<TeamId, Team>,
    matches: BTreeMap<MatchId, Match>,
}

impl Tables {
    fn teams_of(&self, league_id: LeagueId) -> Vec<Team> {
        self.teams
            .values()
            .filter(|t| t.league_id == league_id)
            .cloned()
            .collect()
    }

    fn matches_of(&self, league_id: LeagueId) -> Vec<Match> {
        self.matches
            .values()
            .filter(|m| m.league_id == league_id)
            .cloned()
            .collect()
    }

    fn holds(&self, precondition: &Precondition) -> bool {
        match precondition {
            Precondition::LeagueIs(expected) => self.leagues.get(&expected.id) == Some(expected),
            Precondition::MatchIdsAre { league_id, ids } => {
                let current: Vec<MatchId> =
                    self.matches_of(*league_id).iter().map(|m| m.id).collect();
                same_ids(current, ids.clone())
            }
            Precondition::MatchIs(expected) => self.matches.get(&expected.id) == Some(expected),
            Precondition::TeamsAre { league_id, teams } => {
                same_teams(&self.teams_of(*league_id), teams)
            }
        }
    }

    fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::PutLeague(league) => {
                self.leagues.insert(league.id, league);
            }
            WriteOp::DeleteLeague(id) => {
                self.leagues.remove(&id);
            }
            WriteOp::PutTeam(team) => {
                self.teams.insert(team.id, team);
            }
            WriteOp::DeleteTeam(id) => {
                self.teams.remove(&id);
            }
            WriteOp::PutMatch(m) => {
                self.matches.insert(m.id, m);
            }
            WriteOp::DeleteMatch(id) => {
                self.matches.remove(&id);
            }
        }
    }
}

/// Простая in-memory реализация для тестов и локального запуска.
///
/// Клоны делят одно и то же состояние: два `LeagueService` на клонах
/// одного хранилища – это два конкурирующих клиента одной базы.
/// Каждый вызов один раз уступает планировщику, чтобы параллельные
/// футуры (`tokio::join!`) реально перемежались.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLeagueStore {
    tables: Arc<RwLock<Tables>>,
    ids: Arc<IdGenerator>,
    skip: Arc<AtomicU32>,
    failures: Arc<AtomicU32>,
}

impl InMemoryLeagueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Следующие `n` вызовов завершатся `StoreError::Unavailable`.
    pub fn fail_next(&self, n: u32) {
        self.fail_after(0, n);
    }

    /// Пропустить `calls` вызовов, затем `n` вызовов завершить с ошибкой.
    pub fn fail_after(&self, calls: u32, n: u32) {
        self.skip.store(calls, Ordering::SeqCst);
        self.failures.store(n, Ordering::SeqCst);
    }

    async fn enter(&self) -> Result<(), StoreError> {
        tokio::task::yield_now().await;

        let skipped = self
            .skip
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if skipped {
            return Ok(());
        }

        let injected = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if injected {
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        Ok(())
    }
}

impl LeagueStore for InMemoryLeagueStore {
    async fn get_league(&self, id: LeagueId) -> Result<Option<League>, StoreError> {
        self.enter().await?;
        Ok(self.tables.read().await.leagues.get(&id).cloned())
    }

    async fn list_leagues(&self) -> Result<Vec<League>, StoreError> {
        self.enter().await?;
        Ok(self.tables.read().await.leagues.values().cloned().collect())
    }

    async fn list_teams(&self, league_id: LeagueId) -> Result<Vec<Team>, StoreError> {
        self.enter().await?;
        Ok(self.tables.read().await.teams_of(league_id))
    }

    async fn list_matches(&self, league_id: LeagueId) -> Result<Vec<Match>, StoreError> {
        self.enter().await?;
        Ok(self.tables.read().await.matches_of(league_id))
    }

    async fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError> {
        self.enter().await?;
        Ok(self.tables.read().await.matches.get(&id).cloned())
    }

    async fn allocate_id(&mut self, kind: IdKind) -> Result<u64, StoreError> {
        self.enter().await?;
        Ok(self.ids.next(kind))
    }

    async fn atomic_write_batch(&mut self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        self.atomic_read_then_write(Vec::new(), writes).await
    }

    async fn atomic_read_then_write(
        &mut self,
        preconditions: Vec<Precondition>,
        writes: Vec<WriteOp>,
    ) -> Result<(), StoreError> {
        self.enter().await?;

        // Проверка и запись под одной блокировкой.
        let mut tables = self.tables.write().await;
        if !preconditions.iter().all(|p| tables.holds(p)) {
            return Err(StoreError::PreconditionFailed);
        }
        for op in writes {
            tables.apply(op);
        }
        Ok(())
    }
}
