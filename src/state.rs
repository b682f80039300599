use linera_sdk::views::{linera_views, MapView, RegisterView, RootView, ViewError, ViewStorageContext};

use crate::domain::fixture::Match;
use crate::domain::league::League;
use crate::domain::team::Team;
use crate::domain::{LeagueId, MatchId, TeamId};
use crate::infra::ids::IdKind;
use crate::infra::store::{same_ids, same_teams, LeagueStore, Precondition, StoreError, WriteOp};

/// Глобальное состояние приложения лиг на Linera.
///
/// Важное:
/// - команды и матчи лежат в отдельных картах и ссылаются на `league_id`;
/// - одна операция контракта исполняется целиком, а изменения View попадают
///   в хранилище только на `save()`: батч либо записан весь, либо никак.
#[derive(RootView)]
#[view(context = ViewStorageContext)]
pub struct LeagueState {
    /// Ключ: LeagueId, значение: доменная структура League.
    #[view(map)]
    pub leagues: MapView<LeagueId, League>,

    #[view(map)]
    pub teams: MapView<TeamId, Team>,

    /// Все матчи всех лиг. Ключ: MatchId.
    #[view(map)]
    pub matches: MapView<MatchId, Match>,

    /// Последний выданный id (общий счётчик для лиг, команд и матчей).
    #[view(register)]
    pub next_id: RegisterView<u64>,
}

fn unavailable(err: ViewError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

impl LeagueState {
    async fn teams_of(&self, league_id: LeagueId) -> Result<Vec<Team>, StoreError> {
        let mut out = Vec::new();
        for id in self.teams.indices().await.map_err(unavailable)? {
            if let Some(team) = self.teams.get(&id).await.map_err(unavailable)? {
                if team.league_id == league_id {
                    out.push(team);
                }
            }
        }
        Ok(out)
    }

    async fn matches_of(&self, league_id: LeagueId) -> Result<Vec<Match>, StoreError> {
        let mut out = Vec::new();
        for id in self.matches.indices().await.map_err(unavailable)? {
            if let Some(m) = self.matches.get(&id).await.map_err(unavailable)? {
                if m.league_id == league_id {
                    out.push(m);
                }
            }
        }
        Ok(out)
    }

    async fn holds(&self, precondition: &Precondition) -> Result<bool, StoreError> {
        Ok(match precondition {
            Precondition::LeagueIs(expected) => {
                self.leagues.get(&expected.id).await.map_err(unavailable)?.as_ref() == Some(expected)
            }
            Precondition::MatchIdsAre { league_id, ids } => {
                let current = self.matches_of(*league_id).await?;
                same_ids(current.iter().map(|m| m.id).collect(), ids.clone())
            }
            Precondition::MatchIs(expected) => {
                self.matches.get(&expected.id).await.map_err(unavailable)?.as_ref() == Some(expected)
            }
            Precondition::TeamsAre { league_id, teams } => {
                same_teams(&self.teams_of(*league_id).await?, teams)
            }
        })
    }

    fn apply(&mut self, op: WriteOp) -> Result<(), StoreError> {
        match op {
            WriteOp::PutLeague(league) => self.leagues.insert(&league.id.clone(), league),
            WriteOp::DeleteLeague(id) => self.leagues.remove(&id),
            WriteOp::PutTeam(team) => self.teams.insert(&team.id.clone(), team),
            WriteOp::DeleteTeam(id) => self.teams.remove(&id),
            WriteOp::PutMatch(m) => self.matches.insert(&m.id.clone(), m),
            WriteOp::DeleteMatch(id) => self.matches.remove(&id),
        }
        .map_err(unavailable)
    }
}

impl LeagueStore for LeagueState {
    async fn get_league(&self, id: LeagueId) -> Result<Option<League>, StoreError> {
        self.leagues.get(&id).await.map_err(unavailable)
    }

    async fn list_leagues(&self) -> Result<Vec<League>, StoreError> {
        let mut out = Vec::new();
        for id in self.leagues.indices().await.map_err(unavailable)? {
            if let Some(league) = self.leagues.get(&id).await.map_err(unavailable)? {
                out.push(league);
            }
        }
        Ok(out)
    }

    async fn list_teams(&self, league_id: LeagueId) -> Result<Vec<Team>, StoreError> {
        self.teams_of(league_id).await
    }

    async fn list_matches(&self, league_id: LeagueId) -> Result<Vec<Match>, StoreError> {
        self.matches_of(league_id).await
    }

    async fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError> {
        self.matches.get(&id).await.map_err(unavailable)
    }

    async fn allocate_id(&mut self, _kind: IdKind) -> Result<u64, StoreError> {
        let id = *self.next_id.get() + 1;
        self.next_id.set(id);
        Ok(id)
    }

    async fn atomic_write_batch(&mut self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        self.atomic_read_then_write(Vec::new(), writes).await
    }

    async fn atomic_read_then_write(
        &mut self,
        preconditions: Vec<Precondition>,
        writes: Vec<WriteOp>,
    ) -> Result<(), StoreError> {
        for p in &preconditions {
            if !self.holds(p).await? {
                return Err(StoreError::PreconditionFailed);
            }
        }
        for op in writes {
            self.apply(op)?;
        }
        Ok(())
    }
}
