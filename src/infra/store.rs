use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::fixture::Match;
use crate::domain::league::League;
use crate::domain::team::Team;
use crate::domain::{LeagueId, MatchId, TeamId};
use crate::infra::ids::IdKind;

/// Ошибки внешнего хранилища.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Сеть / таймаут / внутренняя ошибка хранилища.
    #[error("Хранилище недоступно: {0}")]
    Unavailable(String),

    /// Транзакционная проверка не прошла: кто-то успел записать раньше.
    #[error("Условие транзакции нарушено")]
    PreconditionFailed,
}

/// Одна запись в атомарном батче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WriteOp {
    PutLeague(League),
    DeleteLeague(LeagueId),
    PutTeam(Team),
    DeleteTeam(TeamId),
    PutMatch(Match),
    DeleteMatch(MatchId),
}

/// Условие, которое хранилище проверяет в той же атомарной операции, что и запись.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Precondition {
    /// Лига в хранилище совпадает со снимком.
    LeagueIs(League),

    /// Набор матчей лиги совпадает с `ids` (порядок не важен).
    /// Пустой `ids` = "матчей нет".
    MatchIdsAre { league_id: LeagueId, ids: Vec<MatchId> },

    /// Матч в хранилище совпадает со снимком.
    MatchIs(Match),

    /// Команды лиги совпадают со снимком (порядок не важен).
    TeamsAre { league_id: LeagueId, teams: Vec<Team> },
}

/// Абстракция хранилища лиги.
///
/// Реализации:
///   - `InMemoryLeagueStore` – тесты и оффчейн-запуск;
///   - `LeagueState` – Linera Views.
///
/// Чтения не блокируют писателей; запись – только атомарными батчами,
/// частично записанный батч никому не виден.
#[allow(async_fn_in_trait)]
pub trait LeagueStore {
    async fn get_league(&self, id: LeagueId) -> Result<Option<League>, StoreError>;

    async fn list_leagues(&self) -> Result<Vec<League>, StoreError>;

    async fn list_teams(&self, league_id: LeagueId) -> Result<Vec<Team>, StoreError>;

    async fn list_matches(&self, league_id: LeagueId) -> Result<Vec<Match>, StoreError>;

    async fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError>;

    /// Выдать новый уникальный id.
    async fn allocate_id(&mut self, kind: IdKind) -> Result<u64, StoreError>;

    /// Записать все операции или ни одной.
    async fn atomic_write_batch(&mut self, writes: Vec<WriteOp>) -> Result<(), StoreError>;

    /// Проверить условия и записать операции одной атомарной транзакцией.
    /// Любое нарушенное условие -> `StoreError::PreconditionFailed`, ничего не записано.
    async fn atomic_read_then_write(
        &mut self,
        preconditions: Vec<Precondition>,
        writes: Vec<WriteOp>,
    ) -> Result<(), StoreError>;
}

/// Сравнить два набора id без учёта порядка.
pub(crate) fn same_ids(mut a: Vec<u64>, mut b: Vec<u64>) -> bool {
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Сравнить два снимка команд без учёта порядка.
pub(crate) fn same_teams(a: &[Team], b: &[Team]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&Team> = a.iter().collect();
    let mut b: Vec<&Team> = b.iter().collect();
    a.sort_by_key(|t| t.id);
    b.sort_by_key(|t| t.id);
    a == b
}
