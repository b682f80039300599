// tests/infra_test.rs

use std::collections::HashSet;

use league_engine::{
    domain::{
        fixture::{Match, MatchScore, MatchStatus},
        league::{League, LeagueConfig},
        team::{initials_from_name, Team, TeamDraft},
        TeamId,
    },
    engine::{RandomSource, StandingRow},
    infra::{
        ids::{IdGenerator, IdKind},
        mapping::{index_teams, map_match_to_dto, map_matches_to_dto, map_standings_to_dto},
        memory::InMemoryLeagueStore,
        password::{hash_password, verify_password},
        rng::{DeterministicRng, SystemRng},
        store::{LeagueStore, Precondition, StoreError, WriteOp},
    },
};

//
// ---------- helpers ----------
//

fn make_team(id: TeamId, league_id: u64, name: &str) -> Team {
    Team::new(
        id,
        league_id,
        TeamDraft {
            name: name.into(),
            color: "#00ff00".into(),
            max_players: None,
        },
        4,
    )
    .unwrap()
}

//
// TEST 1 — IdGenerator: отдельные монотонные счётчики
//
#[test]
fn id_generator_is_monotonic_per_kind() {
    let ids = IdGenerator::new();

    assert_eq!(ids.next_league_id(), 1);
    assert_eq!(ids.next_league_id(), 2);
    assert_eq!(ids.next_team_id(), 1);
    assert_eq!(ids.next(IdKind::Team), 2);
    assert_eq!(ids.next(IdKind::Match), 1);
    assert_eq!(ids.next_match_id(), 2);
}

//
// TEST 2 — хэш пароля: солёный id лиги, пробелы по краям не важны
//
#[test]
fn password_hash_is_salted_by_league() {
    let h1 = hash_password(1, "secret");
    let h2 = hash_password(2, "secret");

    assert_eq!(h1.len(), 64);
    assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(h1, h2);
    assert_eq!(h1, hash_password(1, " secret "));

    assert!(verify_password(1, "secret", &h1));
    assert!(!verify_password(2, "secret", &h1));
    assert!(!verify_password(1, "Secret", &h1));
}

//
// TEST 3 — DeterministicRng: один seed -> один порядок
//
#[test]
fn deterministic_rng_same_seed_same_order() {
    let base: Vec<u64> = (1..=20).collect();

    let mut a = base.clone();
    let mut b = base.clone();
    DeterministicRng::from_seed(7).shuffle(&mut a);
    DeterministicRng::from_seed(7).shuffle(&mut b);
    assert_eq!(a, b);

    let mut c = base.clone();
    DeterministicRng::from_seed(8).shuffle(&mut c);
    assert_ne!(a, c);

    // перестановка, а не что-то другое
    let set: HashSet<u64> = a.iter().copied().collect();
    assert_eq!(set.len(), base.len());
}

#[test]
fn system_rng_keeps_elements() {
    let mut v: Vec<u64> = (1..=10).collect();
    SystemRng.shuffle(&mut v);
    v.sort_unstable();
    assert_eq!(v, (1..=10).collect::<Vec<u64>>());
}

//
// TEST 4 — инициалы
//
#[test]
fn initials_from_names() {
    assert_eq!(initials_from_name("Red Lions"), "RL");
    assert_eq!(initials_from_name("lions"), "LIO");
    assert_eq!(initials_from_name("FC Real Madrid"), "FR");
    assert_eq!(initials_from_name("Ox"), "OX");
    assert_eq!(initials_from_name("   "), "");
}

//
// TEST 5 — in-memory хранилище: батч + условия
//
#[tokio::test]
async fn memory_store_preconditions() {
    let mut store = InMemoryLeagueStore::new();

    let league = League::new(1, 1, LeagueConfig::public("L")).unwrap();
    let m1 = Match::scheduled(10, 1, 1, 1, 2);
    let m2 = Match::scheduled(11, 1, 1, 3, 4);

    store
        .atomic_write_batch(vec![
            WriteOp::PutLeague(league.clone()),
            WriteOp::PutMatch(m1.clone()),
        ])
        .await
        .unwrap();

    // неверный набор матчей -> ничего не записано
    let err = store
        .atomic_read_then_write(
            vec![Precondition::MatchIdsAre { league_id: 1, ids: vec![] }],
            vec![WriteOp::PutMatch(m2.clone())],
        )
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::PreconditionFailed);
    assert_eq!(store.list_matches(1).await.unwrap(), vec![m1.clone()]);

    // верный набор -> замена одной транзакцией
    store
        .atomic_read_then_write(
            vec![
                Precondition::LeagueIs(league.clone()),
                Precondition::MatchIdsAre { league_id: 1, ids: vec![10] },
            ],
            vec![WriteOp::DeleteMatch(10), WriteOp::PutMatch(m2.clone())],
        )
        .await
        .unwrap();
    assert_eq!(store.list_matches(1).await.unwrap(), vec![m2.clone()]);

    // MatchIs сравнивает запись целиком
    let mut stale = m2.clone();
    stale.result = Some(MatchScore::new(1, 0));
    let err = store
        .atomic_read_then_write(vec![Precondition::MatchIs(stale)], vec![])
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::PreconditionFailed);

    assert_eq!(store.get_match(10).await.unwrap(), None);
    assert_eq!(store.get_league(1).await.unwrap(), Some(league));
}

//
// TEST 6 — TeamsAre не зависит от порядка
//
#[tokio::test]
async fn memory_store_teams_snapshot_is_unordered() {
    let mut store = InMemoryLeagueStore::new();
    let a = make_team(1, 7, "A");
    let b = make_team(2, 7, "B");

    store
        .atomic_write_batch(vec![WriteOp::PutTeam(a.clone()), WriteOp::PutTeam(b.clone())])
        .await
        .unwrap();

    store
        .atomic_read_then_write(
            vec![Precondition::TeamsAre {
                league_id: 7,
                teams: vec![b.clone(), a.clone()],
            }],
            vec![WriteOp::DeleteTeam(1)],
        )
        .await
        .unwrap();

    assert_eq!(store.list_teams(7).await.unwrap(), vec![b]);
}

//
// TEST 7 — сбой хранилища
//
#[tokio::test]
async fn memory_store_injected_failures() {
    let mut store = InMemoryLeagueStore::new();
    store.fail_next(2);

    assert!(matches!(store.list_leagues().await, Err(StoreError::Unavailable(_))));
    assert!(matches!(store.allocate_id(IdKind::League).await, Err(StoreError::Unavailable(_))));
    assert_eq!(store.allocate_id(IdKind::League).await, Ok(1));
}

//
// TEST 8 — маппинг матчей и таблицы
//
#[test]
fn mapping_fills_names_and_positions() {
    let teams = vec![make_team(1, 1, "Alpha"), make_team(2, 1, "Bravo")];

    let mut played = Match::scheduled(5, 1, 2, 1, 2);
    played.result = Some(MatchScore::new(2, 2));
    let orphan = Match::scheduled(4, 1, 1, 1, 99);

    let index = index_teams(&teams);
    let dto = map_match_to_dto(&orphan, &index);
    assert_eq!(dto.home_team_name, "Alpha");
    assert_eq!(dto.away_team_name, "Team 99");
    assert_eq!(dto.status, MatchStatus::Scheduled);

    let list = map_matches_to_dto(&[played, orphan], &teams);
    assert_eq!(list.iter().map(|m| m.match_id).collect::<Vec<_>>(), vec![4, 5]);
    assert_eq!(list[1].home_score, Some(2));

    let rows = vec![StandingRow {
        team_id: 2,
        name: "Bravo".into(),
        played: 1,
        wins: 1,
        draws: 0,
        losses: 0,
        goals_for: 3,
        goals_against: 0,
        goal_difference: 3,
        points: 3,
    }];
    let table = map_standings_to_dto(&rows, &teams);
    assert_eq!(table[0].position, 1);
    assert_eq!(table[0].initials, "BRA");
    assert_eq!(table[0].color, "#00ff00");
}
