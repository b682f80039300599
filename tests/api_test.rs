// tests/api_test.rs

use league_engine::api::{
    commands::{Command, LeagueCommand, MatchCommand, TeamCommand},
    dto::{CommandResponse, MatchViewDto, TeamViewDto},
    errors::ApiError,
    queries::{Query, QueryResponse},
};
use league_engine::domain::fixture::MatchStatus;
use league_engine::domain::league::{LeagueConfig, Visibility};
use league_engine::domain::team::TeamDraft;
use league_engine::domain::{LeagueId, UserId};
use league_engine::infra::InMemoryLeagueStore;
use league_engine::league::LeagueService;

const OWNER: UserId = 1;

type Service = LeagueService<InMemoryLeagueStore>;

/// Утилита: создать лигу через команду и вернуть её id.
async fn create_league(service: &mut Service, config: LeagueConfig, password: Option<&str>) -> LeagueId {
    let resp = service
        .execute(
            OWNER,
            Command::League(LeagueCommand::Create {
                config,
                password: password.map(str::to_string),
            }),
        )
        .await
        .unwrap();

    match resp {
        CommandResponse::LeagueState(dto) => dto.league_id,
        other => panic!("expected LeagueState, got {other:?}"),
    }
}

async fn create_team(service: &mut Service, league_id: LeagueId, name: &str) -> TeamViewDto {
    let resp = service
        .execute(
            OWNER,
            Command::Team(TeamCommand::Create {
                league_id,
                draft: TeamDraft {
                    name: name.into(),
                    color: "#123456".into(),
                    max_players: Some(3),
                },
            }),
        )
        .await
        .unwrap();

    match resp {
        CommandResponse::TeamState(dto) => dto,
        other => panic!("expected TeamState, got {other:?}"),
    }
}

async fn generate(service: &mut Service, league_id: LeagueId, force: bool) -> Result<Vec<MatchViewDto>, ApiError> {
    let resp = service
        .execute(
            OWNER,
            Command::Match(MatchCommand::GenerateSchedule { league_id, force }),
        )
        .await?;

    match resp {
        CommandResponse::ScheduleGenerated(list) => Ok(list),
        other => panic!("expected ScheduleGenerated, got {other:?}"),
    }
}

//
// TEST 1 — создание лиги и команд через команды API
//
#[tokio::test]
async fn create_league_and_teams_via_commands() {
    let mut service = LeagueService::new(InMemoryLeagueStore::new());
    let league_id = create_league(&mut service, LeagueConfig::public("Cup"), None).await;

    let team = create_team(&mut service, league_id, "Red Lions").await;
    assert_eq!(team.name, "Red Lions");
    assert_eq!(team.initials, "RL");
    assert_eq!(team.max_players, 3);
    assert!(team.members.is_empty());

    match service.query(Query::GetLeague { league_id }).await.unwrap() {
        QueryResponse::League(dto) => {
            assert_eq!(dto.name, "Cup");
            assert_eq!(dto.owner_id, OWNER);
            assert_eq!(dto.participants, 1);
            assert!(!dto.has_password);
        }
        other => panic!("expected League, got {other:?}"),
    }

    match service.query(Query::ListTeams { league_id }).await.unwrap() {
        QueryResponse::Teams(list) => assert_eq!(list.len(), 1),
        other => panic!("expected Teams, got {other:?}"),
    }
}

//
// TEST 2 — расписание: DTO по турам, с именами команд
//
#[tokio::test]
async fn generate_schedule_returns_named_fixtures() {
    let mut service = LeagueService::new(InMemoryLeagueStore::new());
    let league_id = create_league(&mut service, LeagueConfig::public("Cup"), None).await;
    for name in ["Alpha", "Bravo", "Charlie"] {
        create_team(&mut service, league_id, name).await;
    }

    let list = generate(&mut service, league_id, false).await.unwrap();

    assert_eq!(list.len(), 3);
    assert!(list.windows(2).all(|w| w[0].round <= w[1].round));
    for m in &list {
        assert_ne!(m.home_team_name, m.away_team_name);
        assert!(!m.home_team_name.starts_with("Team "));
        assert_eq!(m.status, MatchStatus::Scheduled);
        assert_eq!(m.home_score, None);
    }

    let err = generate(&mut service, league_id, false).await.unwrap_err();
    assert!(matches!(err, ApiError::ScheduleAlreadyExists { existing: 3, .. }));

    match service.query(Query::ListMatches { league_id }).await.unwrap() {
        QueryResponse::Matches(stored) => assert_eq!(stored, list),
        other => panic!("expected Matches, got {other:?}"),
    }
}

//
// TEST 3 — счёт: капитаны через ProposeScore, таблица через GetStandings
//
#[tokio::test]
async fn propose_and_standings_via_api() {
    let mut service = LeagueService::new(InMemoryLeagueStore::new());
    let league_id = create_league(&mut service, LeagueConfig::public("Cup"), None).await;

    let home = create_team(&mut service, league_id, "Home Side").await;
    let away = create_team(&mut service, league_id, "Away Side").await;
    service
        .execute(10, Command::Team(TeamCommand::Join { league_id, team_id: home.team_id }))
        .await
        .unwrap();
    service
        .execute(20, Command::Team(TeamCommand::Join { league_id, team_id: away.team_id }))
        .await
        .unwrap();

    let m = generate(&mut service, league_id, false).await.unwrap().remove(0);
    let (home_captain, away_captain) = if m.home_team_id == home.team_id { (10, 20) } else { (20, 10) };

    for captain in [home_captain, away_captain] {
        let resp = service
            .execute(
                captain,
                Command::Match(MatchCommand::ProposeScore {
                    match_id: m.match_id,
                    home_score: 3,
                    away_score: 0,
                }),
            )
            .await
            .unwrap();
        assert!(matches!(resp, CommandResponse::MatchState(_)));
    }

    let rows = match service.query(Query::GetStandings { league_id }).await.unwrap() {
        QueryResponse::Standings(rows) => rows,
        other => panic!("expected Standings, got {other:?}"),
    };

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].team_id, m.home_team_id);
    assert_eq!(rows[0].points, 3);
    assert_eq!(rows[0].goal_difference, 3);
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].losses, 1);
}

//
// TEST 4 — ForceScore и права
//
#[tokio::test]
async fn force_score_via_api() {
    let mut service = LeagueService::new(InMemoryLeagueStore::new());
    let league_id = create_league(&mut service, LeagueConfig::public("Cup"), None).await;
    create_team(&mut service, league_id, "A").await;
    create_team(&mut service, league_id, "B").await;
    let m = generate(&mut service, league_id, false).await.unwrap().remove(0);

    let cmd = |home_score, away_score| {
        Command::Match(MatchCommand::ForceScore {
            league_id,
            match_id: m.match_id,
            home_score,
            away_score,
        })
    };

    let err = service.execute(77, cmd(1, 1)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthorized { user_id: 77, .. }));

    match service.execute(OWNER, cmd(1, 1)).await.unwrap() {
        CommandResponse::MatchState(dto) => {
            assert_eq!(dto.status, MatchStatus::Confirmed);
            assert_eq!((dto.home_score, dto.away_score), (Some(1), Some(1)));
        }
        other => panic!("expected MatchState, got {other:?}"),
    }
}

//
// TEST 5 — приватная лига: CheckAccess
//
#[tokio::test]
async fn check_access_query() {
    let mut service = LeagueService::new(InMemoryLeagueStore::new());
    let mut config = LeagueConfig::public("Private");
    config.visibility = Visibility::Private;
    let league_id = create_league(&mut service, config, Some("pw")).await;

    let access = |user_id, password: Option<&str>| Query::CheckAccess {
        league_id,
        user_id,
        password: password.map(str::to_string),
    };

    assert_eq!(
        service.query(access(5, Some("pw"))).await.unwrap(),
        QueryResponse::Access(true)
    );
    assert_eq!(
        service.query(access(5, Some("nope"))).await.unwrap(),
        QueryResponse::Access(false)
    );

    match service.query(Query::ListLeagues).await.unwrap() {
        QueryResponse::Leagues(list) => {
            assert_eq!(list.len(), 1);
            assert!(list[0].has_password);
        }
        other => panic!("expected Leagues, got {other:?}"),
    }
}

//
// TEST 6 — удаление лиги и несуществующие сущности
//
#[tokio::test]
async fn delete_league_and_not_found() {
    let mut service = LeagueService::new(InMemoryLeagueStore::new());
    let league_id = create_league(&mut service, LeagueConfig::public("Gone"), None).await;

    let resp = service
        .execute(OWNER, Command::League(LeagueCommand::Delete { league_id }))
        .await
        .unwrap();
    assert_eq!(resp, CommandResponse::Ok);

    let err = service.query(Query::GetStandings { league_id }).await.unwrap_err();
    assert_eq!(err, ApiError::LeagueNotFound(league_id));

    let err = service
        .execute(
            OWNER,
            Command::Match(MatchCommand::ProposeScore {
                match_id: 999,
                home_score: 0,
                away_score: 0,
            }),
        )
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::MatchNotFound(999));
}

//
// TEST 7 — сбой хранилища в любой момент GenerateSchedule: ошибка только без записи
//
#[tokio::test]
async fn generate_error_means_nothing_committed() {
    let mut committed_once = false;

    for k in 0..12 {
        let store = InMemoryLeagueStore::new();
        let mut service = LeagueService::new(store.clone());
        let league_id = create_league(&mut service, LeagueConfig::public("Cup"), None).await;
        for name in ["Alpha", "Bravo", "Charlie"] {
            create_team(&mut service, league_id, name).await;
        }

        // упасть на k-м вызове, в т.ч. сразу после коммита
        store.fail_after(k, 1);
        let result = generate(&mut service, league_id, false).await;
        store.fail_next(0);

        let stored = match service.query(Query::ListMatches { league_id }).await.unwrap() {
            QueryResponse::Matches(stored) => stored,
            other => panic!("expected Matches, got {other:?}"),
        };

        match result {
            Ok(list) => {
                committed_once = true;
                assert_eq!(stored, list, "k = {k}");
            }
            Err(err) => {
                assert!(matches!(err, ApiError::StoreUnavailable { .. }), "k = {k}: {err:?}");
                assert!(stored.is_empty(), "k = {k}: ошибка, но расписание записано");
            }
        }
    }

    assert!(committed_once);
}

//
// TEST 8 — то же для ForceScore
//
#[tokio::test]
async fn force_score_error_means_nothing_committed() {
    for k in 0..8 {
        let store = InMemoryLeagueStore::new();
        let mut service = LeagueService::new(store.clone());
        let league_id = create_league(&mut service, LeagueConfig::public("Cup"), None).await;
        create_team(&mut service, league_id, "A").await;
        create_team(&mut service, league_id, "B").await;
        let m = generate(&mut service, league_id, false).await.unwrap().remove(0);

        store.fail_after(k, 1);
        let result = service
            .execute(
                OWNER,
                Command::Match(MatchCommand::ForceScore {
                    league_id,
                    match_id: m.match_id,
                    home_score: 2,
                    away_score: 0,
                }),
            )
            .await;
        store.fail_next(0);

        let stored = match service.query(Query::ListMatches { league_id }).await.unwrap() {
            QueryResponse::Matches(mut stored) => stored.remove(0),
            other => panic!("expected Matches, got {other:?}"),
        };

        match result {
            Ok(CommandResponse::MatchState(dto)) => {
                assert_eq!(dto.home_team_name, stored.home_team_name);
                assert_eq!(stored.status, MatchStatus::Confirmed, "k = {k}");
            }
            Ok(other) => panic!("expected MatchState, got {other:?}"),
            Err(err) => {
                assert!(matches!(err, ApiError::StoreUnavailable { .. }), "k = {k}: {err:?}");
                assert_eq!(stored.status, MatchStatus::Scheduled, "k = {k}: ошибка, но счёт записан");
            }
        }
    }
}

//
// TEST 9 — GetStandings: таблица и имена из одного снимка команд
//
#[tokio::test]
async fn standings_read_teams_once() {
    let store = InMemoryLeagueStore::new();
    let mut service = LeagueService::new(store.clone());
    let league_id = create_league(&mut service, LeagueConfig::public("Cup"), None).await;
    create_team(&mut service, league_id, "Red Lions").await;
    create_team(&mut service, league_id, "Blue Sharks").await;

    // лига, команды, матчи – и больше ни одного чтения
    store.fail_after(3, 1);
    let rows = match service.query(Query::GetStandings { league_id }).await.unwrap() {
        QueryResponse::Standings(rows) => rows,
        other => panic!("expected Standings, got {other:?}"),
    };
    store.fail_next(0);

    assert_eq!(rows.len(), 2);
    let initials: Vec<&str> = rows.iter().map(|r| r.initials.as_str()).collect();
    assert!(initials.contains(&"RL") && initials.contains(&"BS"));
}
