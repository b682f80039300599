// tests/standings_tests.rs

use league_engine::domain::fixture::{Match, MatchScore};
use league_engine::domain::team::{Team, TeamDraft};
use league_engine::domain::{MatchId, TeamId};
use league_engine::engine::{compute_standings, DRAW_POINTS, WIN_POINTS};

fn team(id: TeamId, name: &str) -> Team {
    Team::new(
        id,
        1,
        TeamDraft {
            name: name.into(),
            color: "#000000".into(),
            max_players: None,
        },
        5,
    )
    .unwrap()
}

fn played(id: MatchId, home: TeamId, away: TeamId, h: u32, a: u32) -> Match {
    let mut m = Match::scheduled(id, 1, 1, home, away);
    m.result = Some(MatchScore::new(h, a));
    m
}

//
// TEST 1 — базовый пример: A 2–1 B, B 0–0 C, A–C не сыгран
//
#[test]
fn win_and_draw_ranked_by_points_then_goal_difference() {
    let teams = vec![team(1, "A"), team(2, "B"), team(3, "C")];
    let matches = vec![
        played(1, 1, 2, 2, 1),
        played(2, 2, 3, 0, 0),
        Match::scheduled(3, 1, 3, 1, 3),
    ];

    let table = compute_standings(&teams, &matches);
    let order: Vec<TeamId> = table.iter().map(|r| r.team_id).collect();

    // A: 3 очка. C и B по 1 очку, но у C разница 0, у B -1.
    assert_eq!(order, vec![1, 3, 2]);

    let a = &table[0];
    assert_eq!((a.played, a.wins, a.points), (1, 1, WIN_POINTS));
    assert_eq!((a.goals_for, a.goals_against, a.goal_difference), (2, 1, 1));

    let c = &table[1];
    assert_eq!((c.played, c.draws, c.points), (1, 1, DRAW_POINTS));
    assert_eq!((c.goals_for, c.goals_against, c.goal_difference), (0, 0, 0));

    let b = &table[2];
    assert_eq!((b.played, b.draws, b.losses, b.points), (2, 1, 1, DRAW_POINTS));
    assert_eq!((b.goals_for, b.goals_against, b.goal_difference), (1, 2, -1));
}

//
// TEST 2 — несыгранные матчи не влияют на таблицу
//
#[test]
fn unplayed_matches_are_skipped() {
    let teams = vec![team(1, "A"), team(2, "B")];
    let matches = vec![Match::scheduled(1, 1, 1, 1, 2)];

    let table = compute_standings(&teams, &matches);

    assert_eq!(table.len(), 2);
    assert!(table.iter().all(|r| r.played == 0 && r.points == 0));
    // всё равно -> по имени
    assert_eq!(table[0].name, "A");
}

//
// TEST 3 — пересчёт идемпотентен и не зависит от порядка входа
//
#[test]
fn recompute_is_idempotent() {
    let teams = vec![team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D")];
    let mut matches = vec![
        played(1, 1, 2, 3, 1),
        played(2, 3, 4, 0, 0),
        played(3, 1, 3, 1, 2),
        played(4, 2, 4, 4, 4),
    ];

    let first = compute_standings(&teams, &matches);
    let second = compute_standings(&teams, &matches);
    assert_eq!(first, second);

    matches.reverse();
    let mut shuffled_teams = teams.clone();
    shuffled_teams.reverse();
    assert_eq!(compute_standings(&shuffled_teams, &matches), first);
}

//
// TEST 4 — тай-брейк по забитым, затем по имени
//
#[test]
fn tie_breaks_goals_for_then_name() {
    let teams = vec![team(1, "Zeta"), team(2, "Alpha"), team(3, "Beta"), team(4, "Omega")];
    // Zeta и Beta: по победе, GD +1, но Zeta забила больше.
    let matches = vec![played(1, 1, 4, 3, 2), played(2, 3, 2, 1, 0)];

    let table = compute_standings(&teams, &matches);
    let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();

    // Alpha и Omega: по поражению с GD -1; Omega забила больше.
    assert_eq!(names, vec!["Zeta", "Beta", "Omega", "Alpha"]);
}

//
// TEST 5 — матч с удалённой командой игнорируется
//
#[test]
fn match_with_unknown_team_is_ignored() {
    let teams = vec![team(1, "A"), team(2, "B")];
    let matches = vec![played(1, 1, 99, 5, 0), played(2, 1, 2, 0, 1)];

    let table = compute_standings(&teams, &matches);

    assert_eq!(table[0].team_id, 2);
    let a = table.iter().find(|r| r.team_id == 1).unwrap();
    assert_eq!(a.played, 1);
    assert_eq!(a.goals_for, 0);
}

//
// TEST 6 — команда без матчей тоже в таблице
//
#[test]
fn team_without_matches_still_listed() {
    let teams = vec![team(1, "A"), team(2, "B"), team(3, "Idle")];
    let matches = vec![played(1, 1, 2, 1, 0)];

    let table = compute_standings(&teams, &matches);

    assert_eq!(table.len(), 3);
    let idle = table.iter().find(|r| r.team_id == 3).unwrap();
    assert_eq!(idle.played, 0);
}
