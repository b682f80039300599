// src/engine/standings.rs

use std::cmp::Ordering;
use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::fixture::Match;
use crate::domain::team::Team;
use crate::domain::TeamId;

/// Очки за победу.
pub const WIN_POINTS: u32 = 3;
/// Очки за ничью.
pub const DRAW_POINTS: u32 = 1;

/// Строка турнирной таблицы. Не хранится – каждый раз пересчитывается из матчей.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingRow {
    pub team_id: TeamId,
    /// Имя команды нужно для последнего тай-брейка.
    pub name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingRow {
    fn empty(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += u64::from(scored);
        self.goals_against += u64::from(conceded);

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                self.points += WIN_POINTS;
            }
            Ordering::Equal => {
                self.draws += 1;
                self.points += DRAW_POINTS;
            }
            Ordering::Less => self.losses += 1,
        }
    }
}

/// Порядок в таблице: очки, разница, забитые (по убыванию), затем имя
/// (лексикографически) и id – чтобы порядок был полным.
fn table_order(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Свернуть матчи в турнирную таблицу.
///
/// Вход:
///   - `teams`: все команды лиги (по строке на каждую, даже без матчей);
///   - `matches`: все матчи лиги. Матчи без счёта пропускаются целиком.
///
/// Матч со ссылкой на команду не из `teams` игнорируется (с warn в логе).
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Vec<StandingRow> {
    let mut rows: HashMap<TeamId, StandingRow> = teams
        .iter()
        .map(|t| (t.id, StandingRow::empty(t)))
        .collect();

    for m in matches {
        let Some(score) = m.result else {
            continue;
        };

        if !rows.contains_key(&m.home_team_id) || !rows.contains_key(&m.away_team_id) {
            warn!(
                "standings: match {} references unknown team ({} vs {}), skipped",
                m.id, m.home_team_id, m.away_team_id
            );
            continue;
        }

        if let Some(home) = rows.get_mut(&m.home_team_id) {
            home.record(score.home, score.away);
        }
        if let Some(away) = rows.get_mut(&m.away_team_id) {
            away.record(score.away, score.home);
        }
    }

    let mut table: Vec<StandingRow> = rows
        .into_values()
        .map(|mut row| {
            row.goal_difference = row.goals_for as i64 - row.goals_against as i64;
            row
        })
        .collect();

    table.sort_by(table_order);
    table
}
