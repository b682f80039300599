// src/engine/schedule.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Round, TeamId};

/// Одна пара в расписании: кто дома, кто в гостях, в каком туре.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Fixture {
    /// Номер тура (1-based).
    pub round: Round,
    pub home: TeamId,
    pub away: TeamId,
}

/// Расписание: туры по порядку, в каждом туре – набор пар.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    pub rounds: Vec<Vec<Fixture>>,
}

impl Schedule {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn fixture_count(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    /// Все пары подряд, тур за туром.
    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.rounds.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.fixture_count() == 0
    }
}

/// Круговая система (circle method).
///
/// Вход:
///   - `team_ids`: уникальные id команд; порядок задаёт стартовую расстановку.
///   - `double_round_robin`: добавить второй круг с зеркальными парами.
///
/// Алгоритм:
///   1. Если команд нечётное число – добавляем пустой слот (bye).
///   2. n' слотов -> n' - 1 туров. В туре позиция i играет с позицией n'-1-i.
///      Пары с bye выбрасываются (команда отдыхает).
///   3. После каждого тура первый слот стоит на месте, остальные
///      сдвигаются по кругу на одну позицию (последний встаёт вторым).
///
/// Меньше двух команд -> пустое расписание.
///
/// Паника: повторяющиеся id. Это ошибка вызывающего кода, а не рантайма.
pub fn generate_round_robin(team_ids: &[TeamId], double_round_robin: bool) -> Schedule {
    let mut seen = HashSet::with_capacity(team_ids.len());
    for id in team_ids {
        assert!(
            seen.insert(*id),
            "generate_round_robin: duplicate team id {id}"
        );
    }

    if team_ids.len() < 2 {
        return Schedule::default();
    }

    // None = bye.
    let mut slots: Vec<Option<TeamId>> = team_ids.iter().copied().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let total = slots.len();
    let half = total / 2;
    let mut rounds: Vec<Vec<Fixture>> = Vec::with_capacity(total - 1);

    for r in 0..total - 1 {
        let round = (r + 1) as Round;
        let mut fixtures = Vec::with_capacity(half);

        for i in 0..half {
            if let (Some(home), Some(away)) = (slots[i], slots[total - 1 - i]) {
                fixtures.push(Fixture { round, home, away });
            }
        }

        rounds.push(fixtures);

        // Ротация: slots[0] фиксирован, хвост крутится вправо на 1.
        slots[1..].rotate_right(1);
    }

    if double_round_robin {
        let first_leg = rounds.len() as Round;
        let second_leg: Vec<Vec<Fixture>> = rounds
            .iter()
            .map(|round| {
                round
                    .iter()
                    .map(|f| Fixture {
                        round: f.round + first_leg,
                        home: f.away,
                        away: f.home,
                    })
                    .collect()
            })
            .collect();
        rounds.extend(second_leg);
    }

    Schedule { rounds }
}
