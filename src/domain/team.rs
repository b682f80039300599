use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::errors::LeagueError;
use crate::domain::{LeagueId, TeamId, UserId};

/// Данные для создания команды (то, что вводит владелец лиги).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub color: String,
    /// `None` – берём `default_team_capacity` лиги.
    pub max_players: Option<u32>,
}

/// Команда внутри лиги.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub league_id: LeagueId,
    pub name: String,
    /// Короткая метка (≤ 3 символов), косметика.
    pub initials: String,
    pub color: String,
    pub max_players: u32,
    /// Капитан: предлагает счёт матчей своей команды.
    pub captain: Option<UserId>,
    pub members: BTreeSet<UserId>,
}

impl Team {
    pub fn new(
        id: TeamId,
        league_id: LeagueId,
        draft: TeamDraft,
        default_capacity: u32,
    ) -> Result<Self, LeagueError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(LeagueError::InvalidConfig("Team: name is empty".into()));
        }

        let max_players = draft.max_players.unwrap_or(default_capacity);
        if max_players == 0 {
            return Err(LeagueError::InvalidConfig("Team: max_players = 0".into()));
        }

        Ok(Self {
            id,
            league_id,
            initials: initials_from_name(&name),
            name,
            color: draft.color,
            max_players,
            captain: None,
            members: BTreeSet::new(),
        })
    }

    pub fn is_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    pub fn is_captain(&self, user_id: UserId) -> bool {
        self.captain == Some(user_id)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_players as usize
    }

    /// Добавить игрока в состав.
    ///
    /// Повторный вход – no-op. Первый вошедший становится капитаном.
    /// Правило "одна команда на лигу" проверяет вызывающий слой: ему нужен
    /// снимок всех команд лиги.
    pub fn add_member(&mut self, user_id: UserId) -> Result<(), LeagueError> {
        if self.is_member(user_id) {
            return Ok(());
        }
        if self.is_full() {
            return Err(LeagueError::TeamFull { team_id: self.id });
        }

        self.members.insert(user_id);
        if self.captain.is_none() {
            self.captain = Some(user_id);
        }
        Ok(())
    }

    /// Убрать игрока из состава.
    ///
    /// Если уходит капитан – капитанство переходит к игроку с наименьшим id.
    pub fn remove_member(&mut self, user_id: UserId) -> Result<(), LeagueError> {
        if !self.members.remove(&user_id) {
            return Err(LeagueError::NotAMember {
                user_id,
                team_id: self.id,
            });
        }

        if self.captain == Some(user_id) {
            self.captain = self.members.iter().next().copied();
        }
        Ok(())
    }

    pub fn set_captain(&mut self, user_id: UserId) -> Result<(), LeagueError> {
        if !self.is_member(user_id) {
            return Err(LeagueError::NotAMember {
                user_id,
                team_id: self.id,
            });
        }
        self.captain = Some(user_id);
        Ok(())
    }
}

/// Инициалы: первые буквы первых двух слов, в верхнем регистре.
/// Однословное имя даёт до трёх первых букв ("Lions" -> "LIO").
pub fn initials_from_name(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();

    let initials: String = if words.len() >= 2 {
        words
            .iter()
            .take(2)
            .filter_map(|w| w.chars().next())
            .collect()
    } else {
        words
            .first()
            .map(|w| w.chars().take(3).collect())
            .unwrap_or_default()
    };

    initials.to_uppercase().chars().take(3).collect()
}
