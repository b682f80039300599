//! Хэш пароля приватной лиги.
//!
//!   hash = hex( H(domain || league_id || password) )
//!
//! Соль – id лиги: одинаковые пароли в разных лигах дают разные хэши.

use sha2::{Digest, Sha256};

use crate::domain::LeagueId;

/// Посчитать хэш пароля для лиги. Пробелы по краям не учитываются.
pub fn hash_password(league_id: LeagueId, password: &str) -> String {
    let mut hasher = Sha256::new();

    // Доменный префикс
    hasher.update(b"LEAGUE_ENGINE_PASSWORD_V1");
    hasher.update(league_id.to_le_bytes());
    hasher.update(password.trim().as_bytes());

    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Сверить пароль с сохранённым хэшем.
pub fn verify_password(league_id: LeagueId, password: &str, expected_hash: &str) -> bool {
    hash_password(league_id, password) == expected_hash
}
