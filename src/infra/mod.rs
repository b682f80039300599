//! Инфраструктурный слой вокруг движка лиги:
//! - генерация ID;
//! - RNG-реализации для перемешивания команд;
//! - хэш паролей приватных лиг;
//! - абстракция хранилища и in-memory реализация;
//! - маппинги между domain и API.

pub mod ids;
pub mod mapping;
#[cfg(not(target_arch = "wasm32"))]
pub mod memory;
pub mod password;
pub mod rng;
pub mod store;

pub use ids::*;
pub use mapping::*;
#[cfg(not(target_arch = "wasm32"))]
pub use memory::InMemoryLeagueStore;
pub use password::{hash_password, verify_password};
pub use rng::*;
pub use store::{LeagueStore, Precondition, StoreError, WriteOp};
