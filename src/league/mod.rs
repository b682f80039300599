// src/league/mod.rs
//
// Оркестрация лиги поверх хранилища: права, транзакции, ретраи.

pub mod config;
pub mod dispatch;
pub mod service;

pub use config::{GenerateOptions, ServiceConfig};
pub use service::LeagueService;
