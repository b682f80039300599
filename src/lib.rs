//! Главный модуль приложения лиг на Linera.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response) и
//! связываем contract/service с нашим LeagueState.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod league;
pub mod state;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, Query, QueryResponse};
use crate::domain::UserId;
use crate::state::LeagueState;

/// Операции (внешние команды), которые модуль принимает.
///
/// Одна операция = одна команда из api::Command от имени `actor`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LeagueOperation {
    Command { actor: UserId, command: Command },
}

/// Сообщения между приложениями Linera.
/// Пока не нужны – пустой enum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LeagueMessage {}

/// Запросы к сервису (read-only).
pub type LeagueQuery = Query;

/// Ответы на запросы.
pub type LeagueResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct LeagueAbi;

impl ContractAbi for LeagueAbi {
    type Operation = LeagueOperation;
    type Response = ();
}

impl ServiceAbi for LeagueAbi {
    type Query = LeagueQuery;
    type QueryResponse = LeagueResponse;
}

/// Тип состояния для contract.rs / service.rs.
pub type Storage = LeagueState;
