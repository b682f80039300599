use crate::domain::MatchId;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки чистых переходов состояния матча.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EngineError {
    #[error("Матч {0} уже подтверждён")]
    MatchAlreadyConfirmed(MatchId),

    #[error("Предложения счёта отключены политикой лиги")]
    ProposalsDisabled,
}
