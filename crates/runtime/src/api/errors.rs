//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from battle setup, the turn loop, and intent providers so
//! clients can bubble them up with consistent context.
use tactics_core::{BattleError, ErrorSeverity, GameError, Phase, Rejection, SetupError};
use thiserror::Error;

use crate::talents::TalentError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("battle setup rejected: {0}")]
    Setup(#[from] SetupError),

    #[error("battle halted: {0}")]
    Battle(#[from] BattleError),

    #[error("intent provider rejected {count} times in a row (last: {last})")]
    TooManyRejections { count: u32, last: Rejection },

    #[error("scripted intents exhausted after {consumed} intents")]
    ScriptExhausted { consumed: usize },

    #[error("battle still running after {rounds} rounds")]
    RoundLimit { rounds: u32 },

    #[error("battle stopped in {phase} without a result")]
    Unsettled { phase: Phase },

    #[error(transparent)]
    Talent(#[from] TalentError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Setup(err) => err.severity(),
            RuntimeError::Battle(err) => err.severity(),
            RuntimeError::TooManyRejections { .. } | RuntimeError::ScriptExhausted { .. } => {
                ErrorSeverity::Validation
            }
            RuntimeError::RoundLimit { .. } | RuntimeError::Unsettled { .. } => {
                ErrorSeverity::Internal
            }
            RuntimeError::Talent(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Setup(err) => err.error_code(),
            RuntimeError::Battle(err) => err.error_code(),
            RuntimeError::TooManyRejections { .. } => "TOO_MANY_REJECTIONS",
            RuntimeError::ScriptExhausted { .. } => "SCRIPT_EXHAUSTED",
            RuntimeError::RoundLimit { .. } => "ROUND_LIMIT",
            RuntimeError::Unsettled { .. } => "UNSETTLED",
            RuntimeError::Talent(_) => "TALENT",
        }
    }
}
