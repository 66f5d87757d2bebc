//! Error types for battle setup and the turn loop.

use crate::archetype::EnemyArchetype;
use crate::error::{ErrorSeverity, GameError};
use crate::field::InvariantBreach;
use crate::grid::{LayoutError, Position};
use crate::intent::{Intent, InvalidReason};
use crate::unit::UnitId;

use super::Phase;

/// Input rejected by [`Battle::start`](super::Battle::start).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("enemy roster is empty")]
    EmptyRoster,

    #[error("roster holds {count} enemies, limit is {max}")]
    TooManyEnemies { count: usize, max: usize },

    #[error("no template for archetype {0}")]
    MissingArchetype(EnemyArchetype),

    #[error("spawn of {unit} at {position} is out of bounds")]
    SpawnOutOfBounds { unit: UnitId, position: Position },

    #[error("spawn of {unit} at {position} is on blocking terrain")]
    SpawnBlocked { unit: UnitId, position: Position },

    #[error("spawn of {unit} at {position} is already taken by {occupant}")]
    SpawnOccupied {
        unit: UnitId,
        position: Position,
        occupant: UnitId,
    },

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            SetupError::EmptyRoster => "SETUP_EMPTY_ROSTER",
            SetupError::TooManyEnemies { .. } => "SETUP_TOO_MANY_ENEMIES",
            SetupError::MissingArchetype(_) => "SETUP_MISSING_ARCHETYPE",
            SetupError::SpawnOutOfBounds { .. } => "SETUP_SPAWN_OUT_OF_BOUNDS",
            SetupError::SpawnBlocked { .. } => "SETUP_SPAWN_BLOCKED",
            SetupError::SpawnOccupied { .. } => "SETUP_SPAWN_OCCUPIED",
            SetupError::Layout(_) => "SETUP_LAYOUT",
        }
    }
}

/// A hero intent the battle refused. State is unchanged and the hero keeps
/// the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    #[error("intents are only accepted on the hero's turn (phase is {phase})")]
    NotHeroTurn { phase: Phase },

    #[error(transparent)]
    Invalid(InvalidReason),
}

impl Rejection {
    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            Rejection::Invalid(reason) => Some(*reason),
            Rejection::NotHeroTurn { .. } => None,
        }
    }
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Rejection::NotHeroTurn { .. } => "NOT_HERO_TURN",
            Rejection::Invalid(reason) => reason.error_code(),
        }
    }
}

/// Fatal faults. After any of these the battle refuses further input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("enemy {unit} chose {intent:?}, which was rejected: {reason}")]
    PolicyViolation {
        unit: UnitId,
        intent: Intent,
        reason: InvalidReason,
    },

    #[error("inconsistent battle state: {0}")]
    InconsistentState(#[from] InvariantBreach),

    #[error("battle halted after an earlier fault")]
    Halted,
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BattleError::InconsistentState(_) => ErrorSeverity::Internal,
            BattleError::PolicyViolation { .. } | BattleError::Halted => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            BattleError::PolicyViolation { .. } => "POLICY_VIOLATION",
            BattleError::InconsistentState(_) => "INCONSISTENT_STATE",
            BattleError::Halted => "BATTLE_HALTED",
        }
    }
}

/// Failure of [`Battle::submit`](super::Battle::submit).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("intent rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Fault(#[from] BattleError),
}

impl SubmitError {
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            SubmitError::Rejected(rejection) => Some(*rejection),
            SubmitError::Fault(_) => None,
        }
    }
}

impl GameError for SubmitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SubmitError::Rejected(rejection) => rejection.severity(),
            SubmitError::Fault(fault) => fault.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SubmitError::Rejected(rejection) => rejection.error_code(),
            SubmitError::Fault(fault) => fault.error_code(),
        }
    }
}
