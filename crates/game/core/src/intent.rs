//! Requested actions and their validated effects.
use crate::error::{ErrorSeverity, GameError};
use crate::grid::Position;
use crate::unit::UnitId;

/// A requested action, subject to validation before any mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    MoveTo(Position),
    AttackAt(Position),
    EndTurn,
}

/// Applied effect of an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Moved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    Attacked {
        attacker: UnitId,
        target: UnitId,
        damage: u32,
        target_died: bool,
    },
    /// The actor ended its turn without acting.
    Waited { unit: UnitId },
    Invalid(InvalidReason),
}

impl Outcome {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid(_))
    }

    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            Outcome::Invalid(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Why the resolver refused an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidReason {
    #[error("actor {0} not found")]
    ActorNotFound(UnitId),

    #[error("actor {0} is dead")]
    ActorDead(UnitId),

    #[error("illegal move: {0}")]
    IllegalMove(IllegalMove),

    #[error("illegal attack: {0}")]
    IllegalAttack(IllegalAttack),

    #[error("end turn is not resolved as an action")]
    NotAnAction,
}

impl GameError for InvalidReason {
    fn severity(&self) -> ErrorSeverity {
        match self {
            InvalidReason::ActorNotFound(_) | InvalidReason::NotAnAction => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            InvalidReason::ActorNotFound(_) => "ACTOR_NOT_FOUND",
            InvalidReason::ActorDead(_) => "ACTOR_DEAD",
            InvalidReason::IllegalMove(_) => "ILLEGAL_MOVE",
            InvalidReason::IllegalAttack(_) => "ILLEGAL_ATTACK",
            InvalidReason::NotAnAction => "NOT_AN_ACTION",
        }
    }
}

impl From<IllegalMove> for InvalidReason {
    fn from(value: IllegalMove) -> Self {
        InvalidReason::IllegalMove(value)
    }
}

impl From<IllegalAttack> for InvalidReason {
    fn from(value: IllegalAttack) -> Self {
        InvalidReason::IllegalAttack(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalMove {
    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },

    #[error("destination {destination} is occupied")]
    Occupied { destination: Position },

    #[error("already standing on {destination}")]
    Stationary { destination: Position },

    #[error("destination {destination} is {distance} tiles away, range is {range}")]
    OutOfRange {
        destination: Position,
        distance: u32,
        range: u32,
    },

    #[error("no walkable path to {destination} within {range} tiles")]
    NoPath { destination: Position, range: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalAttack {
    #[error("target tile {target} is out of bounds")]
    OutOfBounds { target: Position },

    #[error("nobody stands on {target}")]
    NoTarget { target: Position },

    #[error("target tile {target} is not orthogonally adjacent")]
    NotAdjacent { target: Position },

    #[error("target {target} is already dead")]
    TargetDead { target: UnitId },

    #[error("target {target} is on the same side")]
    FriendlyTarget { target: UnitId },
}
