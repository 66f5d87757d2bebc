//! Common error infrastructure for tactics-core.
//!
//! This module provides shared types and traits used across all error types in
//! the crate. Domain-specific errors (e.g., [`GridError`](crate::grid::GridError),
//! [`BattleError`](crate::battle::BattleError)) are defined in their respective
//! modules alongside the operations that raise them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Rejections are values**: A refused player intent is an [`Outcome`](crate::Outcome),
//!   not an error; errors are reserved for contract violations and defects
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: The caller can correct its input and try again
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with a corrected request.
    ///
    /// Examples: destination blocked, target out of range, not the hero's turn
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: spawn outside the lattice, empty enemy roster
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: occupancy map desync, two units on one tile
    Internal,

    /// Fatal error - battle state is no longer trustworthy.
    ///
    /// Examples: enemy policy produced an illegal intent
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, log fields, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
