//! Common error infrastructure for maze-core.
//!
//! Domain-specific errors (`CommandError`, `OracleError`, `ProgressError`) live
//! next to the code that raises them. They all implement [`GameError`] so the
//! runtime can decide uniformly whether to drop, log, or surface a failure.
//!
//! # Severity model
//!
//! The core never lets an error reach the rendering layer. Invalid input is a
//! silent no-op, content exhaustion degrades to free movement, and a missing
//! route to the exit is reported as a consistency violation. Only missing
//! collaborators are fatal.

use crate::state::Position;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the command was dropped, the session continues unchanged
/// - **Validation**: malformed input that the caller should not resend as-is
/// - **Internal**: unexpected state inconsistency, indicates a bug
/// - **Fatal**: a required collaborator is missing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Dropped input; retrying later (e.g. after the move-lock clears) may succeed.
    Recoverable,

    /// Invalid input, such as a wall target or a diagonal direction vector.
    Validation,

    /// Unexpected state inconsistency that should be investigated.
    Internal,

    /// The engine cannot proceed.
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

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorContext {
    /// Player position when the error occurred (if applicable).
    pub position: Option<Position>,

    /// Session nonce at the time of error.
    pub nonce: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context with the given nonce.
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            position: None,
            nonce,
            message: None,
        }
    }

    /// Attaches a position to this context (builder pattern).
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all maze-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable, SCREAMING_SNAKE_CASE `error_code`
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
