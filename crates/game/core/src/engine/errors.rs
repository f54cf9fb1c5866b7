//! Error types for command execution.

use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{Position, TimeoutTicket};

/// Reasons a command was ignored without touching the state.
///
/// None of these reach the player: the runtime drops them and reports
/// "no change" to the caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("target {target} is outside the grid")]
    OutOfBounds { target: Position },

    #[error("target {target} is a wall")]
    Blocked { target: Position },

    #[error("({dx}, {dy}) is not a unit axis step")]
    InvalidDirection { dx: i32, dy: i32 },

    #[error("input ignored while a question is pending")]
    MoveLocked,

    #[error("no question is pending")]
    NoPendingQuestion,

    #[error("no decision is pending")]
    NoPendingDecision,

    #[error("{ticket} is not the armed timeout")]
    StaleTimeout { ticket: TimeoutTicket },

    #[error("the run is already complete")]
    SessionComplete,
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CommandError::OutOfBounds { .. }
            | CommandError::Blocked { .. }
            | CommandError::InvalidDirection { .. } => ErrorSeverity::Validation,
            CommandError::MoveLocked
            | CommandError::NoPendingQuestion
            | CommandError::NoPendingDecision
            | CommandError::StaleTimeout { .. }
            | CommandError::SessionComplete => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CommandError::OutOfBounds { .. } => "COMMAND_OUT_OF_BOUNDS",
            CommandError::Blocked { .. } => "COMMAND_BLOCKED",
            CommandError::InvalidDirection { .. } => "COMMAND_INVALID_DIRECTION",
            CommandError::MoveLocked => "COMMAND_MOVE_LOCKED",
            CommandError::NoPendingQuestion => "COMMAND_NO_PENDING_QUESTION",
            CommandError::NoPendingDecision => "COMMAND_NO_PENDING_DECISION",
            CommandError::StaleTimeout { .. } => "COMMAND_STALE_TIMEOUT",
            CommandError::SessionComplete => "COMMAND_SESSION_COMPLETE",
        }
    }
}

/// Errors surfaced while executing a command through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExecuteError {
    #[error("command rejected: {error}")]
    Rejected {
        error: CommandError,
        context: ErrorContext,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ExecuteError {
    pub fn rejected(error: CommandError, nonce: u64, position: Position) -> Self {
        Self::Rejected {
            error,
            context: ErrorContext::new(nonce).with_position(position),
        }
    }

    /// The command error, if this was a plain rejection.
    pub fn as_rejection(&self) -> Option<&CommandError> {
        match self {
            ExecuteError::Rejected { error, .. } => Some(error),
            ExecuteError::Oracle(_) => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::Rejected { error, .. } => error.severity(),
            ExecuteError::Oracle(error) => error.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            ExecuteError::Rejected { context, .. } => Some(context),
            ExecuteError::Oracle(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Rejected { error, .. } => error.error_code(),
            ExecuteError::Oracle(error) => error.error_code(),
        }
    }
}
