//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when a required collaborator is missing from the environment.
///
/// The engine cannot draw questions, carve mazes, or record completions without
/// them, so every variant is fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// ProgressOracle is not available in the environment.
    #[error("ProgressOracle not available")]
    ProgressNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            OracleError::ProgressNotAvailable => "ORACLE_PROGRESS_NOT_AVAILABLE",
        }
    }
}
