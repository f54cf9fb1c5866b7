//! Error types raised by repository implementations.

use maze_core::ProgressError;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("progress repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

impl From<RepositoryError> for ProgressError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Json(error) => ProgressError::Corrupted(error.to_string()),
            other => ProgressError::Unavailable(other.to_string()),
        }
    }
}
