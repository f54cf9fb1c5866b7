//! Persistence port for cross-session progress.
//!
//! The engine never touches a global store. Custom questions, disabled
//! built-ins, completed tiers, and the persistent coin total are read and
//! written exclusively through a [`ProgressOracle`] supplied in the
//! environment. Accessors are synchronous key-value operations without
//! transactional guarantees.

use crate::error::{ErrorSeverity, GameError};
use crate::question::{Difficulty, Question, QuestionId};

/// Persistence collaborator.
pub trait ProgressOracle: Send + Sync {
    fn load_custom_questions(&self) -> Result<Vec<Question>, ProgressError>;

    fn load_disabled_ids(&self) -> Result<Vec<QuestionId>, ProgressError>;

    fn load_completed_difficulties(&self) -> Result<Vec<Difficulty>, ProgressError>;

    fn save_completed_difficulty(&self, tier: Difficulty) -> Result<(), ProgressError>;

    fn load_total_coins(&self) -> Result<i64, ProgressError>;

    fn save_total_coins(&self, total: i64) -> Result<(), ProgressError>;
}

/// Failure reported by a progress store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressError {
    #[error("progress store unavailable: {0}")]
    Unavailable(String),

    #[error("progress data corrupted: {0}")]
    Corrupted(String),
}

impl GameError for ProgressError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ProgressError::Unavailable(_) => ErrorSeverity::Recoverable,
            ProgressError::Corrupted(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ProgressError::Unavailable(_) => "PROGRESS_UNAVAILABLE",
            ProgressError::Corrupted(_) => "PROGRESS_CORRUPTED",
        }
    }
}
