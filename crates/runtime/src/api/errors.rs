//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and content loading
//! so clients can bubble them up with consistent context. Rejected commands
//! are not errors; they come back as [`CommandOutcome::Ignored`].
//!
//! [`CommandOutcome::Ignored`]: crate::api::CommandOutcome::Ignored
use thiserror::Error;
use tokio::sync::oneshot;

use maze_core::OracleError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}
