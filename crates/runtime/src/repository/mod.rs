//! Repository layer for cross-session progress.
//!
//! Repositories hold data that outlives a session: custom questions, disabled
//! built-ins, completed tiers, and the persistent coin total. The core reaches
//! them only through the [`maze_core::ProgressOracle`] port.
//!
//! Static content (the built-in bank, configuration) is loaded by
//! `maze-content`, not stored here.

mod error;
mod file;
mod memory;
mod record;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileProgressRepository;
pub use memory::InMemoryProgressRepo;
pub use record::ProgressRecord;
pub use traits::ProgressRepository;
