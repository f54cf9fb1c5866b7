//! In-memory progress repository for tests and sessions without persistence.

use std::sync::RwLock;

use maze_core::ProgressOracle;

use super::traits::progress_oracle_via_record;
use super::{ProgressRecord, ProgressRepository, RepositoryError, Result};

/// In-memory implementation of [`ProgressRepository`].
///
/// Progress lives as long as the repository; nothing touches the disk.
#[derive(Debug, Default)]
pub struct InMemoryProgressRepo {
    record: RwLock<ProgressRecord>,
}

impl InMemoryProgressRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-existing progress.
    pub fn with_record(record: ProgressRecord) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }
}

impl ProgressRepository for InMemoryProgressRepo {
    fn load(&self) -> Result<ProgressRecord> {
        let record = self
            .record
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(record.clone())
    }

    fn update(&self, update: &mut dyn FnMut(&mut ProgressRecord)) -> Result<()> {
        let mut record = self
            .record
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        update(&mut record);
        Ok(())
    }

    fn as_oracle(&self) -> &dyn ProgressOracle {
        self
    }
}

progress_oracle_via_record!(InMemoryProgressRepo);
