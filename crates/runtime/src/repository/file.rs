//! File-based progress repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use maze_core::ProgressOracle;

use super::traits::progress_oracle_via_record;
use super::{ProgressRecord, ProgressRepository, RepositoryError, Result};

/// File-based implementation of [`ProgressRepository`].
///
/// Progress is kept in a single `progress.json` under the base directory.
/// Writes go to a temporary file that is renamed over the old one, so a
/// crash never leaves a half-written record behind.
#[derive(Debug)]
pub struct FileProgressRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl FileProgressRepository {
    pub const FILE_NAME: &'static str = "progress.json";

    /// Create a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(Self::FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ProgressRecord> {
        if !self.path.exists() {
            return Ok(ProgressRecord::default());
        }
        let bytes = fs::read(&self.path)?;
        let record = serde_json::from_slice(&bytes)?;
        Ok(record)
    }

    fn write(&self, record: &ProgressRecord) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(record)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved progress to {}", self.path.display());
        Ok(())
    }
}

impl ProgressRepository for FileProgressRepository {
    fn load(&self) -> Result<ProgressRecord> {
        self.read()
    }

    fn update(&self, update: &mut dyn FnMut(&mut ProgressRecord)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut record = self.read()?;
        update(&mut record);
        self.write(&record)
    }

    fn as_oracle(&self) -> &dyn ProgressOracle {
        self
    }
}

progress_oracle_via_record!(FileProgressRepository);

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Difficulty, ProgressError};
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty_progress() {
        let dir = TempDir::new().unwrap();
        let repo = FileProgressRepository::new(dir.path()).unwrap();

        assert_eq!(repo.load().unwrap(), ProgressRecord::default());
        assert!(!repo.path().exists());
    }

    #[test]
    fn progress_survives_reopening() {
        let dir = TempDir::new().unwrap();
        {
            let repo = FileProgressRepository::new(dir.path()).unwrap();
            repo.save_completed_difficulty(Difficulty::Medium).unwrap();
            repo.save_total_coins(140).unwrap();
        }

        let reopened = FileProgressRepository::new(dir.path()).unwrap();
        assert_eq!(
            reopened.load_completed_difficulties().unwrap(),
            vec![Difficulty::Medium]
        );
        assert_eq!(reopened.load_total_coins().unwrap(), 140);
    }

    #[test]
    fn write_leaves_no_temporary_file() {
        let dir = TempDir::new().unwrap();
        let repo = FileProgressRepository::new(dir.path()).unwrap();
        repo.save_total_coins(5).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("progress.json")]);
    }

    #[test]
    fn corrupted_file_reports_corruption() {
        let dir = TempDir::new().unwrap();
        let repo = FileProgressRepository::new(dir.path()).unwrap();
        fs::write(repo.path(), b"{ not json").unwrap();

        assert!(matches!(
            repo.load_total_coins(),
            Err(ProgressError::Corrupted(_))
        ));
    }
}
