//! Content factory for loading content from a data directory.

use std::path::{Path, PathBuf};

use maze_core::{GameConfig, Question, QuestionBank};

use crate::builtin::builtin_bank;
use crate::loaders::{ConfigLoader, LoadResult, QuestionLoader};

/// Content factory that loads optional overrides from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── questions/
///     └── custom.ron
/// ```
///
/// Missing files fall back to the embedded defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or the defaults if absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load custom questions from `questions/custom.ron`, or none if absent.
    pub fn load_custom_questions(&self) -> LoadResult<Vec<Question>> {
        let path = self.custom_questions_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        QuestionLoader::load_custom(&path)
    }

    /// The embedded question bank.
    pub fn load_bank(&self) -> LoadResult<QuestionBank> {
        builtin_bank()
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn custom_questions_path(&self) -> PathBuf {
        self.data_dir.join("questions").join("custom.ron")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.load_custom_questions().unwrap().is_empty());
        assert!(!factory.load_bank().unwrap().builtin().is_empty());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "completion_bonus = 75\n").unwrap();

        let config = ContentFactory::new(dir.path()).load_config().unwrap();
        assert_eq!(config.completion_bonus, 75);
    }
}
