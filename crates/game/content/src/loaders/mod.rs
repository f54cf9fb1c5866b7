//! Content loaders for reading game data from files.
//!
//! Question catalogs are RON, configuration is TOML. Both map directly onto
//! `maze-core` types through their serde derives.

pub mod config;
pub mod factory;
pub mod questions;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use questions::{QuestionCatalog, QuestionLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
