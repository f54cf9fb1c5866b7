//! Data-driven question content and loaders.
//!
//! This crate houses the built-in question bank and provides loaders for
//! RON/TOML data files:
//! - Built-in questions, four options each with a letter answer (RON, embedded)
//! - Dead-end questions with free-text answers (RON, embedded)
//! - Custom question files authored by players (RON)
//! - Game configuration (TOML)
//!
//! Content is consumed by the runtime when a session starts and never appears
//! in game state except as the session's question pool.

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use builtin::builtin_bank;
#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, QuestionCatalog, QuestionLoader};
