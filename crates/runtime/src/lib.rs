//! Runtime orchestration for quiz maze sessions.
//!
//! This crate embeds the deterministic core in a single session worker and
//! wires it to the outside world: the safety-timeout scheduler, progress
//! repositories, and a topic-based event bus. Consumers build a [`Runtime`],
//! then drive it and observe it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists cross-session progress
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{CommandOutcome, PhaseView, Result, RuntimeError, RuntimeHandle, SessionSnapshot};
pub use config::RuntimeConfig;
pub use events::{Event, EventBus, Topic, topic_of};
pub use repository::{
    FileProgressRepository, InMemoryProgressRepo, ProgressRecord, ProgressRepository,
    RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder};
