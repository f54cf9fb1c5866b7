//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up request/event channels, and
//! exposes a builder-based API for clients to start a session.

use std::sync::Arc;

use maze_content::{ConfigLoader, ContentFactory, QuestionLoader};
use maze_core::{
    Env, GameConfig, GameEnv, GameError, GameEvent, GameState, PcgRng, QuestionBank, RngOracle,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus};
use crate::repository::{FileProgressRepository, InMemoryProgressRepo, ProgressRepository};
use crate::workers::{Request, SessionWorker, TimeoutScheduler};

/// Main runtime that orchestrates one quiz maze session
///
/// Design: Runtime owns the worker and coordinates startup.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    seed: u64,
    /// Events produced while the session was set up.
    startup_events: Vec<GameEvent>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn startup_events(&self) -> &[GameEvent] {
        &self.startup_events
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every other clone of the handle is dropped too.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    bank: Option<QuestionBank>,
    progress: Option<Arc<dyn ProgressRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            bank: None,
            progress: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide a prepared session instead of generating one.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Use `bank` instead of the built-in questions.
    pub fn question_bank(mut self, bank: QuestionBank) -> Self {
        self.bank = Some(bank);
        self
    }

    /// Use a specific progress repository.
    ///
    /// If not provided, a file repository under the save directory is used
    /// when persistence is enabled, an in-memory one otherwise.
    pub fn progress(mut self, repository: impl ProgressRepository + 'static) -> Self {
        self.progress = Some(Arc::new(repository));
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let config = self.config;
        let save_dir = config.resolved_save_dir();
        let content = ContentFactory::new(save_dir.clone());

        let progress: Arc<dyn ProgressRepository> = match self.progress {
            Some(progress) => progress,
            None if config.enable_persistence => Arc::new(FileProgressRepository::new(&save_dir)?),
            None => Arc::new(InMemoryProgressRepo::new()),
        };

        let custom = match &config.custom_questions_path {
            Some(path) => Some(QuestionLoader::load_custom(path)?),
            None if content.custom_questions_path().exists() => {
                Some(content.load_custom_questions()?)
            }
            None => None,
        };
        if let Some(custom) = custom {
            tracing::info!("Loaded {} custom questions", custom.len());
            progress.save_custom_questions(custom)?;
        }

        let (state, startup_events) = match self.state {
            Some(state) => (state, Vec::new()),
            None => {
                let game_config = load_game_config(&config, &content)?;
                let bank = match self.bank {
                    Some(bank) => bank,
                    None => content.load_bank()?,
                };
                let seed = config.seed.unwrap_or_else(rand::random);

                let rng: &dyn RngOracle = &PcgRng;
                let env: GameEnv<'_> = Env::with_all(rng, progress.as_oracle());
                maze_core::start_session(&env, &bank, game_config, config.difficulty, seed)?
            }
        };
        let seed = state.game_seed;
        for event in &startup_events {
            if let GameEvent::PersistenceFailed(failure) = event {
                tracing::warn!(code = failure.error_code(), error = %failure, "Progress store failed");
            }
        }

        let (request_tx, request_rx) = mpsc::channel::<Request>(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let timeouts = TimeoutScheduler::new(config.tick, request_tx.downgrade());
        let handle = RuntimeHandle::new(request_tx, event_bus.clone());

        tracing::info!(
            difficulty = %state.difficulty,
            seed,
            size = state.grid().size(),
            remaining = state.session.remaining,
            "Session started"
        );
        event_bus.publish(Event::SessionStarted {
            difficulty: state.difficulty,
            seed,
            size: state.grid().size(),
        });

        let worker = SessionWorker::new(state, progress, request_rx, timeouts, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            seed,
            startup_events,
            worker_handle,
        })
    }
}

/// Explicit TOML path first, then `config.toml` in the save directory,
/// then the configuration already in `config`. A timeout override applies
/// on top of whichever was picked.
fn load_game_config(config: &RuntimeConfig, content: &ContentFactory) -> Result<GameConfig> {
    let mut game_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None if content.config_path().exists() => content.load_config()?,
        None => config.game_config.clone(),
    };
    if let Some(ticks) = config.question_timeout {
        game_config.question_timeout = ticks;
    }
    Ok(game_config)
}
