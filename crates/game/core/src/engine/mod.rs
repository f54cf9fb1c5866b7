//! Progression state machine.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! external event (directional intent, answer, decision, timeout firing,
//! regeneration request) is a [`Command`] that runs to completion before the
//! next one is accepted. A rejected command leaves the state untouched; an
//! accepted one reports what changed as an ordered list of [`GameEvent`]s.
mod command;
mod economy;
mod errors;
mod events;
mod transition;

pub use command::Command;
pub use errors::{CommandError, ExecuteError};
pub use events::{CoinReason, GameEvent, MoveReason, RunSummary, SoundCue, Warning};

use crate::config::GameConfig;
use crate::env::{GameEnv, OracleError};
use crate::question::{Difficulty, QuestionBank};
use crate::state::GameState;

use transition::Transition;

/// Complete outcome of command execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// State changes in the order they happened.
    pub events: Vec<GameEvent>,
}

/// Game engine that applies commands to a session.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Applies one command.
    ///
    /// Both collaborators must be present in `env`. The nonce advances only
    /// when the command is accepted.
    pub fn execute(
        &mut self,
        env: &GameEnv<'_>,
        command: &Command,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let rng = env.rng()?;
        let progress = env.progress()?;
        let nonce = self.state.nonce;
        let position = self.state.player();

        let mut transition = Transition::new(self.state, rng, progress);
        transition
            .dispatch(command)
            .map_err(|error| ExecuteError::rejected(error, nonce, position))?;
        let events = transition.finish();

        self.state.nonce += 1;
        Ok(ExecutionOutcome { events })
    }
}

/// Creates a session: selects the question pool from `bank` and persisted
/// custom/disabled lists, then generates the first maze.
///
/// Progress read failures degrade to empty lists and are returned as
/// `PersistenceFailed` events.
pub fn start_session(
    env: &GameEnv<'_>,
    bank: &QuestionBank,
    config: GameConfig,
    difficulty: Difficulty,
    game_seed: u64,
) -> Result<(GameState, Vec<GameEvent>), OracleError> {
    let rng = env.rng()?;
    let progress = env.progress()?;
    let mut events = Vec::new();

    let custom = progress.load_custom_questions().unwrap_or_else(|error| {
        events.push(GameEvent::PersistenceFailed(error));
        Vec::new()
    });
    let disabled = progress.load_disabled_ids().unwrap_or_else(|error| {
        events.push(GameEvent::PersistenceFailed(error));
        Vec::new()
    });

    let pool = bank.select_pool(difficulty, &custom, &disabled);
    let dead_end_pool = bank.select_dead_end_pool(difficulty);
    let state = GameState::new(config, difficulty, game_seed, rng, pool, dead_end_pool);

    events.push(GameEvent::MazeRegenerated {
        size: state.grid().size(),
        digest: state.grid().digest(),
    });
    events.push(GameEvent::RemainingChanged {
        remaining: state.session.remaining,
    });
    Ok((state, events))
}
