//! Session worker that owns the authoritative [`maze_core::GameState`].
//!
//! Receives requests from [`RuntimeHandle`], executes them via
//! [`maze_core::GameEngine`] strictly in arrival order, and publishes every
//! resulting [`GameEvent`] on the bus.
//!
//! [`RuntimeHandle`]: crate::api::RuntimeHandle

use std::sync::Arc;

use maze_core::{
    Command, Env, ExecuteError, GameEngine, GameEnv, GameError, GameEvent, GameState, PcgRng,
    RngOracle, TimeoutTicket,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::api::{CommandOutcome, Result, SessionSnapshot};
use crate::events::{Event, EventBus};
use crate::repository::ProgressRepository;

use super::TimeoutScheduler;

/// Requests that can be sent to the session worker
pub enum Request {
    /// Apply a player command.
    Execute {
        command: Command,
        reply: oneshot::Sender<Result<CommandOutcome>>,
    },
    /// A safety timer elapsed.
    Fire { ticket: TimeoutTicket },
    /// Read-only copy of the current session.
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Background task that processes session requests.
pub struct SessionWorker {
    state: GameState,
    rng: PcgRng,
    progress: Arc<dyn ProgressRepository>,
    requests: mpsc::Receiver<Request>,
    timeouts: TimeoutScheduler,
    event_bus: EventBus,
}

impl SessionWorker {
    /// Creates a new session worker.
    pub fn new(
        state: GameState,
        progress: Arc<dyn ProgressRepository>,
        requests: mpsc::Receiver<Request>,
        timeouts: TimeoutScheduler,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state,
            rng: PcgRng,
            progress,
            requests,
            timeouts,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.handle_request(request);
        }
        self.timeouts.clear();
        debug!(target: "runtime::worker", "Session worker stopped");
    }

    fn handle_request(&mut self, request: Request) {
        match request {
            Request::Execute { command, reply } => {
                let result = self.execute(command);
                let _ = reply.send(result);
            }
            Request::Fire { ticket } => {
                self.timeouts.fired(ticket);
                if let Err(error) = self.execute(Command::Timeout { ticket }) {
                    error!(target: "runtime::worker", %ticket, error = %error, "Timeout failed");
                }
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(SessionSnapshot::from_state(&self.state));
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<CommandOutcome> {
        let rng: &dyn RngOracle = &self.rng;
        let env: GameEnv<'_> = Env::with_all(rng, self.progress.as_oracle());

        let result = GameEngine::new(&mut self.state).execute(&env, &command);
        match result {
            Ok(outcome) => {
                self.dispatch(&outcome.events);
                Ok(CommandOutcome::Applied {
                    events: outcome.events,
                })
            }
            Err(ExecuteError::Rejected { error, context }) => {
                debug!(
                    target: "runtime::worker",
                    command = command.as_str(),
                    code = error.error_code(),
                    nonce = context.nonce,
                    error = %error,
                    "Command ignored"
                );
                Ok(CommandOutcome::Ignored(error))
            }
            Err(ExecuteError::Oracle(error)) => {
                error!(target: "runtime::worker", error = %error, "Collaborator missing");
                Err(error.into())
            }
        }
    }

    /// Reacts to runtime-relevant events, then publishes all of them in order.
    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::TimeoutArmed { ticket, ticks } => self.timeouts.arm(*ticket, *ticks),
                GameEvent::TimeoutCancelled { ticket } => self.timeouts.cancel(*ticket),
                GameEvent::ConsistencyViolation { from } => {
                    error!(
                        target: "runtime::worker",
                        %from,
                        digest = %hex::encode(self.state.grid().digest()),
                        "Exit unreachable from player position"
                    );
                }
                GameEvent::PersistenceFailed(failure) => {
                    warn!(
                        target: "runtime::worker",
                        code = failure.error_code(),
                        error = %failure,
                        "Progress store failed"
                    );
                }
                GameEvent::MazeRegenerated { size, digest } => {
                    info!(
                        target: "runtime::worker",
                        size,
                        digest = %hex::encode(digest),
                        generation = self.state.maze.generation,
                        "Maze regenerated"
                    );
                }
                GameEvent::GameCompleted(summary) => {
                    info!(
                        target: "runtime::worker",
                        difficulty = %summary.difficulty,
                        balance = summary.balance,
                        total = summary.total_coins,
                        "Session complete"
                    );
                }
                _ => {}
            }
            self.event_bus.publish(Event::Game(event.clone()));
        }
        debug!(
            target: "runtime::worker",
            nonce = self.state.nonce,
            pending_timeouts = self.timeouts.pending(),
            "Command applied"
        );
    }
}
