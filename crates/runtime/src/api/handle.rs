//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use std::collections::HashMap;

use maze_core::{Command, CommandError, Direction, GameEvent};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use super::snapshot::SessionSnapshot;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Request;

/// What a command did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command was accepted; events are in the order they happened.
    Applied { events: Vec<GameEvent> },
    /// The command was not applicable and nothing changed.
    Ignored(CommandError),
}

impl CommandOutcome {
    pub fn events(&self) -> &[GameEvent] {
        match self {
            CommandOutcome::Applied { events } => events,
            CommandOutcome::Ignored(_) => &[],
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied { .. })
    }
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    requests: mpsc::Sender<Request>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(requests: mpsc::Sender<Request>, event_bus: EventBus) -> Self {
        Self {
            requests,
            event_bus,
        }
    }

    /// Apply a command once every earlier command has finished.
    pub async fn execute(&self, command: Command) -> Result<CommandOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.requests
            .send(Request::Execute {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Directional intent.
    pub async fn step(&self, direction: Direction) -> Result<CommandOutcome> {
        self.execute(Command::step(direction)).await
    }

    pub async fn answer(&self, raw: impl Into<String>) -> Result<CommandOutcome> {
        self.execute(Command::answer(raw)).await
    }

    pub async fn resolve_override(&self, accept: bool) -> Result<CommandOutcome> {
        self.execute(Command::ResolveOverride { accept }).await
    }

    pub async fn resolve_debt_relief(&self, accept: bool) -> Result<CommandOutcome> {
        self.execute(Command::ResolveDebtRelief { accept }).await
    }

    pub async fn regenerate(&self) -> Result<CommandOutcome> {
        self.execute(Command::Regenerate).await
    }

    /// Query the current session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.requests
            .send(Request::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Movement` - Player moves, maze markings, remaining counter
    /// - `Topic::Economy` - Balance changes
    /// - `Topic::Prompt` - Questions, offers, warnings
    /// - `Topic::Audio` - Sound cues
    /// - `Topic::Session` - Timeouts and completion
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use maze_runtime::Topic;
    ///
    /// let mut prompts = handle.subscribe(Topic::Prompt);
    /// while let Ok(event) = prompts.recv().await {
    ///     // Show the question or offer
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
