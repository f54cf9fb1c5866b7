//! Topic-based event bus implementation.

use std::collections::HashMap;

use maze_core::{Difficulty, GameEvent};
use tokio::sync::broadcast;

use super::routing::topic_of;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Player position, maze markings, remaining counter
    Movement,
    /// Coin balance changes
    Economy,
    /// Questions, offers, and warnings shown to the player
    Prompt,
    /// Fire-and-forget sound cues
    Audio,
    /// Session lifecycle and timeouts
    Session,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Movement,
        Topic::Economy,
        Topic::Prompt,
        Topic::Audio,
        Topic::Session,
    ];
}

/// Event wrapper published on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Emitted by the core while executing a command.
    Game(GameEvent),
    /// A session worker came up on a fresh maze.
    SessionStarted {
        difficulty: Difficulty,
        seed: u64,
        size: usize,
    },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(event) => topic_of(event),
            Event::SessionStarted { .. } => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events for topics
/// without subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    movement: broadcast::Sender<Event>,
    economy: broadcast::Sender<Event>,
    prompt: broadcast::Sender<Event>,
    audio: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            movement: broadcast::channel(capacity).0,
            economy: broadcast::channel(capacity).0,
            prompt: broadcast::channel(capacity).0,
            audio: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Movement => &self.movement,
            Topic::Economy => &self.economy,
            Topic::Prompt => &self.prompt,
            Topic::Audio => &self.audio,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
