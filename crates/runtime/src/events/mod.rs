//! Topic-based event bus for runtime events.
//!
//! Core events are routed to the topic of the collaborator that consumes
//! them, so a renderer, a prompt, and an audio player can each subscribe only
//! to what they need.

mod bus;
mod routing;

pub use bus::{Event, EventBus, Topic};
pub use routing::topic_of;
