//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the game state and executes commands one at a
//! time; the timeout scheduler arms and cancels the safety timers it asks
//! for.

mod session;
mod timeout;

pub use session::{Request, SessionWorker};
pub use timeout::TimeoutScheduler;
