//! Safety timers for open questions.

use std::collections::HashMap;
use std::time::Duration;

use maze_core::TimeoutTicket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::session::Request;

/// Spawns one deferred task per armed ticket.
///
/// A task only holds a weak sender, so pending timers never keep the session
/// worker alive after every handle is gone.
pub struct TimeoutScheduler {
    tick: Duration,
    requests: mpsc::WeakSender<Request>,
    pending: HashMap<TimeoutTicket, JoinHandle<()>>,
}

impl TimeoutScheduler {
    pub fn new(tick: Duration, requests: mpsc::WeakSender<Request>) -> Self {
        Self {
            tick,
            requests,
            pending: HashMap::new(),
        }
    }

    /// Fires `Request::Fire { ticket }` after `ticks` core ticks.
    pub fn arm(&mut self, ticket: TimeoutTicket, ticks: u64) {
        let delay = self.tick.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX));
        let requests = self.requests.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(requests) = requests.upgrade() {
                let _ = requests.send(Request::Fire { ticket }).await;
            }
        });

        if let Some(previous) = self.pending.insert(ticket, task) {
            previous.abort();
        }
        tracing::debug!(target: "runtime::timeout", %ticket, ?delay, "Timeout armed");
    }

    pub fn cancel(&mut self, ticket: TimeoutTicket) {
        if let Some(task) = self.pending.remove(&ticket) {
            task.abort();
            tracing::debug!(target: "runtime::timeout", %ticket, "Timeout cancelled");
        }
    }

    /// Forgets a timer whose task already delivered its request.
    pub fn fired(&mut self, ticket: TimeoutTicket) {
        self.pending.remove(&ticket);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }
}

impl Drop for TimeoutScheduler {
    fn drop(&mut self) {
        self.clear();
    }
}
