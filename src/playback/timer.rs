//! The single pending typing tick
//!
//! A [TypingTimer] owns at most one spawned sleep. Restarting aborts the
//! previous sleep before spawning the new one, and every restart gets a fresh
//! [TimerTicket]. A firing whose ticket is not the current one is stale: it
//! was already in the channel when the timer was restarted or cancelled, and
//! the receiver must drop it.
//!
//! Must be used from within a tokio runtime.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Identifies one timer start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket(u64);

#[derive(Debug, Default)]
pub struct TypingTimer {
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl TypingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending tick, then send `event(ticket)` after `delay`
    pub fn restart<E, F>(
        &mut self,
        delay: Duration,
        sender: UnboundedSender<E>,
        event: F,
    ) -> TimerTicket
    where
        E: Send + 'static,
        F: FnOnce(TimerTicket) -> E + Send + 'static,
    {
        self.cancel();
        let ticket = TimerTicket(self.generation);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver going away just means nobody is listening any more.
            let _ = sender.send(event(ticket));
        }));
        ticket
    }

    /// Abort the pending tick, if any; its ticket becomes stale
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Whether a firing belongs to the most recent restart
    pub fn is_current(&self, ticket: TimerTicket) -> bool {
        self.pending.is_some() && ticket == TimerTicket(self.generation)
    }
}

impl Drop for TypingTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
