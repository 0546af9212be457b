//! Deferred actions that wait for a short settle delay
//!
//! A [`SettleTimer`] owns at most one pending action. The action only fires
//! from [`SettleTimer::poll`], so dropping the timer (or its owner) cancels it
//! and nothing can run after disposal.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Scheduled<A> {
    due: Instant,
    action: A,
}

/// A single-slot, cancellable deferred action
#[derive(Debug)]
pub struct SettleTimer<A> {
    pending: Option<Scheduled<A>>,
}

impl<A> Default for SettleTimer<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> SettleTimer<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire `delay` after `now`, replacing any pending one
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: A) {
        if self.pending.is_some() {
            tracing::trace!("replacing pending settle action");
        }
        self.pending = Some(Scheduled {
            due: now + delay,
            action,
        });
    }

    /// Drop the pending action, returning it if there was one
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|scheduled| scheduled.action)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending action if it is due at `now`
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|scheduled| now >= scheduled.due);
        if due {
            self.cancel()
        } else {
            None
        }
    }
}
