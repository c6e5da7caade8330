//! Single-slot debounce ownership.
//!
//! At most one timer is outstanding. Scheduling a new one cancels the old
//! handle first, so only the most recent callback can ever fire.

use leptos::prelude::TimeoutHandle;

/// A timer that can be cancelled before it fires.
pub trait Cancel {
    fn cancel(self);
}

impl Cancel for TimeoutHandle {
    fn cancel(self) {
        self.clear();
    }
}

#[derive(Debug)]
pub struct Debouncer<H: Cancel> {
    pending: Option<H>,
}

impl<H: Cancel> Default for Debouncer<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H: Cancel> Debouncer<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending timer with `handle`, cancelling the previous one.
    pub fn schedule(&mut self, handle: H) {
        if let Some(previous) = self.pending.replace(handle) {
            previous.cancel();
        }
    }

    /// Cancel the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
    }

    /// Forget the pending handle once its callback has run.
    pub fn settle(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
