//! Cancellable deferred callbacks.
//!
//! Every schedule hands out a [`TimerToken`] stamped with the engine's
//! current epoch. Any transition that stops or reschedules advancement bumps
//! the epoch, which turns every outstanding token stale. Firing a stale token
//! does nothing, so a timer that was already in flight when playback paused
//! cannot advance the cursor.

use std::time::Duration;

/// Proof that a particular schedule is still the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub(crate) epoch: u64,
}

/// A request to call `fire(token)` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub token: TimerToken,
    pub delay: Duration,
}

/// Epoch counter owned by the engine.
#[derive(Debug, Default)]
pub(crate) struct Epoch(u64);

impl Epoch {
    /// Invalidate outstanding tokens and issue a fresh one.
    pub(crate) fn issue(&mut self) -> TimerToken {
        self.0 += 1;
        TimerToken { epoch: self.0 }
    }

    /// Invalidate outstanding tokens.
    pub(crate) fn cancel(&mut self) {
        self.0 += 1;
    }

    pub(crate) fn is_current(&self, token: TimerToken) -> bool {
        token.epoch == self.0
    }
}
