//! Turn countdown.
//!
//! The countdown is driven from outside: the host loop calls
//! `Session::tick` once per second while a turn is running. Reaching zero
//! only stops the countdown. Ending the turn stays the caller's job.

use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_TIMER_SECONDS;

/// Identifies one started countdown. A new handle is issued on every start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Result of advancing the countdown by one second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown running; nothing changed.
    Idle,
    /// Countdown still running with this many seconds left.
    Running { remaining: u32 },
    /// Countdown just reached zero and stopped itself.
    Expired,
}

/// Cancellable one-second countdown owned by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    handle: Option<TimerHandle>,
    issued: u64,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            remaining: DEFAULT_TIMER_SECONDS,
            handle: None,
            issued: 0,
        }
    }
}

impl Countdown {
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            ..Self::default()
        }
    }

    /// Start counting down from `seconds`, cancelling any live countdown.
    pub fn start(&mut self, seconds: u32) -> TimerHandle {
        self.stop();
        self.issued += 1;
        let handle = TimerHandle(self.issued);
        self.remaining = seconds;
        self.handle = Some(handle);
        handle
    }

    /// Cancel the live countdown. Returns false if none was running.
    pub fn stop(&mut self) -> bool {
        self.handle.take().is_some()
    }

    /// Stop and restore the displayed time to `seconds`.
    pub fn reset(&mut self, seconds: u32) {
        self.stop();
        self.remaining = seconds;
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.handle.is_none() {
            return TickOutcome::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.handle = None;
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining: self.remaining,
            }
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub fn has_time_left(&self) -> bool {
        self.remaining > 0
    }
}
