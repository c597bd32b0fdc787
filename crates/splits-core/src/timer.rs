//! Pause/resume elapsed-time accumulator.

use chrono::{DateTime, TimeDelta, Utc};

/// Elapsed-time accumulator toggled between running and paused.
///
/// While running, elapsed time is `toggle_timer + (now - toggle_time)`.
/// Every toggle folds the running span into `toggle_timer`, so the total is
/// correct regardless of how many times the timer was started and stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    running: bool,
    toggle_time: DateTime<Utc>,
    toggle_timer: TimeDelta,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            running: false,
            toggle_time: DateTime::<Utc>::UNIX_EPOCH,
            toggle_timer: TimeDelta::zero(),
        }
    }
}

impl Timer {
    /// Whether the timer is currently accumulating.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time as of `now`.
    pub fn current(&self, now: DateTime<Utc>) -> TimeDelta {
        if self.running {
            // The wall clock may step backwards; never lose accumulated time.
            self.toggle_timer + (now - self.toggle_time).max(TimeDelta::zero())
        } else {
            self.toggle_timer
        }
    }

    /// Flips running state, snapshotting elapsed time under the old state.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.toggle_timer = self.current(now);
        self.toggle_time = now;
        self.running = !self.running;
    }

    /// Stops the timer and zeroes the accumulator.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
