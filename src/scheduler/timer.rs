//! Periodic timers driven by elapsed time.
//!
//! A `PeriodicTimer` does not run on its own. The owner feeds it elapsed
//! time through `advance` and receives the number of whole periods that
//! completed. Arming always restarts the period, so a timer can never be
//! armed twice.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodicTimer {
    interval: Duration,
    accumulated: Duration,
    armed: bool,
}

impl PeriodicTimer {
    /// A disarmed timer.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            armed: false,
        }
    }

    /// Arm the timer, discarding any partial period.
    pub fn arm(&mut self) {
        self.accumulated = Duration::ZERO;
        self.armed = true;
    }

    /// Disarm the timer. Safe to call when already disarmed.
    pub fn disarm(&mut self) {
        self.accumulated = Duration::ZERO;
        self.armed = false;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feed elapsed time. Returns how many periods completed.
    ///
    /// A disarmed timer or a zero interval never fires.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.armed || self.interval.is_zero() {
            return 0;
        }
        self.accumulated += elapsed;
        let mut fired = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            fired += 1;
        }
        fired
    }
}
