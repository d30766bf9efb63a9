//! Full-outage timers
//!
//! Two nested accumulators, reset together whenever any peer answers. The repeat
//! timer only starts on the tick after the outage has lasted the grace period.

use std::time::Duration;

use crate::config::OutageConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutageTracker {
    elapsed_since_last_success: Duration,
    elapsed_since_last_notification: Duration,
}

impl OutageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one tick with no peer answering. Returns true when the outage
    /// notification is due on this tick.
    pub fn record_outage(&mut self, tick: Duration, config: &OutageConfig) -> bool {
        let mut notify = false;

        if self.elapsed_since_last_success >= Duration::from_secs(config.grace_seconds) {
            self.elapsed_since_last_notification += tick;
            if self.elapsed_since_last_notification >= Duration::from_secs(config.repeat_seconds) {
                notify = true;
                self.elapsed_since_last_notification = Duration::ZERO;
            }
        }

        self.elapsed_since_last_success += tick;
        notify
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed_since_last_success(&self) -> Duration {
        self.elapsed_since_last_success
    }

    pub fn is_in_outage(&self) -> bool {
        !self.elapsed_since_last_success.is_zero()
    }
}
