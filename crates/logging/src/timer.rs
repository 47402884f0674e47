//! crates/logging/src/timer.rs
//! Presence-keyed elapsed-time measurements.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Named timers owned by one logger instance.
///
/// The registry is a pure toggle: a name is either running or absent.
/// Stopping a timer that was never started simply starts it; there is no
/// distinguished error state.
#[derive(Debug, Default)]
pub(crate) struct TimerRegistry {
    running: Mutex<HashMap<String, Instant>>,
}

impl TimerRegistry {
    /// Toggles the named timer, returning the elapsed time on the stop edge.
    pub fn toggle(&self, name: &str) -> Option<Duration> {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(started) = running.remove(name) {
            Some(started.elapsed())
        } else {
            running.insert(name.to_string(), Instant::now());
            None
        }
    }

    /// Reports whether the named timer is currently running.
    pub fn is_running(&self, name: &str) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}
