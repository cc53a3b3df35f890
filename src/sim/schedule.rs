//! Spawn schedule
//!
//! One periodic task at `1000 / rate` ms. Changing the rate cancels the task
//! and installs a new one that starts counting from the moment of the change;
//! an in-flight wait is discarded, never shortened or stretched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSchedule {
    rate: u32,
    /// Bumped every time the task is replaced
    generation: u64,
    /// When the current task was installed (ms)
    started_at_ms: f64,
    /// Firings of the current task so far
    fired: u64,
}

impl SpawnSchedule {
    /// Install the first task at `now_ms`
    pub fn new(rate: u32, now_ms: f64) -> Self {
        let rate = rate.max(1);
        Self {
            rate,
            generation: 0,
            started_at_ms: now_ms,
            fired: 0,
        }
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Absolute time (ms) of the next firing
    ///
    /// Computed from the install time rather than accumulated, so firings
    /// never drift.
    pub fn next_due_ms(&self) -> f64 {
        self.started_at_ms + ((self.fired + 1) * 1000) as f64 / self.rate as f64
    }

    /// Milliseconds between firings
    pub fn interval_ms(&self) -> f64 {
        interval_for(self.rate)
    }

    /// Cancel the current task and create a new one at the new rate
    pub fn reset(&mut self, rate: u32, now_ms: f64) {
        self.rate = rate.max(1);
        self.generation += 1;
        self.started_at_ms = now_ms;
        self.fired = 0;
    }

    /// Number of firings due up to `now_ms`
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let mut due = 0;
        while now_ms >= self.next_due_ms() {
            self.fired += 1;
            due += 1;
        }
        due
    }
}

#[inline]
fn interval_for(rate: u32) -> f64 {
    1000.0 / rate as f64
}
