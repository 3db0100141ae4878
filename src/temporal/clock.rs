//! Simulated clock with Running/Paused states.

use serde::{Deserialize, Serialize};

/// Simulated time in abstract years.
///
/// Advances by `delta_real_seconds × time_speed` while running. The clock never
/// moves backwards except through [`SimulatedClock::reset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedClock {
    current_time: f64,
    running: bool,
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            running: true,
        }
    }
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Flips between Running and Paused, returning the new running state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Advances the clock if running. Returns the simulated years added.
    pub fn tick(&mut self, delta_real_seconds: f64, time_speed: f64) -> f64 {
        if !self.running {
            return 0.0;
        }
        let step = delta_real_seconds * time_speed;
        if !step.is_finite() || step <= 0.0 {
            return 0.0;
        }
        self.current_time += step;
        step
    }

    /// Jumps ahead regardless of run state. Negative or non-finite amounts are ignored.
    pub fn fast_forward(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.current_time += amount;
        }
    }

    /// Returns to time zero. The run state is left untouched.
    pub fn reset(&mut self) {
        self.current_time = 0.0;
    }
}
