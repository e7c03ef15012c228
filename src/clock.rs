// src/clock.rs

use crate::config::DEFAULT_SPEED;

/// Turns frame timestamps from an external scheduler into tick deltas.
///
/// The first frame is measured from timestamp zero. Deltas are multiplied by
/// `speed`, so a speed of 10 runs simulated time ten times faster than the
/// frames arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    speed: f64,
    previous_ms: f64,
}

impl FrameClock {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            previous_ms: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Delta in milliseconds to pass to `Simulation::tick`. A timestamp
    /// earlier than the previous one yields zero.
    pub fn advance(&mut self, timestamp_ms: f64) -> f64 {
        let delta = (timestamp_ms - self.previous_ms) * self.speed;
        self.previous_ms = timestamp_ms;
        delta.max(0.0)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new(DEFAULT_SPEED)
    }
}
