//! Frame Clock
//!
//! Turns raw host frame deltas into the elapsed-time sample handed to
//! [`Chain::tick`](crate::Chain::tick). Long frames are clamped to `max_step` so a
//! stall (debugger pause, window drag) cannot blow through every wait at once, and the
//! clamped delta is then scaled by `time_scale` for slow-motion or fast-forward.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Clock settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Multiplier applied to every clamped delta
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,

    /// Largest raw delta accepted per frame, in seconds
    #[serde(default = "default_max_step")]
    pub max_step: f64,
}

fn default_time_scale() -> f64 {
    1.0
}

fn default_max_step() -> f64 {
    0.05
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
            max_step: default_max_step(),
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(format!(
                "time_scale must be a non-negative number, got {}",
                self.time_scale
            ));
        }
        if !self.max_step.is_finite() || self.max_step <= 0.0 {
            return Err(format!(
                "max_step must be a positive number, got {}",
                self.max_step
            ));
        }
        Ok(())
    }
}

/// Accumulating frame clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    config: ClockConfig,
    time: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            time: 0.0,
            frames: 0,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Elapsed sample for a raw delta, without advancing the clock.
    pub fn sample(&self, raw_delta: f64) -> f64 {
        raw_delta.max(0.0).min(self.config.max_step) * self.config.time_scale
    }

    /// Advance by one frame of `raw_delta` seconds and return the elapsed sample.
    pub fn tick(&mut self, raw_delta: f64) -> f64 {
        let elapsed = self.sample(raw_delta);
        self.time += elapsed;
        self.frames += 1;
        elapsed
    }

    /// [`FrameClock::tick`] for hosts that measure frames with `Instant`.
    pub fn tick_duration(&mut self, raw_delta: Duration) -> f64 {
        self.tick(raw_delta.as_secs_f64())
    }

    /// Total scaled time accumulated so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}
