//! Difficulty ramp: new flares get faster as the run goes on

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyClock {
    /// Host timestamp (ms) of the last ramp, or of the run start
    pub last_ramp_ms: f64,
    /// Base speed handed to newly spawned flares
    pub base_speed: f32,
    pub ramp_interval_ms: f64,
    pub ramp_step: f32,
}

impl DifficultyClock {
    pub fn new(start_ms: f64, base_speed: f32, ramp_interval_ms: f64, ramp_step: f32) -> Self {
        Self {
            last_ramp_ms: start_ms,
            base_speed,
            ramp_interval_ms,
            ramp_step,
        }
    }

    /// Raise the base speed if more than one interval has passed.
    /// Returns true when a ramp happened.
    pub fn maybe_ramp(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_ramp_ms > self.ramp_interval_ms {
            self.base_speed += self.ramp_step;
            self.last_ramp_ms = now_ms;
            log::info!("Flare base speed ramped to {:.1}", self.base_speed);
            return true;
        }
        false
    }
}
