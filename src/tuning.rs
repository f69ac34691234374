//! Data-driven game balance
//!
//! Arena geometry (Earth and shield radii) belongs to
//! [`crate::sim::Arena`], not to tuning.
//!
//! Every knob defaults to the matching constant in [`crate::consts`]. A JSON
//! file only needs the keys it wants to change:
//!
//! ```json
//! { "spawn_probability": 0.05, "shield_drain_per_frame": 0.2 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    pub spawn_probability: f64,
    pub spawn_offset_width: f32,
    pub spawn_offset_height: f32,
    pub flare_speed_jitter: f32,

    // === Difficulty ===
    pub base_flare_speed: f32,
    pub speed_ramp_step: f32,
    pub speed_ramp_interval_ms: f64,

    // === Shield ===
    pub shield_max_energy: f32,
    pub shield_drain_per_frame: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_probability: SPAWN_PROBABILITY,
            spawn_offset_width: SPAWN_OFFSET_WIDTH,
            spawn_offset_height: SPAWN_OFFSET_HEIGHT,
            flare_speed_jitter: FLARE_SPEED_JITTER,

            base_flare_speed: BASE_FLARE_SPEED,
            speed_ramp_step: SPEED_RAMP_STEP,
            speed_ramp_interval_ms: SPEED_RAMP_INTERVAL_MS,

            shield_max_energy: SHIELD_MAX_ENERGY,
            shield_drain_per_frame: SHIELD_DRAIN_PER_FRAME,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(field: &'static str, value: f64, ok: bool) -> Result<(), TuningError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, value })
            }
        }

        let p = self.spawn_probability;
        check("spawn_probability", p, (0.0..=1.0).contains(&p))?;
        check("base_flare_speed", self.base_flare_speed as f64, self.base_flare_speed > 0.0)?;
        check("flare_speed_jitter", self.flare_speed_jitter as f64, self.flare_speed_jitter >= 0.0)?;
        check("speed_ramp_step", self.speed_ramp_step as f64, self.speed_ramp_step >= 0.0)?;
        check(
            "speed_ramp_interval_ms",
            self.speed_ramp_interval_ms,
            self.speed_ramp_interval_ms >= 0.0,
        )?;
        check("shield_max_energy", self.shield_max_energy as f64, self.shield_max_energy >= 0.0)?;
        check(
            "shield_drain_per_frame",
            self.shield_drain_per_frame as f64,
            self.shield_drain_per_frame > 0.0,
        )?;
        check("spawn_offset_width", self.spawn_offset_width as f64, self.spawn_offset_width >= 0.0)?;
        check(
            "spawn_offset_height",
            self.spawn_offset_height as f64,
            self.spawn_offset_height >= 0.0,
        )?;
        Ok(())
    }
}
