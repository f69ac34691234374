//! Earth shield with a draining energy meter

use serde::{Deserialize, Serialize};

use crate::consts::{SHIELD_DRAIN_PER_FRAME, SHIELD_MAX_ENERGY};
use crate::round_tenths;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub active: bool,
    /// Remaining energy, [0, max]
    energy: f32,
    max_energy: f32,
    drain_per_frame: f32,
    /// Frames drained since the run started
    drained_frames: u32,
}

impl Default for Shield {
    fn default() -> Self {
        Self::new(SHIELD_MAX_ENERGY, SHIELD_DRAIN_PER_FRAME)
    }
}

impl Shield {
    pub fn new(max_energy: f32, drain_per_frame: f32) -> Self {
        Self {
            active: false,
            energy: max_energy.max(0.0),
            max_energy: max_energy.max(0.0),
            drain_per_frame,
            drained_frames: 0,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Flip the shield. Raising it with an empty meter is allowed; the next
    /// drain tick drops it again.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        if self.active && self.energy <= 0.0 {
            log::debug!("Shield raised with an empty meter");
        }
        self.active
    }

    /// Drain one frame of energy. Returns true if the shield ran dry this tick.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.drained_frames += 1;
        // Recomputed from the frame count so repeated f32 subtraction can't drift
        let drain = self.drain_per_frame as f64;
        let remaining = self.max_energy as f64 - drain * self.drained_frames as f64;
        if remaining <= drain * 1e-3 {
            self.energy = 0.0;
            self.active = false;
            return true;
        }
        self.energy = remaining as f32;
        false
    }

    /// Meter reading for the HUD
    pub fn display_energy(&self) -> f32 {
        round_tenths(self.energy.max(0.0))
    }

    /// Meter reading as a percentage of full charge
    pub fn energy_percent(&self) -> f32 {
        if self.max_energy <= 0.0 {
            return 0.0;
        }
        round_tenths(self.energy.max(0.0) / self.max_energy * 100.0)
    }
}
