//! Demo player
//!
//! Plays through the same command queue as a human: it drags the crosshair
//! toward the flare closest to the Earth at a capped speed, clicks once it is
//! on top of it, and raises the shield only when something is about to land.

use glam::Vec2;

use crate::sim::{Command, SimulationState};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Where the simulated hand currently points
    pub pointer: Vec2,
    /// Max crosshair travel per frame (pixels)
    pub pointer_speed: f32,
    /// Raise the shield when the closest flare is this near the core edge
    pub shield_margin: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            pointer_speed: 12.0,
            shield_margin: 40.0,
        }
    }
}

impl Autopilot {
    pub fn new(start: Vec2) -> Self {
        Self {
            pointer: start,
            ..Default::default()
        }
    }

    /// Commands for the upcoming frame
    pub fn plan(&mut self, state: &SimulationState) -> Vec<Command> {
        let mut commands = Vec::new();
        let target = state.arena.target;

        let closest = state.flares.iter().min_by(|a, b| {
            a.pos
                .distance(target)
                .partial_cmp(&b.pos.distance(target))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let Some(flare) = closest else {
            if state.shield.active {
                commands.push(Command::ToggleShield);
            }
            return commands;
        };

        let to_flare = flare.pos - self.pointer;
        let step = to_flare.length().min(self.pointer_speed);
        self.pointer += to_flare.normalize_or_zero() * step;
        commands.push(Command::PointerMove(self.pointer));
        if self.pointer.distance(flare.pos) < flare.radius * 0.5 {
            commands.push(Command::Click(self.pointer));
        }

        let gap = flare.pos.distance(target) - state.arena.core_radius;
        let want_shield = gap < self.shield_margin && state.shield.energy() > 0.0;
        if want_shield != state.shield.active {
            commands.push(Command::ToggleShield);
        }

        commands
    }
}
