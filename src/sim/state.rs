//! Game state and core simulation types
//!
//! Everything one run needs lives in [`SimulationState`]: no globals, so any
//! number of runs can be stepped side by side in tests.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::command::Command;
use super::difficulty::DifficultyClock;
use super::flare::Flare;
use super::shield::Shield;
use super::spawner::Spawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    /// Terminal: the Earth was struck
    Over,
}

/// Things that happened during a frame, for logging and the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FlareSpawned { id: u32 },
    FlaresDestroyed { count: usize },
    ShieldToggled { active: bool },
    ShieldDepleted,
    SpeedRamped { base_speed: f32 },
    TargetStruck { flare_id: u32 },
}

/// Fixed play-field geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Sun position, where flares are born
    pub source: Vec2,
    /// Earth position, the defended point
    pub target: Vec2,
    pub core_radius: f32,
    pub shield_radius: f32,
}

impl Arena {
    /// Sun on the left, Earth on the right, both vertically centered
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            source: Vec2::new(width / 13.0, height / 2.0),
            target: Vec2::new(width / 1.2, height / 2.0),
            core_radius: CORE_RADIUS,
            shield_radius: SHIELD_RADIUS,
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::from_viewport(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1)
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    /// Live flares, ascending id
    pub flares: Vec<Flare>,
    pub shield: Shield,
    pub clock: DifficultyClock,
    pub spawner: Spawner,
    pub status: GameStatus,
    /// HUD defense reading (never decays, see DESIGN.md)
    pub defense: f32,
    /// Last known pointer position (crosshair)
    pub pointer: Vec2,
    /// Frame counter
    pub frame: u64,
    /// Events produced since the last frame report
    pub(crate) pending_events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationState {
    /// New run with default tuning
    pub fn new(seed: u64, arena: Arena, start_ms: f64) -> Self {
        Self::with_tuning(seed, arena, start_ms, &Tuning::default())
    }

    /// The arena is used exactly as given, radii included
    pub fn with_tuning(seed: u64, arena: Arena, start_ms: f64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            flares: Vec::new(),
            shield: Shield::new(tuning.shield_max_energy, tuning.shield_drain_per_frame),
            clock: DifficultyClock::new(
                start_ms,
                tuning.base_flare_speed,
                tuning.speed_ramp_interval_ms,
                tuning.speed_ramp_step,
            ),
            spawner: Spawner {
                probability: tuning.spawn_probability,
                offset: Vec2::new(tuning.spawn_offset_width, tuning.spawn_offset_height),
                speed_jitter: tuning.flare_speed_jitter,
            },
            status: GameStatus::Running,
            defense: FULL_DEFENSE,
            pointer: Vec2::ZERO,
            frame: 0,
            pending_events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// Move to `Over`. Idempotent; there is no way back.
    pub fn end(&mut self, flare_id: u32) {
        if self.status == GameStatus::Over {
            return;
        }
        self.status = GameStatus::Over;
        self.pending_events.push(GameEvent::TargetStruck { flare_id });
        log::info!(
            "Earth struck by flare {} on frame {} ({} flares live)",
            flare_id,
            self.frame,
            self.flares.len()
        );
    }

    /// Spawn a flare right now, bypassing the per-frame roll
    pub fn spawn_flare(&mut self) -> u32 {
        let id = self.next_entity_id();
        let flare = self
            .spawner
            .spawn(&mut self.rng, self.arena.source, self.clock.base_speed, id);
        self.push_flare(flare);
        id
    }

    /// Per-frame spawn roll. Returns the new flare's id, if any.
    pub fn roll_spawn(&mut self) -> Option<u32> {
        let next_id = &mut self.next_id;
        let flare = self.spawner.maybe_spawn(
            &mut self.rng,
            self.arena.source,
            self.clock.base_speed,
            || {
                let id = *next_id;
                *next_id += 1;
                id
            },
        )?;
        let id = flare.id;
        self.push_flare(flare);
        Some(id)
    }

    /// Add a flare (keeps id order)
    pub fn push_flare(&mut self, flare: Flare) {
        log::debug!(
            "Flare {} spawned at ({:.0}, {:.0}) speed {:.2}",
            flare.id,
            flare.pos.x,
            flare.pos.y,
            flare.speed()
        );
        self.pending_events.push(GameEvent::FlareSpawned { id: flare.id });
        self.flares.push(flare);
    }

    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Destroy every flare under the pointer. Survivors keep their order.
    /// Returns how many were destroyed.
    pub fn on_click(&mut self, pos: Vec2) -> usize {
        self.pointer = pos;
        let before = self.flares.len();
        self.flares.retain(|f| !f.is_hit(pos));
        let count = before - self.flares.len();
        if count > 0 {
            log::debug!("Click at ({:.0}, {:.0}) destroyed {} flare(s)", pos.x, pos.y, count);
            self.pending_events.push(GameEvent::FlaresDestroyed { count });
        }
        count
    }

    pub fn on_toggle_shield(&mut self) -> bool {
        let active = self.shield.toggle();
        log::info!(
            "Shield {} ({:.1}% energy)",
            if active { "raised" } else { "lowered" },
            self.shield.display_energy()
        );
        self.pending_events.push(GameEvent::ShieldToggled { active });
        active
    }

    /// Apply a queued input command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PointerMove(pos) => self.on_pointer_move(pos),
            Command::Click(pos) => {
                self.on_click(pos);
            }
            Command::ToggleShield => {
                self.on_toggle_shield();
            }
        }
    }

    pub(crate) fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
