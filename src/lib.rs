//! Solar Shield - Defend the Earth from solar flares
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flares, shield, difficulty, frame step)
//! - `tuning`: Data-driven game balance
//! - `platform`: Renderer / status / scheduling seams and the `Game` driver
//! - `autopilot`: Demo player that feeds commands like a human would
//! - `renderer`: Canvas 2D drawing (browser only)

pub mod autopilot;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use platform::{FrameFlow, Game, Renderer, StatusSink};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Flare collision/click radius
    pub const FLARE_RADIUS: f32 = 20.0;
    /// Random speed added on top of the base speed at spawn, exclusive upper bound
    pub const FLARE_SPEED_JITTER: f32 = 2.0;

    /// Earth (target core) radius - an unshielded flare inside this ends the run
    pub const CORE_RADIUS: f32 = 100.0;
    /// Shield ring radius around the Earth
    pub const SHIELD_RADIUS: f32 = 130.0;

    /// Full shield energy
    pub const SHIELD_MAX_ENERGY: f32 = 100.0;
    /// Energy drained per frame while the shield is up
    pub const SHIELD_DRAIN_PER_FRAME: f32 = 0.1;

    /// Per-frame spawn chance
    pub const SPAWN_PROBABILITY: f64 = 0.02;
    /// Spawn box relative to the Sun: x in [0, W), y in [-H/2, H/2)
    pub const SPAWN_OFFSET_WIDTH: f32 = 100.0;
    pub const SPAWN_OFFSET_HEIGHT: f32 = 200.0;

    /// Base flare speed at the start of a run (pixels per frame)
    pub const BASE_FLARE_SPEED: f32 = 0.5;
    /// Base speed gained on every difficulty ramp
    pub const SPEED_RAMP_STEP: f32 = 0.5;
    /// Milliseconds between difficulty ramps
    pub const SPEED_RAMP_INTERVAL_MS: f64 = 100_000.0;

    /// Defense reading shown on the HUD
    pub const FULL_DEFENSE: f32 = 100.0;

    /// Default viewport used by the headless runner
    pub const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 720.0);
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` to `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Unit vector for a heading angle (radians)
#[inline]
pub fn heading_to_vec(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Round to one decimal place for HUD display
#[inline]
pub fn round_tenths(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
