//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per host frame
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod command;
pub mod difficulty;
pub mod flare;
pub mod shield;
pub mod spawner;
pub mod state;
pub mod tick;

pub use command::{Command, CommandQueue};
pub use difficulty::DifficultyClock;
pub use flare::{CollisionEvent, Flare};
pub use shield::Shield;
pub use spawner::Spawner;
pub use state::{Arena, GameEvent, GameStatus, SimulationState};
pub use tick::{FrameReport, tick};
