//! Per-frame simulation step
//!
//! Order within a frame: queued input, difficulty ramp, spawn roll, flare
//! motion (first strike ends the run), shield drain, report.

use serde::{Deserialize, Serialize};

use super::command::CommandQueue;
use super::state::{GameEvent, GameStatus, SimulationState};

/// What the HUD needs after a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame: u64,
    pub status: GameStatus,
    pub defense_percent: f32,
    pub shield_energy_percent: f32,
    pub shield_active: bool,
    pub flare_count: usize,
    pub base_speed: f32,
    pub events: Vec<GameEvent>,
}

impl FrameReport {
    pub fn of(state: &SimulationState, events: Vec<GameEvent>) -> Self {
        Self {
            frame: state.frame,
            status: state.status,
            defense_percent: state.defense,
            shield_energy_percent: state.shield.energy_percent(),
            shield_active: state.shield.active,
            flare_count: state.flares.len(),
            base_speed: state.clock.base_speed,
            events,
        }
    }

    /// HUD line for the defense readout
    pub fn defense_text(&self) -> String {
        format!("Defense: {}%", self.defense_percent)
    }

    /// HUD line for the shield meter
    pub fn shield_text(&self) -> String {
        format!("Shield: {:.1}%", self.shield_energy_percent)
    }
}

/// Advance the simulation by one frame
///
/// `now_ms` is the host clock (e.g. `performance.now()`), used only for the
/// difficulty ramp. Once the run is over, queued input is discarded and the
/// state no longer changes.
pub fn tick(state: &mut SimulationState, commands: &mut CommandQueue, now_ms: f64) -> FrameReport {
    if state.is_over() {
        commands.clear();
        let events = state.take_events();
        return FrameReport::of(state, events);
    }

    for command in commands.drain() {
        state.apply(command);
    }

    state.frame += 1;

    if state.clock.maybe_ramp(now_ms) {
        let base_speed = state.clock.base_speed;
        state.pending_events.push(GameEvent::SpeedRamped { base_speed });
    }

    state.roll_spawn();

    let shield_active = state.shield.active;
    let arena = state.arena;
    let mut strike = None;
    for flare in state.flares.iter_mut() {
        if let Some(hit) = flare.update(
            shield_active,
            arena.target,
            arena.shield_radius,
            arena.core_radius,
            &mut state.rng,
        ) {
            strike = Some(hit);
            break;
        }
    }
    if let Some(hit) = strike {
        state.end(hit.flare_id);
    }

    if state.shield.tick() {
        log::info!("Shield depleted on frame {}", state.frame);
        state.pending_events.push(GameEvent::ShieldDepleted);
    }

    let events = state.take_events();
    FrameReport::of(state, events)
}
