//! Platform abstraction layer
//!
//! The simulation never talks to a screen, a DOM or a timer directly. The
//! host supplies:
//! - a [`Renderer`] that draws the current state
//! - a [`StatusSink`] that shows the HUD numbers
//! - a frame scheduler that keeps calling [`Game::frame`] until it returns
//!   [`FrameFlow::Stop`]
//!
//! Input events go through [`Game::on_pointer_move`], [`Game::on_click`] and
//! [`Game::on_toggle_shield`]. They are queued and applied at the start of the
//! next frame.

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::autopilot::Autopilot;
use crate::sim::{Arena, Command, CommandQueue, FrameReport, SimulationState, tick};
use crate::tuning::Tuning;

/// Draws a frame. Pure output: must not feed back into the simulation.
pub trait Renderer {
    fn draw(&mut self, state: &SimulationState);
}

/// Receives the HUD values after every frame
pub trait StatusSink {
    fn publish(&mut self, report: &FrameReport);
}

/// Renderer that draws nothing (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _state: &SimulationState) {}
}

/// Status sink that writes HUD changes to the log
#[derive(Debug, Default)]
pub struct LogStatusSink {
    last_energy: Option<f32>,
}

impl StatusSink for LogStatusSink {
    fn publish(&mut self, report: &FrameReport) {
        for event in &report.events {
            log::debug!("frame {}: {:?}", report.frame, event);
        }
        // Log the meter once per whole percent so the output stays readable
        let energy = report.shield_energy_percent.floor();
        if self.last_energy != Some(energy) {
            self.last_energy = Some(energy);
            log::trace!("{} | {}", report.defense_text(), report.shield_text());
        }
    }
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFlow {
    Continue,
    Stop,
}

/// One run wired to its input queue
#[derive(Debug)]
pub struct Game {
    pub state: SimulationState,
    queue: CommandQueue,
    autopilot: Option<Autopilot>,
}

impl Game {
    pub fn new(seed: u64, arena: Arena, start_ms: f64, tuning: &Tuning) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: SimulationState::with_tuning(seed, arena, start_ms, tuning),
            queue: CommandQueue::new(),
            autopilot: None,
        }
    }

    /// Let the demo player feed commands every frame
    pub fn set_autopilot(&mut self, autopilot: Option<Autopilot>) {
        log::info!("Autopilot: {}", autopilot.is_some());
        self.autopilot = autopilot;
    }

    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.queue.push(Command::PointerMove(pos));
    }

    pub fn on_click(&mut self, pos: Vec2) {
        self.queue.push(Command::Click(pos));
    }

    pub fn on_toggle_shield(&mut self) {
        self.queue.push(Command::ToggleShield);
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Run one frame: step, draw, publish
    pub fn frame(
        &mut self,
        now_ms: f64,
        renderer: &mut dyn Renderer,
        sink: &mut dyn StatusSink,
    ) -> FrameFlow {
        if let Some(autopilot) = self.autopilot.as_mut() {
            self.queue.extend(autopilot.plan(&self.state));
        }

        let report = tick(&mut self.state, &mut self.queue, now_ms);
        renderer.draw(&self.state);
        sink.publish(&report);

        if self.state.is_over() {
            FrameFlow::Stop
        } else {
            FrameFlow::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Flare, GameStatus};

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        last_flares: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, state: &SimulationState) {
            self.frames += 1;
            self.last_flares = state.flares.len();
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        reports: Vec<FrameReport>,
    }

    impl StatusSink for RecordingSink {
        fn publish(&mut self, report: &FrameReport) {
            self.reports.push(report.clone());
        }
    }

    fn quiet_game() -> Game {
        let tuning = Tuning {
            spawn_probability: 0.0,
            ..Default::default()
        };
        Game::new(5, Arena::default(), 0.0, &tuning)
    }

    #[test]
    fn test_input_is_queued_until_next_frame() {
        let mut game = quiet_game();
        let pos = Vec2::new(300.0, 300.0);
        let id = game.state.next_entity_id();
        game.state.push_flare(Flare::new(id, pos, 1.0, 0.0));

        game.on_pointer_move(Vec2::new(1.0, 1.0));
        game.on_click(pos);
        game.on_toggle_shield();
        assert_eq!(game.pending_commands(), 3);
        assert_eq!(game.state.flares.len(), 1);
        assert!(!game.state.shield.active);

        let mut renderer = CountingRenderer::default();
        let mut sink = RecordingSink::default();
        let flow = game.frame(16.0, &mut renderer, &mut sink);

        assert_eq!(flow, FrameFlow::Continue);
        assert_eq!(game.pending_commands(), 0);
        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.last_flares, 0);
        assert!(sink.reports[0].shield_active);
    }

    #[test]
    fn test_frame_stops_on_game_over() {
        let mut game = quiet_game();
        let target = game.state.arena.target;
        let id = game.state.next_entity_id();
        game.state.push_flare(Flare::new(id, target, 1.0, 0.0));

        let mut sink = RecordingSink::default();
        let flow = game.frame(16.0, &mut NullRenderer, &mut sink);
        assert_eq!(flow, FrameFlow::Stop);
        assert_eq!(sink.reports[0].status, GameStatus::Over);
    }

    #[test]
    fn test_log_sink_accepts_reports() {
        let mut game = quiet_game();
        let mut sink = LogStatusSink::default();
        for i in 0..5 {
            game.frame(i as f64, &mut NullRenderer, &mut sink);
        }
        assert_eq!(sink.last_energy, Some(100.0));
    }
}
