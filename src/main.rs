//! Solar Shield entry point
//!
//! Browser builds hand off to [`solar_shield::platform::web`]. Native builds
//! run a headless session driven by the autopilot:
//!
//! ```text
//! solar-shield [seed] [tuning.json]
//! ```

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Logger init failed: {e}").into());
    }
    log::info!("Solar Shield starting...");

    if let Err(e) = solar_shield::platform::web::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Synthetic frame length for headless runs (60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Headless runs stop here even if the Earth survives (one hour of play)
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use solar_shield::autopilot::Autopilot;
    use solar_shield::platform::{LogStatusSink, NullRenderer};
    use solar_shield::sim::Arena;
    use solar_shield::{FrameFlow, Game, Tuning};

    env_logger::init();
    log::info!("Solar Shield (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("Invalid seed {:?}: {}", raw, e);
                std::process::exit(2);
            }
        },
        None => 12345,
    };
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => Tuning::default(),
    };

    let arena = Arena::default();
    let mut game = Game::new(seed, arena, 0.0, &tuning);
    game.set_autopilot(Some(Autopilot::new(arena.target)));

    let mut renderer = NullRenderer;
    let mut sink = LogStatusSink::default();
    let mut now = 0.0;
    while game.state.frame < MAX_FRAMES {
        now += FRAME_MS;
        if game.frame(now, &mut renderer, &mut sink) == FrameFlow::Stop {
            break;
        }
    }

    let state = &game.state;
    println!(
        "seed {}: {:?} after {} frames ({:.1}s), {} flares live, base speed {:.1}, shield {:.1}%",
        seed,
        state.status,
        state.frame,
        now / 1000.0,
        state.flares.len(),
        state.clock.base_speed,
        state.shield.display_energy()
    );
}
