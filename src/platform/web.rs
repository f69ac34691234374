//! Browser host: DOM HUD, input listeners and the animation-frame loop
//!
//! Expected page elements:
//! - `<canvas id="spaceCanvas">`
//! - `#defenseStatus`, `#shieldMeter` text nodes
//! - `#toggleShield` button
//! - `#gameOver` overlay (hidden until the Earth is struck)
//!
//! Add `?demo` to the URL to let the autopilot play.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent};

use super::{FrameFlow, Game, StatusSink};
use crate::autopilot::Autopilot;
use crate::renderer::CanvasRenderer;
use crate::sim::{Arena, FrameReport, GameStatus};
use crate::tuning::Tuning;

/// Writes HUD values into the page
pub struct DomStatusSink {
    defense: Option<HtmlElement>,
    shield: Option<HtmlElement>,
    game_over: Option<HtmlElement>,
    shield_active: Option<bool>,
}

impl DomStatusSink {
    pub fn new(document: &Document) -> Self {
        let find = |id: &str| {
            let el = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if el.is_none() {
                log::warn!("HUD element #{} missing", id);
            }
            el
        };
        Self {
            defense: find("defenseStatus"),
            shield: find("shieldMeter"),
            game_over: find("gameOver"),
            shield_active: None,
        }
    }
}

impl StatusSink for DomStatusSink {
    fn publish(&mut self, report: &FrameReport) {
        if let Some(el) = &self.defense {
            el.set_text_content(Some(&report.defense_text()));
        }
        if let Some(el) = &self.shield {
            el.set_text_content(Some(&report.shield_text()));
            if self.shield_active != Some(report.shield_active) {
                self.shield_active = Some(report.shield_active);
                let color = if report.shield_active { "cyan" } else { "yellow" };
                let _ = el.style().set_property("color", color);
            }
        }
        if report.status == GameStatus::Over {
            if let Some(el) = &self.game_over {
                let _ = el.style().set_property("display", "block");
            }
        }
    }
}

struct WebApp {
    game: Game,
    renderer: CanvasRenderer,
    sink: DomStatusSink,
}

/// Build the game from the page and start the frame loop
pub fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("spaceCanvas")
        .ok_or("no #spaceCanvas")?
        .dyn_into()?;
    let width = window.inner_width()?.as_f64().unwrap_or(1280.0);
    let height = window.inner_height()?.as_f64().unwrap_or(720.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let ctx = canvas
        .get_context("2d")?
        .ok_or("no 2d context")?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()?;

    let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
    let seed = js_sys::Date::now() as u64;
    let arena = Arena::from_viewport(width as f32, height as f32);
    let mut game = Game::new(seed, arena, now, &Tuning::default());

    let demo = window
        .location()
        .search()
        .map(|q| q.contains("demo"))
        .unwrap_or(false);
    if demo {
        game.set_autopilot(Some(Autopilot::new(arena.target)));
    }

    let renderer = CanvasRenderer::new(canvas.clone(), ctx, "sun.png", "earth.png")?;
    let sink = DomStatusSink::new(&document);
    let app = Rc::new(RefCell::new(WebApp {
        game,
        renderer,
        sink,
    }));

    setup_input_handlers(&canvas, &document, app.clone())?;
    request_animation_frame(app)?;

    log::info!("Solar Shield running!");
    Ok(())
}

fn setup_input_handlers(
    canvas: &HtmlCanvasElement,
    document: &Document,
    app: Rc<RefCell<WebApp>>,
) -> Result<(), JsValue> {
    // Pointer move - crosshair
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            app.borrow_mut().game.on_pointer_move(pos);
        });
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Click - destroy flares under the crosshair
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            app.borrow_mut().game.on_click(pos);
        });
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Shield button
    if let Some(btn) = document.get_element_by_id("toggleShield") {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().game.on_toggle_shield();
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    } else {
        log::warn!("No #toggleShield button - shield cannot be used");
    }

    Ok(())
}

fn request_animation_frame(app: Rc<RefCell<WebApp>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let closure = Closure::once(move |time: f64| {
        game_loop(app, time);
    });
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn game_loop(app: Rc<RefCell<WebApp>>, time: f64) {
    let flow = {
        let mut guard = app.borrow_mut();
        let WebApp {
            game,
            renderer,
            sink,
        } = &mut *guard;
        game.frame(time, renderer, sink)
    };

    match flow {
        FrameFlow::Continue => {
            if let Err(e) = request_animation_frame(app) {
                log::error!("Failed to schedule frame: {:?}", e);
            }
        }
        FrameFlow::Stop => log::info!("Game over - frame loop stopped"),
    }
}
