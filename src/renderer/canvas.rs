//! Canvas 2D renderer
//!
//! Sun and Earth are sprites, flares are filled red circles, the shield is a
//! translucent cyan ring and the crosshair is a `+` glyph.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::platform::Renderer;
use crate::sim::SimulationState;

/// Sprite box size for the Sun and Earth images
const SPRITE_SIZE: f64 = 200.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sun: HtmlImageElement,
    earth: HtmlImageElement,
}

impl CanvasRenderer {
    /// `sun_src`/`earth_src` are image URLs; drawing starts before they finish
    /// loading and the sprites simply pop in.
    pub fn new(
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        sun_src: &str,
        earth_src: &str,
    ) -> Result<Self, JsValue> {
        let sun = HtmlImageElement::new()?;
        sun.set_src(sun_src);
        let earth = HtmlImageElement::new()?;
        earth.set_src(earth_src);
        Ok(Self {
            canvas,
            ctx,
            sun,
            earth,
        })
    }

    fn draw_sprite(&self, image: &HtmlImageElement, x: f32, y: f32) {
        // An image that failed to load is skipped, not fatal
        if !image.complete() || image.natural_width() == 0 {
            return;
        }
        let half = SPRITE_SIZE / 2.0;
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            x as f64 - half,
            y as f64 - half,
            SPRITE_SIZE,
            SPRITE_SIZE,
        ) {
            log::warn!("Sprite draw failed: {:?}", e);
        }
    }

    fn circle(&self, x: f32, y: f32, r: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x as f64, y as f64, r as f64, 0.0, TAU);
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, state: &SimulationState) {
        let ctx = &self.ctx;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        ctx.clear_rect(0.0, 0.0, w, h);

        let arena = &state.arena;
        self.draw_sprite(&self.sun, arena.source.x, arena.source.y);
        self.draw_sprite(&self.earth, arena.target.x, arena.target.y);

        if state.shield.active {
            self.circle(arena.target.x, arena.target.y, arena.shield_radius);
            ctx.set_stroke_style_str("rgba(0, 255, 255, 0.5)");
            ctx.set_line_width(5.0);
            ctx.stroke();
            ctx.close_path();
        }

        ctx.set_fill_style_str("red");
        for flare in &state.flares {
            self.circle(flare.pos.x, flare.pos.y, flare.radius);
            ctx.fill();
            ctx.close_path();
        }

        ctx.set_fill_style_str("white");
        ctx.set_font("30px Arial");
        let _ = ctx.fill_text(
            "+",
            state.pointer.x as f64 - 10.0,
            state.pointer.y as f64 + 10.0,
        );
    }
}
