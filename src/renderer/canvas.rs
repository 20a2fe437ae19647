//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{DrawCmd, build_scene};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::GameState;

/// Draws frames onto the game canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the 2D context and size the backing store to the logical field
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw the current state
    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        for cmd in build_scene(state) {
            self.draw(&cmd)?;
        }
        Ok(())
    }

    fn draw(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear { color } => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
            }
            DrawCmd::Rect { pos, size, color } => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&color.css());
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCmd::Text {
                pos,
                text,
                size_px,
                align,
                color,
            } => {
                ctx.set_fill_style_str(&color.css());
                ctx.set_font(&format!("{}px Arial", size_px));
                ctx.set_text_align(align.as_str());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}
