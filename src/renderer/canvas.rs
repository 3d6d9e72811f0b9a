//! HTML canvas 2D context backend

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Surface};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas`
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
        }
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
        self.ctx.restore();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color, alpha: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(
            origin.x as f64,
            origin.y as f64,
            size.x as f64,
            size.y as f64,
        );
        self.ctx.restore();
    }
}
