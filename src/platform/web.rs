//! Canvas 2D surface and browser navigation (WASM only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::game::Navigator;
use crate::renderer::palette::css;
use crate::renderer::{Color, Surface};
use crate::sim::Rect;

/// Paints onto an HTML canvas through its 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Wrap the canvas' 2D context, or `None` if it cannot provide one
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn fill_path(&self, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(
            rect.left() as f64,
            rect.top() as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let r = radius.min(rect.size.x / 2.0).min(rect.size.y / 2.0).max(0.0) as f64;
        let (l, t) = (rect.left() as f64, rect.top() as f64);
        let (rt, b) = (rect.right() as f64, rect.bottom() as f64);

        self.ctx.begin_path();
        self.ctx.move_to(l + r, t);
        let _ = self.ctx.arc_to(rt, t, rt, b, r);
        let _ = self.ctx.arc_to(rt, b, l, b, r);
        let _ = self.ctx.arc_to(l, b, l, t, r);
        let _ = self.ctx.arc_to(l, t, rt, t, r);
        self.ctx.close_path();
        self.fill_path(color);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x as f64,
            radii.y as f64,
            0.0,
            0.0,
            std::f64::consts::TAU,
        );
        self.fill_path(color);
    }

    fn dashed_vline(
        &mut self,
        x: f32,
        y0: f32,
        y1: f32,
        width: f32,
        dash: f32,
        gap: f32,
        phase: f32,
        color: Color,
    ) {
        let pattern = js_sys::Array::of2(
            &JsValue::from_f64(dash as f64),
            &JsValue::from_f64(gap as f64),
        );
        let _ = self.ctx.set_line_dash(&pattern);
        // Canvas offsets run against the path direction
        self.ctx.set_line_dash_offset(-(phase as f64));
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.begin_path();
        self.ctx.move_to(x as f64, y0 as f64);
        self.ctx.line_to(x as f64, y1 as f64);
        self.ctx.stroke();
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
    }
}

/// Returns to the site's landing scene
#[derive(Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn return_to_parent(&mut self) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href("/") {
                log::warn!("Navigation failed: {:?}", e);
            }
        }
    }
}
