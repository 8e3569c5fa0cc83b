//! 2D rendering module
//!
//! Draws the simulation through the `Surface` trait. The browser build paints
//! onto a canvas 2D context; native builds and tests paint into a software
//! `Framebuffer`.

pub mod palette;
pub mod raster;
pub mod scene;

use glam::Vec2;

use crate::sim::Rect;

pub use raster::Framebuffer;
pub use scene::render;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// A 2D raster target in field units (origin top-left, y down)
pub trait Surface {
    /// Reset every pixel to transparent
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color);

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);

    /// Vertical dashed line of the given stroke width. The dash pattern starts
    /// at `y0 + phase` and repeats every `dash + gap` units.
    #[allow(clippy::too_many_arguments)]
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
    );
}
