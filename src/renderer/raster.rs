//! Software raster surface
//!
//! One pixel per field unit. Pixels are sampled at their centers and blended
//! source-over, which is enough for the flat shapes the road is made of.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::{Color, Surface};
use crate::sim::Rect;

/// 8-bit RGBA pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel-index range covering [lo, hi) sampled at pixel centers
    fn span(lo: f32, hi: f32, max: u32) -> std::ops::Range<u32> {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().clamp(0.0, max as f32);
        if start >= end {
            0..0
        } else {
            start as u32..end as u32
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let idx = (y * self.width + x) as usize;
        let dst = self.pixels[idx];
        let a = color[3].clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let mix = |src: f32, dst: u8| -> u8 {
            let d = dst as f32 / 255.0;
            ((src.clamp(0.0, 1.0) * a + d * (1.0 - a)) * 255.0).round() as u8
        };
        let out_a = a + (dst.a as f32 / 255.0) * (1.0 - a);
        self.pixels[idx] = Pixel {
            r: mix(color[0], dst.r),
            g: mix(color[1], dst.g),
            b: mix(color[2], dst.b),
            a: (out_a * 255.0).round() as u8,
        };
    }

    /// Blend every pixel in the rect whose center passes `inside`
    fn fill_where(&mut self, bounds: Rect, color: Color, inside: impl Fn(Vec2) -> bool) {
        for y in Self::span(bounds.top(), bounds.bottom(), self.height) {
            for x in Self::span(bounds.left(), bounds.right(), self.width) {
                if inside(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl Surface for Framebuffer {
    fn clear(&mut self) {
        self.pixels.fill(Pixel::default());
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_where(rect, color, |_| true);
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let r = radius.min(rect.size.x / 2.0).min(rect.size.y / 2.0).max(0.0);
        let inner_min = rect.pos + Vec2::splat(r);
        let inner_max = rect.pos + rect.size - Vec2::splat(r);
        self.fill_where(rect, color, |p| {
            // Distance to the inner rect; corners become quarter circles
            let nearest = p.clamp(inner_min, inner_max);
            p.distance_squared(nearest) <= r * r
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let bounds = Rect {
            pos: center - radii,
            size: radii * 2.0,
        };
        self.fill_where(bounds, color, |p| {
            let d = (p - center) / radii;
            d.length_squared() <= 1.0
        });
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
        let period = dash + gap;
        if period <= 0.0 {
            return;
        }
        let bounds = Rect::new(x - width / 2.0, y0, width, y1 - y0);
        self.fill_where(bounds, color, |p| (p.y - y0 - phase).rem_euclid(period) < dash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_fill_rect_covers_pixel_centers() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_rect(Rect::new(2.0, 3.0, 4.0, 2.0), RED);
        assert_eq!(fb.pixel(2, 3).unwrap().r, 255);
        assert_eq!(fb.pixel(5, 4).unwrap().r, 255);
        assert_eq!(fb.pixel(6, 4).unwrap().r, 0);
        assert_eq!(fb.pixel(2, 5).unwrap().r, 0);
        assert_eq!(fb.pixel(1, 3).unwrap().r, 0);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), RED);
        assert!(fb.as_bytes().chunks(4).all(|p| p == [255, 0, 0, 255]));
        fb.clear();
        fb.fill_rect(Rect::new(50.0, 50.0, 10.0, 10.0), RED);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_alpha_blend() {
        let mut fb = Framebuffer::new(1, 1);
        fb.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [1.0, 1.0, 1.0, 1.0]);
        fb.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [0.0, 0.0, 0.0, 0.5]);
        let p = fb.pixel(0, 0).unwrap();
        assert!(p.r == 127 || p.r == 128);
        assert_eq!(p.a, 255);
    }

    #[test]
    fn test_ellipse() {
        let mut fb = Framebuffer::new(20, 20);
        fb.fill_ellipse(Vec2::new(10.0, 10.0), Vec2::new(5.0, 3.0), RED);
        assert_eq!(fb.pixel(10, 10).unwrap().r, 255);
        assert_eq!(fb.pixel(14, 10).unwrap().r, 255);
        assert_eq!(fb.pixel(10, 14).unwrap().r, 0);
        assert_eq!(fb.pixel(0, 0).unwrap().r, 0);
    }

    #[test]
    fn test_round_rect_trims_corners() {
        let mut fb = Framebuffer::new(20, 20);
        fb.fill_round_rect(Rect::new(0.0, 0.0, 20.0, 20.0), 6.0, RED);
        assert_eq!(fb.pixel(0, 0).unwrap().r, 0);
        assert_eq!(fb.pixel(10, 0).unwrap().r, 255);
        assert_eq!(fb.pixel(10, 10).unwrap().r, 255);
        assert_eq!(fb.pixel(19, 19).unwrap().r, 0);
    }

    #[test]
    fn test_dashed_line_phase() {
        let mut fb = Framebuffer::new(4, 40);
        fb.dashed_vline(2.0, 0.0, 40.0, 2.0, 10.0, 10.0, 0.0, RED);
        assert_eq!(fb.pixel(1, 5).unwrap().r, 255);
        assert_eq!(fb.pixel(1, 15).unwrap().r, 0);
        assert_eq!(fb.pixel(1, 25).unwrap().r, 255);

        fb.clear();
        fb.dashed_vline(2.0, 0.0, 40.0, 2.0, 10.0, 10.0, 10.0, RED);
        assert_eq!(fb.pixel(1, 5).unwrap().r, 0);
        assert_eq!(fb.pixel(1, 15).unwrap().r, 255);
    }
}
