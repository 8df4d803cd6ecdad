//! Playfield <-> screen mapping
//!
//! The 400x600 playfield (origin top-left, y down) is letterboxed into the
//! canvas, keeping its aspect ratio.

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas size in pixels
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    /// Pixels per playfield unit
    pub fn scale(&self) -> f32 {
        (self.width / FIELD_WIDTH).min(self.height / FIELD_HEIGHT)
    }

    /// Top-left of the playfield in canvas pixels
    fn origin(&self) -> Vec2 {
        let s = self.scale();
        Vec2::new(
            (self.width - FIELD_WIDTH * s) / 2.0,
            (self.height - FIELD_HEIGHT * s) / 2.0,
        )
    }

    /// Playfield point to normalized device coordinates
    pub fn to_ndc(&self, p: Vec2) -> [f32; 2] {
        let px = self.origin() + p * self.scale();
        [
            px.x / self.width * 2.0 - 1.0,
            1.0 - px.y / self.height * 2.0,
        ]
    }

    /// Canvas pixel (relative to the canvas' top-left) to playfield point
    pub fn screen_to_field(&self, px: Vec2) -> Vec2 {
        (px - self.origin()) / self.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let vp = Viewport::new(400, 600);
        assert_eq!(vp.to_ndc(Vec2::ZERO), [-1.0, 1.0]);
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 600.0)), [1.0, -1.0]);
        assert_eq!(vp.screen_to_field(Vec2::new(200.0, 300.0)), Vec2::new(200.0, 300.0));
    }

    #[test]
    fn test_letterboxed_wide_canvas() {
        // 2x scale, 400 px of horizontal bars on each side
        let vp = Viewport::new(1600, 1200);
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.to_ndc(Vec2::ZERO), [-0.5, 1.0]);
        assert_eq!(
            vp.screen_to_field(Vec2::new(400.0, 0.0)),
            Vec2::ZERO
        );
        assert_eq!(
            vp.screen_to_field(Vec2::new(1200.0, 1200.0)),
            Vec2::new(400.0, 600.0)
        );
    }
}
