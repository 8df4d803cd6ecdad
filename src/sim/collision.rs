//! Collision detection
//!
//! Axis-aligned boxes only. The entity count stays small, so every entity is
//! tested against the player each tick with no broad phase.

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Axis-aligned bounding box (top-left `min`, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn square(top_left: Vec2, size: f32) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::splat(size),
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Whether a square of `size` at `pos` is still within the playfield grown by
/// `size` on every side. Hazards outside this margin are discarded.
pub fn within_extended_field(pos: Vec2, size: f32) -> bool {
    pos.x > -size && pos.x < FIELD_WIDTH + size && pos.y > -size && pos.y < FIELD_HEIGHT + size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 10.0);
        let b = Aabb::square(Vec2::new(5.0, 5.0), 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 10.0);
        let right = Aabb::square(Vec2::new(10.0, 0.0), 10.0);
        let below = Aabb::square(Vec2::new(0.0, 10.0), 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 10.0);
        let b = Aabb::square(Vec2::new(5.0, 50.0), 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_extended_field() {
        assert!(within_extended_field(Vec2::new(-27.0, 100.0), 28.0));
        assert!(!within_extended_field(Vec2::new(-28.0, 100.0), 28.0));
        assert!(within_extended_field(Vec2::new(200.0, 627.0), 28.0));
        assert!(!within_extended_field(Vec2::new(200.0, 628.0), 28.0));
        assert!(!within_extended_field(Vec2::new(428.0, 0.0), 28.0));
    }
}
