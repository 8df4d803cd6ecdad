//! Hazard and bonus spawning
//!
//! Hazards enter from a random edge and cross the field; bonuses appear at a
//! random spot inside the padded playfield and never move.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind};
use crate::consts::*;

/// Per-tick hazard spawn probability, rising linearly with wave
pub fn hazard_spawn_chance(wave: u32) -> f64 {
    (HAZARD_SPAWN_BASE + HAZARD_SPAWN_PER_WAVE * wave as f64).clamp(0.0, 1.0)
}

/// Inward hazard speed for a wave
pub fn hazard_speed(wave: u32) -> f32 {
    HAZARD_SPEED_BASE + HAZARD_SPEED_PER_WAVE * wave as f32
}

/// Edge a hazard enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    fn from_index(i: u32) -> Self {
        match i {
            0 => Edge::Top,
            1 => Edge::Right,
            2 => Edge::Bottom,
            _ => Edge::Left,
        }
    }
}

/// Build a hazard entering from `edge`.
///
/// `along` in [0, 1) picks the position along the edge, `drift` is the lateral velocity.
pub fn hazard_from_edge(kind: EntityKind, edge: Edge, along: f32, drift: f32, speed: f32) -> Entity {
    let size = kind.size();
    let (pos, vel) = match edge {
        Edge::Top => (
            Vec2::new(along * (FIELD_WIDTH - size), -size),
            Vec2::new(drift, speed),
        ),
        Edge::Right => (
            Vec2::new(FIELD_WIDTH, along * (FIELD_HEIGHT - size)),
            Vec2::new(-speed, drift),
        ),
        Edge::Bottom => (
            Vec2::new(along * (FIELD_WIDTH - size), FIELD_HEIGHT),
            Vec2::new(drift, -speed),
        ),
        Edge::Left => (
            Vec2::new(-size, along * (FIELD_HEIGHT - size)),
            Vec2::new(speed, drift),
        ),
    };
    Entity::new(kind, pos, vel)
}

/// Roll a random hazard for the given wave
pub fn spawn_hazard<R: Rng + ?Sized>(rng: &mut R, wave: u32) -> Entity {
    let kind = if rng.random_bool(0.5) {
        EntityKind::Fud
    } else {
        EntityKind::Whale
    };
    let edge = Edge::from_index(rng.random_range(0..4));
    let along: f32 = rng.random();
    let drift = (rng.random::<f32>() - 0.5) * HAZARD_DRIFT;
    hazard_from_edge(kind, edge, along, drift, hazard_speed(wave))
}

/// Roll a random static bonus inside the padded playfield
pub fn spawn_bonus<R: Rng + ?Sized>(rng: &mut R) -> Entity {
    let kind = if rng.random_bool(BIG_BONUS_SHARE) {
        EntityKind::Bonus
    } else {
        EntityKind::Hype
    };
    let size = kind.size();
    let span_x = FIELD_WIDTH - size - BOUNDARY_PADDING * 2.0;
    let span_y = FIELD_HEIGHT - size - BOUNDARY_PADDING * 2.0;
    let pos = Vec2::new(
        BOUNDARY_PADDING + rng.random::<f32>() * span_x,
        BOUNDARY_PADDING + rng.random::<f32>() * span_y,
    );
    Entity::new(kind, pos, Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_chance_scales_with_wave() {
        assert!((hazard_spawn_chance(1) - 0.015).abs() < 1e-12);
        assert!(hazard_spawn_chance(10) > hazard_spawn_chance(1));
        assert_eq!(hazard_spawn_chance(10_000), 1.0);
    }

    #[test]
    fn test_hazard_speed() {
        assert!((hazard_speed(1) - 1.35).abs() < 1e-6);
        assert!((hazard_speed(4) - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_hazards_move_inward() {
        let speed = 2.0;
        let top = hazard_from_edge(EntityKind::Fud, Edge::Top, 0.5, 0.0, speed);
        assert_eq!(top.pos.y, -28.0);
        assert_eq!(top.vel, Vec2::new(0.0, speed));

        let right = hazard_from_edge(EntityKind::Whale, Edge::Right, 0.0, 0.3, speed);
        assert_eq!(right.pos, Vec2::new(FIELD_WIDTH, 0.0));
        assert_eq!(right.vel, Vec2::new(-speed, 0.3));

        let bottom = hazard_from_edge(EntityKind::Fud, Edge::Bottom, 0.0, 0.0, speed);
        assert_eq!(bottom.vel.y, -speed);

        let left = hazard_from_edge(EntityKind::Whale, Edge::Left, 0.0, 0.0, speed);
        assert_eq!(left.pos.x, -32.0);
        assert_eq!(left.vel.x, speed);
    }

    #[test]
    fn test_random_spawns_are_well_formed() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let hazard = spawn_hazard(&mut rng, 3);
            assert!(hazard.kind.is_hazard());
            assert!(!hazard.is_static());
            assert!(hazard.vel.length() >= hazard_speed(3));
            assert!(hazard.vel.x.abs() <= hazard_speed(3) && hazard.vel.y.abs() <= hazard_speed(3));

            let bonus = spawn_bonus(&mut rng);
            assert!(!bonus.kind.is_hazard());
            assert!(bonus.is_static());
            assert!(bonus.pos.x >= BOUNDARY_PADDING);
            assert!(bonus.pos.x + bonus.size <= FIELD_WIDTH - BOUNDARY_PADDING);
            assert!(bonus.pos.y >= BOUNDARY_PADDING);
            assert!(bonus.pos.y + bonus.size <= FIELD_HEIGHT - BOUNDARY_PADDING);
        }
    }
}
