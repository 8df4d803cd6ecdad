//! Idle/demo mode - a simple bot that plays the game
//!
//! Sidesteps the most threatening hazard, otherwise goes for the nearest bonus.

use glam::Vec2;

use super::input::{Commands, ControlMode, InputSampler};
use super::state::{Entity, GameState, RunPhase};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Hazards closer than this (centre to centre) are treated as threats
const DANGER_RADIUS: f32 = 90.0;
/// How far to sidestep away from a threat's path
const SIDESTEP: f32 = 50.0;
/// Jump mode: jump when a threat is this close
const JUMP_TRIGGER: f32 = 60.0;

/// Bot input source
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    target: Option<Vec2>,
    pending: Commands,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide the next move from the current state. Call once before each sample.
    pub fn steer(&mut self, state: &GameState) {
        match state.phase {
            RunPhase::Ready => {
                self.pending.start = true;
                return;
            }
            RunPhase::Playing => {}
            _ => return,
        }

        let me = state.player.center();
        let threat = most_threatening(state, me);

        match state.control {
            ControlMode::Follow => {
                self.target = Some(match threat {
                    Some(hazard) => sidestep(me, hazard),
                    None => state
                        .bonuses()
                        .min_by(|a, b| {
                            a.center()
                                .distance_squared(me)
                                .total_cmp(&b.center().distance_squared(me))
                        })
                        .map(Entity::center)
                        .unwrap_or(Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0)),
                });
            }
            ControlMode::Jump => {
                if let Some(hazard) = threat {
                    if hazard.center().distance(me) < JUMP_TRIGGER && hazard.center().y >= me.y - 10.0
                    {
                        self.pending.jumps = self.pending.jumps.saturating_add(1);
                    }
                }
            }
        }
    }
}

impl InputSampler for Autopilot {
    fn observe(&mut self, state: &GameState) {
        self.steer(state);
    }

    fn current_target(&self) -> Option<Vec2> {
        self.target
    }

    fn take_commands(&mut self) -> Commands {
        std::mem::take(&mut self.pending)
    }
}

/// Nearest hazard within the danger radius that is moving toward `me`
fn most_threatening(state: &GameState, me: Vec2) -> Option<&Entity> {
    state
        .hazards()
        .filter(|h| {
            let to_me = me - h.center();
            to_me.length() < DANGER_RADIUS && h.vel.dot(to_me) > 0.0
        })
        .min_by(|a, b| {
            a.center()
                .distance_squared(me)
                .total_cmp(&b.center().distance_squared(me))
        })
}

/// Step perpendicular to the hazard's path, on the side we're already on
fn sidestep(me: Vec2, hazard: &Entity) -> Vec2 {
    let dir = hazard.vel.normalize_or_zero();
    let mut perp = Vec2::new(-dir.y, dir.x);
    if perp.dot(me - hazard.center()) < 0.0 {
        perp = -perp;
    }
    me + perp * SIDESTEP
}
