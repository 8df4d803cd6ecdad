//! Input sampling
//!
//! Browser events write into a sampler; the simulation reads it once per tick.
//! Pointer position is last-write-wins, one-shot commands accumulate until sampled.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// How input moves the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Player centre snaps to the pointer every tick
    #[default]
    Follow,
    /// Player drifts down; each press jumps up
    Jump,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Follow => "follow",
            ControlMode::Jump => "jump",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "follow" | "pointer" => Some(ControlMode::Follow),
            "jump" => Some(ControlMode::Jump),
            _ => None,
        }
    }
}

/// One-shot commands gathered between ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commands {
    /// Leave the start screen
    pub start: bool,
    /// Jump presses (jump mode)
    pub jumps: u32,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
}

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in playfield coordinates (follow mode)
    pub target: Option<Vec2>,
    pub commands: Commands,
}

/// Source of per-tick input, decoupled from whatever produces the events
pub trait InputSampler {
    /// Look at the state before the next sample (bots steer here)
    fn observe(&mut self, _state: &GameState) {}

    /// Most recent pointer position in playfield coordinates, if any
    fn current_target(&self) -> Option<Vec2>;

    /// Drain commands accumulated since the last sample
    fn take_commands(&mut self) -> Commands;

    fn sample(&mut self) -> TickInput {
        TickInput {
            target: self.current_target(),
            commands: self.take_commands(),
        }
    }
}

/// Pointer/touch/keyboard sampler fed by event handlers
#[derive(Debug, Clone, Default)]
pub struct PointerInput {
    target: Option<Vec2>,
    pending: Commands,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer position (already mapped into playfield coordinates)
    pub fn point_at(&mut self, pos: Vec2) {
        self.target = Some(pos);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn press_start(&mut self) {
        self.pending.start = true;
    }

    pub fn press_jump(&mut self) {
        self.pending.jumps = self.pending.jumps.saturating_add(1);
    }

    pub fn press_pause(&mut self) {
        self.pending.pause = true;
    }

    pub fn press_restart(&mut self) {
        self.pending.restart = true;
    }
}

impl InputSampler for PointerInput {
    fn current_target(&self) -> Option<Vec2> {
        self.target
    }

    fn take_commands(&mut self) -> Commands {
        std::mem::take(&mut self.pending)
    }
}
