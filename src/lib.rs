//! BENJI Survival - a dodge-and-collect arcade mini-app
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (spawning, movement, collisions, run state)
//! - `session`: Owned run + high score bookkeeping driven by the frame loop
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Mini-app host and key/value storage abstraction
//! - `challenge`: Shareable "beat my score" links
//! - `leaderboard`: Best-score-per-player ranking behind a repository seam
//! - `server`: HTTP surface for the leaderboard (native only)
//! - `board`: Three-column task board
//! - `agentlog`: Append-only hash-chained agent log

pub mod agentlog;
pub mod board;
pub mod challenge;
pub mod highscores;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod session;
pub mod settings;
pub mod sim;

pub use challenge::ChallengeLink;
pub use highscores::HighScoreStore;
pub use session::Session;
pub use settings::Settings;
pub use sim::ControlMode;

use glam::Vec2;

/// Game configuration constants
///
/// Distances are playfield units (origin top-left, y down), speeds are units per tick.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Keep the player this far from the edges
    pub const BOUNDARY_PADDING: f32 = 8.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 28.0; // Small for mobile maneuverability
    pub const STARTING_LIVES: u8 = 3;
    /// Jump mode: upward displacement per press
    pub const JUMP_IMPULSE: f32 = 80.0;
    /// Jump mode: downward drift per tick
    pub const JUMP_GRAVITY: f32 = 1.0;
    /// Jump mode: start height above the bottom edge
    pub const JUMP_START_OFFSET: f32 = 100.0;
    /// Jump mode: floor lift while the challenge bar is shown
    pub const CHALLENGE_BAR_CLEARANCE: f32 = 40.0;

    /// Hazard spawning: per-tick probability = BASE + PER_WAVE * wave
    pub const HAZARD_SPAWN_BASE: f64 = 0.012;
    pub const HAZARD_SPAWN_PER_WAVE: f64 = 0.003;
    /// Hazard speed = BASE + PER_WAVE * wave
    pub const HAZARD_SPEED_BASE: f32 = 1.2;
    pub const HAZARD_SPEED_PER_WAVE: f32 = 0.15;
    /// Lateral drift range (full width, centered on zero)
    pub const HAZARD_DRIFT: f32 = 1.5;

    /// Bonus spawning: fixed per-tick probability
    pub const BONUS_SPAWN_CHANCE: f64 = 0.002;
    /// Share of bonus spawns that are the big `Bonus` kind
    pub const BIG_BONUS_SHARE: f64 = 0.3;

    /// Player flashes for this many ticks after a hit
    pub const HIT_FLASH_TICKS: u8 = 12;

    /// Survival score per tick
    pub const SCORE_PER_TICK: u64 = 1;
    /// Wave advances once score exceeds wave * WAVE_SCORE_STEP
    pub const WAVE_SCORE_STEP: u64 = 800;
}

/// Clamp a point so a square of `size` stays inside the padded playfield
#[inline]
pub fn clamp_to_field(pos: Vec2, size: f32) -> Vec2 {
    use consts::*;
    Vec2::new(
        pos.x.clamp(BOUNDARY_PADDING, FIELD_WIDTH - size - BOUNDARY_PADDING),
        pos.y.clamp(BOUNDARY_PADDING, FIELD_HEIGHT - size - BOUNDARY_PADDING),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_field() {
        let inside = Vec2::new(100.0, 200.0);
        assert_eq!(clamp_to_field(inside, 28.0), inside);

        let low = clamp_to_field(Vec2::new(-50.0, -1.0), 28.0);
        assert_eq!(low, Vec2::new(8.0, 8.0));

        let high = clamp_to_field(Vec2::new(1000.0, 1000.0), 28.0);
        assert_eq!(high, Vec2::new(364.0, 564.0));
    }
}
