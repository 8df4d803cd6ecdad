//! Game state and core simulation types
//!
//! Everything a run needs lives here and is owned by the caller; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::input::ControlMode;
use crate::challenge::ChallengeProgress;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Start screen, waiting for a start command
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Lives ran out
    GameOver,
}

/// Entity categories: two hazards, two bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Small hazard
    Fud,
    /// Large hazard
    Whale,
    /// Common bonus
    Hype,
    /// Rare, bigger bonus
    Bonus,
}

impl EntityKind {
    pub fn is_hazard(&self) -> bool {
        matches!(self, EntityKind::Fud | EntityKind::Whale)
    }

    pub fn size(&self) -> f32 {
        match self {
            EntityKind::Fud => 28.0,
            EntityKind::Whale => 32.0,
            EntityKind::Hype => 20.0,
            EntityKind::Bonus => 24.0,
        }
    }

    /// Points awarded on pickup (hazards award nothing)
    pub fn points(&self) -> u64 {
        match self {
            EntityKind::Hype => 20,
            EntityKind::Bonus => 50,
            EntityKind::Fud | EntityKind::Whale => 0,
        }
    }
}

/// A hazard or bonus. No identity: collisions remove it immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick (zero for static bonuses)
    pub vel: Vec2,
    pub kind: EntityKind,
    pub size: f32,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            kind,
            size: kind.size(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
}

impl Player {
    pub fn spawn(control: ControlMode) -> Self {
        let x = FIELD_WIDTH / 2.0 - PLAYER_SIZE / 2.0;
        let y = match control {
            ControlMode::Follow => FIELD_HEIGHT / 2.0,
            ControlMode::Jump => FIELD_HEIGHT - JUMP_START_OFFSET,
        };
        Self {
            pos: Vec2::new(x, y),
            size: PLAYER_SIZE,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Things that happened during a tick, drained by the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BonusCollected { kind: EntityKind, points: u64 },
    HazardHit { kind: EntityKind, lives_left: u8 },
    WaveAdvanced { wave: u32 },
    ChallengeBeaten { target: u64 },
    RunOver { score: u64, wave: u32 },
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub control: ControlMode,
    pub phase: RunPhase,
    pub player: Player,
    /// Live hazards and bonuses
    pub entities: Vec<Entity>,
    pub score: u64,
    pub lives: u8,
    /// Current wave (1-based)
    pub wave: u32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Ticks left on the post-hit flash
    pub hit_flash_ticks: u8,
    /// Active challenge, if the run was opened from a challenge link
    pub challenge: Option<ChallengeProgress>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state waiting on the start screen
    pub fn new(seed: u64, control: ControlMode) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            control,
            phase: RunPhase::Ready,
            player: Player::spawn(control),
            entities: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            wave: 1,
            time_ticks: 0,
            hit_flash_ticks: 0,
            challenge: None,
            events: Vec::new(),
        }
    }

    pub fn with_challenge(mut self, progress: ChallengeProgress) -> Self {
        self.challenge = Some(progress);
        self
    }

    /// Reset everything run-scoped and start playing immediately
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.player = Player::spawn(self.control);
        self.entities.clear();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.wave = 1;
        self.time_ticks = 0;
        self.hit_flash_ticks = 0;
        self.events.clear();
        if let Some(challenge) = self.challenge.as_mut() {
            challenge.reset();
        }
        self.phase = RunPhase::Playing;
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.phase == RunPhase::Ready {
            self.phase = RunPhase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            RunPhase::Playing => RunPhase::Paused,
            RunPhase::Paused => RunPhase::Playing,
            other => other,
        };
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Lowest y the player may reach in jump mode
    pub fn jump_floor(&self) -> f32 {
        let bar = if self.challenge.is_some() {
            CHALLENGE_BAR_CLEARANCE
        } else {
            0.0
        };
        FIELD_HEIGHT - self.player.size - bar
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn hazards(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_hazard())
    }

    pub fn bonuses(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.kind.is_hazard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::ChallengeLink;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1, ControlMode::Follow);
        assert_eq!(state.phase, RunPhase::Ready);
        assert_eq!(state.lives, 3);
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert!(state.entities.is_empty());
        assert_eq!(state.player.pos, Vec2::new(186.0, 300.0));
    }

    #[test]
    fn test_jump_spawn_and_floor() {
        let state = GameState::new(1, ControlMode::Jump);
        assert_eq!(state.player.pos.y, 500.0);
        assert_eq!(state.jump_floor(), 572.0);

        let state = state.with_challenge(ChallengeProgress::new(ChallengeLink::new(5, "a", 0)));
        assert_eq!(state.jump_floor(), 532.0);
    }

    #[test]
    fn test_pause_only_while_playing() {
        let mut state = GameState::new(1, ControlMode::Follow);
        state.toggle_pause();
        assert_eq!(state.phase, RunPhase::Ready);

        state.start();
        state.toggle_pause();
        assert_eq!(state.phase, RunPhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, RunPhase::Playing);
    }

    #[test]
    fn test_entity_kinds() {
        assert!(EntityKind::Fud.is_hazard());
        assert!(EntityKind::Whale.is_hazard());
        assert!(!EntityKind::Hype.is_hazard());
        assert_eq!(EntityKind::Bonus.points(), 50);
        assert_eq!(EntityKind::Hype.points(), 20);
        assert_eq!(EntityKind::Whale.points(), 0);
    }
}
