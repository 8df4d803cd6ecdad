//! Fixed timestep simulation tick
//!
//! Core game loop: move player, spawn, advance, collide, score.

use glam::Vec2;
use rand::Rng;

use super::collision::within_extended_field;
use super::input::{ControlMode, TickInput};
use super::spawn::{hazard_spawn_chance, spawn_bonus, spawn_hazard};
use super::state::{GameEvent, GameState, RunPhase};
use crate::clamp_to_field;
use crate::consts::*;

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    let commands = input.commands;

    match state.phase {
        RunPhase::Ready => {
            if commands.start {
                state.start();
            }
            return;
        }
        RunPhase::GameOver => {
            if commands.restart {
                let seed = state.seed.wrapping_add(state.time_ticks).wrapping_add(1);
                state.restart(seed);
            }
            return;
        }
        RunPhase::Paused => {
            if commands.pause {
                state.toggle_pause();
            }
            return;
        }
        RunPhase::Playing => {
            if commands.pause {
                state.toggle_pause();
                return;
            }
        }
    }

    state.time_ticks += 1;
    state.hit_flash_ticks = state.hit_flash_ticks.saturating_sub(1);

    move_player(state, input);

    // Spawn hazards (rate rises with wave) and, separately, rare bonuses
    let wave = state.wave;
    if state.rng().random_bool(hazard_spawn_chance(wave)) {
        let hazard = spawn_hazard(state.rng(), wave);
        state.entities.push(hazard);
    }
    if state.rng().random_bool(BONUS_SPAWN_CHANCE) {
        let bonus = spawn_bonus(state.rng());
        state.entities.push(bonus);
    }

    // Advance, collide, cull
    let player_box = state.player.bounds();
    let mut lives = state.lives;
    let mut score = state.score;
    let mut events = Vec::new();
    state.entities.retain_mut(|entity| {
        if !entity.is_static() {
            entity.pos += entity.vel;
        }

        if entity.bounds().overlaps(&player_box) {
            if entity.kind.is_hazard() {
                lives = lives.saturating_sub(1);
                events.push(GameEvent::HazardHit {
                    kind: entity.kind,
                    lives_left: lives,
                });
            } else {
                let points = entity.kind.points();
                score += points;
                events.push(GameEvent::BonusCollected {
                    kind: entity.kind,
                    points,
                });
            }
            return false;
        }

        // Bonuses stay until collected
        entity.is_static() || within_extended_field(entity.pos, entity.size)
    });
    if lives < state.lives {
        state.hit_flash_ticks = HIT_FLASH_TICKS;
    }
    state.lives = lives;
    state.score = score;
    state.events.extend(events);

    if state.lives == 0 {
        // A bonus on the fatal tick can still carry the score past the target
        observe_challenge(state);
        state.phase = RunPhase::GameOver;
        log::info!("Run over: score {} at wave {}", state.score, state.wave);
        state.events.push(GameEvent::RunOver {
            score: state.score,
            wave: state.wave,
        });
        return;
    }

    state.score += SCORE_PER_TICK;

    if state.score > state.wave as u64 * WAVE_SCORE_STEP {
        state.wave += 1;
        state.events.push(GameEvent::WaveAdvanced { wave: state.wave });
    }

    observe_challenge(state);
}

/// Mark the challenge beaten the first time score passes the target
fn observe_challenge(state: &mut GameState) {
    let (score, now) = (state.score, state.time_ticks);
    if let Some(challenge) = state.challenge.as_mut() {
        if challenge.observe(score, now) {
            log::info!("Challenge beaten: {} > {}", score, challenge.target());
            state.events.push(GameEvent::ChallengeBeaten {
                target: challenge.target(),
            });
        }
    }
}

/// Apply sampled input to the player position
fn move_player(state: &mut GameState, input: &TickInput) {
    let size = state.player.size;
    match state.control {
        ControlMode::Follow => {
            // Instant 1:1 tracking, no smoothing
            if let Some(target) = input.target {
                let top_left = target - Vec2::splat(size / 2.0);
                state.player.pos = clamp_to_field(top_left, size);
            }
        }
        ControlMode::Jump => {
            let floor = state.jump_floor();
            let mut y = (state.player.pos.y + JUMP_GRAVITY).min(floor);
            for _ in 0..input.commands.jumps {
                y = (y - JUMP_IMPULSE).max(0.0);
            }
            state.player.pos.y = y;
        }
    }
}
