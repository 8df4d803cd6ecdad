//! Scene assembly: game state to playfield-space vertices

use glam::Vec2;

use super::shapes::{bone, circle, rect, rect_outline, ring};
use super::vertex::{Vertex, colors};
use crate::consts::{BOUNDARY_PADDING, FIELD_HEIGHT, FIELD_WIDTH, STARTING_LIVES};
use crate::settings::Settings;
use crate::sim::{EntityKind, GameState, RunPhase};

/// Grid cell size
pub const GRID_STEP: f32 = 40.0;
/// Challenge progress bar, along the bottom edge
pub const BAR_INSET: f32 = 20.0;
pub const BAR_HEIGHT: f32 = 20.0;
pub const BAR_BOTTOM_GAP: f32 = 30.0;

const CIRCLE_SEGMENTS: u32 = 20;
const PIP_RADIUS: f32 = 8.0;
const PIP_SPACING: f32 = 22.0;

/// Render toggles taken from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    pub show_grid: bool,
    pub hit_flash: bool,
    pub high_contrast: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            hit_flash: true,
            high_contrast: false,
        }
    }
}

impl SceneOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            show_grid: settings.show_grid,
            hit_flash: settings.effective_hit_flash(),
            high_contrast: settings.high_contrast,
        }
    }
}

/// Clear colour behind the scene
pub fn background(opts: &SceneOptions) -> [f32; 4] {
    if opts.high_contrast {
        colors::high_contrast(colors::BACKGROUND)
    } else {
        colors::BACKGROUND
    }
}

/// Build all vertices for one frame, back to front
pub fn build(state: &GameState, opts: &SceneOptions) -> Vec<Vertex> {
    let mut v = Vec::with_capacity(1024);

    if opts.show_grid {
        grid(&mut v);
    }

    // Boundary sits 2 units outside the padded area
    let pad = BOUNDARY_PADDING - 2.0;
    v.extend(rect_outline(
        Vec2::splat(pad),
        Vec2::new(FIELD_WIDTH - pad * 2.0, FIELD_HEIGHT - pad * 2.0),
        2.0,
        colors::BOUNDARY,
    ));

    for entity in &state.entities {
        let c = entity.center();
        let r = entity.size / 2.0;
        match entity.kind {
            EntityKind::Fud => v.extend(circle(c, r, colors::FUD, CIRCLE_SEGMENTS)),
            EntityKind::Whale => {
                v.extend(circle(c, r, colors::WHALE, CIRCLE_SEGMENTS));
                v.extend(ring(c, r * 0.6, r * 0.75, colors::FUD, CIRCLE_SEGMENTS));
            }
            EntityKind::Hype => v.extend(bone(c, entity.size, colors::HYPE)),
            EntityKind::Bonus => {
                v.extend(ring(c, r, r + 3.0, colors::BONUS, CIRCLE_SEGMENTS));
                v.extend(bone(c, entity.size, colors::BONUS));
            }
        }
    }

    player(state, opts, &mut v);
    life_pips(state.lives, &mut v);

    if let Some(challenge) = &state.challenge {
        let track_min = Vec2::new(BAR_INSET, FIELD_HEIGHT - BAR_BOTTOM_GAP);
        let track_w = FIELD_WIDTH - BAR_INSET * 2.0;
        v.extend(rect(track_min, Vec2::new(track_w, BAR_HEIGHT), colors::BAR_TRACK));

        let fill = challenge.fraction(state.score);
        if fill > 0.0 {
            let color = if challenge.is_beaten() {
                colors::BAR_BEATEN
            } else {
                colors::BAR_FILL
            };
            v.extend(rect(track_min, Vec2::new(track_w * fill, BAR_HEIGHT), color));
        }
    }

    let overlay = match state.phase {
        RunPhase::Ready | RunPhase::GameOver => Some(colors::OVERLAY),
        RunPhase::Paused => Some(colors::PAUSE_OVERLAY),
        RunPhase::Playing => None,
    };
    if let Some(color) = overlay {
        v.extend(rect(Vec2::ZERO, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT), color));
    }

    if opts.high_contrast {
        for vertex in &mut v {
            vertex.color = colors::high_contrast(vertex.color);
        }
    }
    v
}

fn grid(v: &mut Vec<Vertex>) {
    let mut x = 0.0;
    while x < FIELD_WIDTH {
        v.extend(rect(Vec2::new(x, 0.0), Vec2::new(1.0, FIELD_HEIGHT), colors::GRID));
        x += GRID_STEP;
    }
    let mut y = 0.0;
    while y < FIELD_HEIGHT {
        v.extend(rect(Vec2::new(0.0, y), Vec2::new(FIELD_WIDTH, 1.0), colors::GRID));
        y += GRID_STEP;
    }
}

fn player(state: &GameState, opts: &SceneOptions, v: &mut Vec<Vertex>) {
    let c = state.player.center();
    let r = state.player.size / 2.0;
    let color = if state.hit_flash_ticks > 0 && opts.hit_flash {
        colors::LIFE
    } else {
        colors::PLAYER
    };

    v.extend(circle(c + Vec2::splat(3.0), r, colors::PLAYER_SHADOW, CIRCLE_SEGMENTS));
    v.extend(circle(c, r, color, CIRCLE_SEGMENTS));
    // Ears
    for side in [-1.0, 1.0] {
        v.extend(circle(
            c + Vec2::new(side * r * 0.7, -r * 0.7),
            r * 0.35,
            color,
            8,
        ));
    }
}

fn life_pips(lives: u8, v: &mut Vec<Vertex>) {
    for i in 0..STARTING_LIVES {
        let center = Vec2::new(
            FIELD_WIDTH - BAR_INSET - i as f32 * PIP_SPACING,
            BAR_INSET + 4.0,
        );
        // Rightmost pip is lost first
        let alive = (STARTING_LIVES - 1 - i) < lives;
        let color = if alive { colors::LIFE } else { colors::LIFE_LOST };
        v.extend(circle(center, PIP_RADIUS, color, 12));
    }
}
