//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Input arrives through an `InputSampler`, never from platform callbacks
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Aabb, within_extended_field};
pub use input::{Commands, ControlMode, InputSampler, PointerInput, TickInput};
pub use spawn::{hazard_spawn_chance, hazard_speed, spawn_bonus, spawn_hazard};
pub use state::{Entity, EntityKind, GameEvent, GameState, Player, RunPhase};
pub use tick::tick;
