//! Game settings and preferences
//!
//! Persisted separately from scores, as one JSON blob.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, load_json, save_json};
use crate::sim::ControlMode;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Control scheme for regular runs (challenge runs always jump)
    pub control_mode: ControlMode,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Draw the background grid
    pub show_grid: bool,

    // === Accessibility ===
    /// Reduced motion (no hit flash)
    pub reduced_motion: bool,
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_mode: ControlMode::Follow,
            show_fps: false,
            show_grid: true,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "benji_settings";

    /// Control mode for a run, given whether it's a challenge
    pub fn control_for(&self, challenge: bool) -> ControlMode {
        if challenge {
            ControlMode::Jump
        } else {
            self.control_mode
        }
    }

    /// Effective hit flash (respects reduced_motion)
    pub fn effective_hit_flash(&self) -> bool {
        !self.reduced_motion
    }

    /// Keyboard shortcut toggles. Returns the changed settings, or `None` for other keys.
    pub fn toggled(&self, key: &str) -> Option<Self> {
        let mut next = self.clone();
        match key.to_ascii_lowercase().as_str() {
            "m" => {
                next.control_mode = match self.control_mode {
                    ControlMode::Follow => ControlMode::Jump,
                    ControlMode::Jump => ControlMode::Follow,
                }
            }
            "f" => next.show_fps = !self.show_fps,
            "g" => next.show_grid = !self.show_grid,
            "h" => next.high_contrast = !self.high_contrast,
            "r" => next.reduced_motion = !self.reduced_motion,
            _ => return None,
        }
        Some(next)
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        save_json(store, Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}
