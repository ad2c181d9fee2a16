//! Game settings and preferences
//!
//! Persisted separately from the high score as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::persistence::{load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute everything
    pub muted: bool,

    // === Timing ===
    /// Target ticks per second
    pub target_fps: u32,

    // === Debug ===
    /// Include hitboxes in the draw model
    pub show_hitboxes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.2,
            muted: false,

            target_fps: FPS,

            show_hitboxes: false,
        }
    }
}

impl Settings {
    /// Effective sound effect gain (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Flip music between silent and its default level
    pub fn toggle_music(&mut self) {
        self.music_volume = if self.music_volume == 0.0 {
            Self::default().music_volume
        } else {
            0.0
        };
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match load_json::<Settings>(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring unreadable settings {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to disk; failures are logged
    pub fn save(&self, path: &Path) {
        match save_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Could not save settings: {err}"),
        }
    }
}
