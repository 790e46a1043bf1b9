//! Game settings and preferences
//!
//! Loaded once at startup from an optional JSON file; there is no
//! write-back, preferences live for the process only.

use serde::{Deserialize, Serialize};

/// Default settings file looked up next to the working directory
const SETTINGS_FILE: &str = "gemfall-settings.json";
/// Environment variable overriding the settings file path
const SETTINGS_ENV: &str = "GEMFALL_SETTINGS";

/// Volume and display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Show the FPS counter
    pub show_fps: bool,
    /// Suppress the full-screen explosion flash (accessibility)
    pub reduced_flash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            show_fps: false,
            reduced_flash: false,
        }
    }
}

impl Settings {
    /// Load from `$GEMFALL_SETTINGS` or `gemfall-settings.json`,
    /// falling back to defaults on any failure.
    pub fn load() -> Self {
        let path = std::env::var(SETTINGS_ENV).unwrap_or_else(|_| SETTINGS_FILE.to_string());
        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {path}");
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings file {path}: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Sound-effect gain after master volume and mute
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Music gain after master volume and mute
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Whether the explosion flash should draw at all
    pub fn flash_enabled(&self) -> bool {
        !self.reduced_flash
    }
}
