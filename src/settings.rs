//! Game settings and preferences
//!
//! Persisted as a small JSON file beside the binary. Out-of-range values
//! in a hand-edited file are rejected with a descriptive error rather
//! than silently clamped; the session then runs on defaults.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Why a settings value was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    VolumeOutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::VolumeOutOfRange { field, value } => {
                write!(f, "{field} must be between 0.0 and 1.0, got {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,

    // === HUD ===
    /// Show the kill-quota progress readout
    pub show_wave_progress: bool,
    /// Show active effect countdowns
    pub show_effect_timers: bool,

    // === Accessibility ===
    /// Skip explosion glyph animation frames
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_wave_progress: true,
            show_effect_timers: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Set the master volume, rejecting out-of-range values.
    pub fn set_master_volume(&mut self, vol: f32) -> Result<(), SettingsError> {
        validate_volume("master_volume", vol)?;
        self.master_volume = vol;
        Ok(())
    }

    /// Set the SFX volume, rejecting out-of-range values.
    pub fn set_sfx_volume(&mut self, vol: f32) -> Result<(), SettingsError> {
        validate_volume("sfx_volume", vol)?;
        self.sfx_volume = vol;
        Ok(())
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_volume("master_volume", self.master_volume)?;
        validate_volume("sfx_volume", self.sfx_volume)?;
        Ok(())
    }

    /// Load settings from a JSON file. A missing file means defaults; a
    /// malformed or out-of-range file is reported and replaced by defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                log::info!("no settings file at {}; using defaults", path.display());
                return Self::default();
            }
        };
        let settings: Settings = match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "settings file {} unreadable: {err}; using defaults",
                    path.display()
                );
                return Self::default();
            }
        };
        if let Err(err) = settings.validate() {
            log::warn!(
                "settings file {} rejected: {err}; using defaults",
                path.display()
            );
            return Self::default();
        }
        log::info!("loaded settings from {}", path.display());
        settings
    }

    /// Save settings as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

fn validate_volume(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::VolumeOutOfRange { field, value })
    }
}
