//! Game settings
//!
//! Stored as JSON. Missing fields take their defaults, so an empty object is a
//! valid settings file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_UPDATE_FREQUENCY, STARTING_LIVES};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("update frequency must be a positive number of Hz, got {0}")]
    InvalidUpdateFrequency(f64),
    #[error("a session needs at least one life")]
    NoLives,
    #[error("lightning period must be zero or positive seconds, got {0}")]
    InvalidLightningPeriod(f64),
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    InvalidVolume { name: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub update_frequency: f64,
    pub starting_lives: u32,
    /// Seconds between periodic lightning bursts; 0 disables them
    pub lightning_period_secs: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// RNG seed; a fixed default when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            update_frequency: DEFAULT_UPDATE_FREQUENCY,
            starting_lives: STARTING_LIVES,
            lightning_period_secs: 12.0,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like `load`, but falls back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("{err}; using default settings");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.update_frequency.is_finite() && self.update_frequency > 0.0) {
            return Err(SettingsError::InvalidUpdateFrequency(self.update_frequency));
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::NoLives);
        }
        if !(self.lightning_period_secs.is_finite() && self.lightning_period_secs >= 0.0) {
            return Err(SettingsError::InvalidLightningPeriod(self.lightning_period_secs));
        }
        for (name, value) in [("master_volume", self.master_volume), ("sfx_volume", self.sfx_volume)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::InvalidVolume { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.update_frequency, 30.0);
        assert_eq!(settings.starting_lives, 5);
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_json(r#"{"starting_lives": 2, "seed": 99}"#).unwrap();
        assert_eq!(settings.starting_lives, 2);
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.lightning_period_secs, 12.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            muted: true,
            seed: Some(7),
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{"update_frequency": 0}"#),
            Err(SettingsError::InvalidUpdateFrequency(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"starting_lives": 0}"#),
            Err(SettingsError::NoLives)
        ));
        assert!(matches!(
            Settings::from_json(r#"{"lightning_period_secs": -1.0}"#),
            Err(SettingsError::InvalidLightningPeriod(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"sfx_volume": 1.5}"#),
            Err(SettingsError::InvalidVolume { name: "sfx_volume", .. })
        ));
        assert!(matches!(Settings::from_json("not json"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("glypha-no-such-settings.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io { .. })));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
