//! Game settings
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::default_texture_sizes;
use crate::platform::MAX_PRESENT_INTERVAL;
use crate::textures::TextureSize;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("present interval {0} is out of range (0-{MAX_PRESENT_INTERVAL})")]
    PresentInterval(u32),
    #[error("frame timestep must be positive, got {0}")]
    FrameDt(f32),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Vsync interval (0 = unsynced, 1-4 = every nth refresh)
    pub present_interval: u32,
    /// Print the active obstacle list's count and capacity on the HUD
    pub show_list_stats: bool,

    // === Headless run ===
    /// Seconds per frame
    pub frame_dt: f32,
    /// Frames to simulate
    pub frames: u32,

    /// Texture sizes by file name
    pub textures: BTreeMap<String, TextureSize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            present_interval: 1,
            show_list_stats: true,
            frame_dt: 1.0 / 60.0,
            frames: 60 * 60,
            textures: default_texture_sizes(),
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.as_ref().display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.present_interval > MAX_PRESENT_INTERVAL {
            return Err(SettingsError::PresentInterval(self.present_interval));
        }
        if self.frame_dt.is_nan() || self.frame_dt <= 0.0 {
            return Err(SettingsError::FrameDt(self.frame_dt));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.seed = Some(1234);
        settings.show_list_stats = false;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "present_interval": 0 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.present_interval, 0);
        assert!(settings.show_list_stats);
        assert_eq!(settings.textures, default_texture_sizes());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "present_interval": 9 }"#),
            Err(SettingsError::PresentInterval(9))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "frame_dt": 0.0 }"#),
            Err(SettingsError::FrameDt(_))
        ));
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));

        let settings = Settings {
            frame_dt: f32::NAN,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::FrameDt(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("koala-jones-missing-settings.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let file = format!("koala-jones-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file);
        let mut settings = Settings::default();
        settings.frames = 10;
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
