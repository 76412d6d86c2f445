//! Sandbox settings with persistence
//!
//! Settings are saved to `~/.config/vantage/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vantage_core::TimeConfig;
use vantage_game::{CameraRigConfig, ControlSettings, Lens, MovementSettings};

/// All sandbox settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxSettings {
    pub camera: CameraRigConfig,
    pub movement: MovementSettings,
    pub controls: ControlSettings,
    pub lens: Lens,
    pub time: TimeConfig,
    pub sandbox: RunSettings,
}

impl SandboxSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vantage"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings; missing sections and fields keep their defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// How the scripted sandbox run behaves
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Frames to simulate
    pub frames: u32,
    /// Fixed frame delta in seconds
    pub frame_time: f32,
    /// Write the effective settings back after the run
    pub save_on_exit: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_time: 1.0 / 60.0,
            save_on_exit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_game::{CameraLookMode, MovementMode};

    #[test]
    fn test_defaults() {
        let settings = SandboxSettings::default();
        assert_eq!(settings.camera.first_person.horizontal_sensitivity, 0.5);
        assert_eq!(settings.camera.first_person.look_mode, CameraLookMode::Instant);
        assert_eq!(settings.movement.move_speed, 2.0);
        assert_eq!(settings.movement.gravity, -9.0);
        assert_eq!(settings.sandbox.frames, 600);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = SandboxSettings::parse(
            r#"
            [movement]
            move_speed = 4.5
            movement_mode = "FirstPerson"

            [camera.third_person]
            look_mode = "Slerp"
            "#,
        )
        .unwrap();

        assert_eq!(settings.movement.move_speed, 4.5);
        assert_eq!(settings.movement.movement_mode, MovementMode::FirstPerson);
        assert_eq!(settings.movement.jump_power, 1.0);
        assert_eq!(settings.camera.third_person.look_mode, CameraLookMode::Slerp);
        assert_eq!(settings.camera.third_person.vertical_sensitivity, 0.5);
        assert_eq!(settings.camera.camera.max_pitch, 90.0);
    }

    #[test]
    fn test_partial_time_section_keeps_other_sections() {
        let settings = SandboxSettings::parse(
            r#"
            [time]
            time_scale = 0.5

            [movement]
            jump_power = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.time.time_scale, 0.5);
        assert_eq!(settings.time.max_delta_time, 0.25);
        assert_eq!(settings.movement.jump_power, 2.0);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        assert!(SandboxSettings::parse("[movement]\nmove_speed = \"fast\"").is_err());
    }
}
