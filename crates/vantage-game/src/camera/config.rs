//! Camera configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vantage_core::EntityId;

use crate::error::{ensure_finite, ConfigError};
use crate::player::MovementMode;

/// How the rig moves toward its target rotation each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraLookMode {
    /// Spherical interpolation at `slerp_speed * dt` per frame
    Slerp,
    /// Snap to the target in one frame
    #[default]
    Instant,
}

/// Settings shared by both perspectives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Maximum pitch angle in degrees
    pub max_pitch: f32,
    /// Minimum pitch angle in degrees
    pub min_pitch: f32,
    /// Camera slot offset in third person, relative to the pitch pivot
    pub third_person_view: Vec3,
    /// Offset of the rig from the player's feet
    pub rig_offset: Vec3,
    /// Slerp rate (1-30 is the useful range)
    pub slerp_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            max_pitch: 90.0,
            min_pitch: -90.0,
            third_person_view: Vec3::new(0.0, 0.0, 2.5), // behind the pivot
            rig_offset: Vec3::new(0.0, 1.0, 0.0),
            slerp_speed: 15.0,
        }
    }
}

impl CameraSettings {
    /// Check clamp bounds and rates
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(self.max_pitch, "max_pitch")?;
        ensure_finite(self.min_pitch, "min_pitch")?;
        ensure_finite(self.slerp_speed, "slerp_speed")?;
        if !self.third_person_view.is_finite() {
            return Err(ConfigError::NotFinite("third_person_view"));
        }
        if !self.rig_offset.is_finite() {
            return Err(ConfigError::NotFinite("rig_offset"));
        }
        if self.min_pitch > self.max_pitch {
            return Err(ConfigError::InvertedPitchClamp {
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }
        if self.slerp_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSlerpSpeed(self.slerp_speed));
        }
        Ok(())
    }
}

/// Per-perspective look settings and visibility swap lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveSettings {
    /// Degrees of yaw per unit of horizontal look input
    pub horizontal_sensitivity: f32,
    /// Degrees of pitch per unit of vertical look input
    pub vertical_sensitivity: f32,
    /// Instant or smoothed look
    pub look_mode: CameraLookMode,
    /// Objects forced invisible when this perspective becomes active
    #[serde(skip)]
    pub objects_to_hide: Vec<EntityId>,
    /// Objects forced visible when this perspective becomes active
    #[serde(skip)]
    pub objects_to_show: Vec<EntityId>,
}

impl Default for PerspectiveSettings {
    fn default() -> Self {
        Self {
            horizontal_sensitivity: 0.5,
            vertical_sensitivity: 0.5,
            look_mode: CameraLookMode::Instant,
            objects_to_hide: Vec::new(),
            objects_to_show: Vec::new(),
        }
    }
}

impl PerspectiveSettings {
    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        ensure_finite(self.horizontal_sensitivity, name)?;
        ensure_finite(self.vertical_sensitivity, name)
    }
}

/// Everything a camera rig needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigConfig {
    pub camera: CameraSettings,
    pub first_person: PerspectiveSettings,
    pub third_person: PerspectiveSettings,
}

impl CameraRigConfig {
    /// Settings of the perspective matching a movement mode
    pub fn perspective(&self, mode: MovementMode) -> &PerspectiveSettings {
        match mode {
            MovementMode::FirstPerson => &self.first_person,
            MovementMode::ThirdPerson => &self.third_person,
        }
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        self.first_person.validate("first_person sensitivity")?;
        self.third_person.validate("third_person sensitivity")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CameraRigConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_clamp_rejected() {
        let mut config = CameraRigConfig::default();
        config.camera.min_pitch = 10.0;
        config.camera.max_pitch = -10.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedPitchClamp { .. })
        ));
    }

    #[test]
    fn test_bad_slerp_speed_rejected() {
        let mut config = CameraRigConfig::default();
        config.camera.slerp_speed = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveSlerpSpeed(0.0)));

        config.camera.slerp_speed = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::NotFinite(_))));
    }

    #[test]
    fn test_nan_sensitivity_rejected() {
        let mut config = CameraRigConfig::default();
        config.third_person.vertical_sensitivity = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::NotFinite(_))));
    }

    #[test]
    fn test_perspective_selection() {
        let mut config = CameraRigConfig::default();
        config.third_person.look_mode = CameraLookMode::Slerp;
        assert_eq!(config.perspective(MovementMode::FirstPerson).look_mode, CameraLookMode::Instant);
        assert_eq!(config.perspective(MovementMode::ThirdPerson).look_mode, CameraLookMode::Slerp);
    }
}
