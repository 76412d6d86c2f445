//! Movement configuration

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ConfigError};

/// Perspective the player moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementMode {
    /// Strafe relative to the camera; the body never turns from movement
    FirstPerson,
    /// Turn to face the input direction, then walk forward
    #[default]
    ThirdPerson,
}

impl MovementMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            MovementMode::FirstPerson => MovementMode::ThirdPerson,
            MovementMode::ThirdPerson => MovementMode::FirstPerson,
        }
    }
}

/// Movement settings. The movement controller is the only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Walking speed in meters per second
    pub move_speed: f32,
    /// Vertical acceleration (negative = down)
    pub gravity: f32,
    /// Whether gravity is integrated at all
    pub use_gravity: bool,
    /// Jump apex height in meters
    pub jump_power: f32,
    /// Current movement mode
    pub movement_mode: MovementMode,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            gravity: -9.0,
            use_gravity: true,
            jump_power: 1.0,
            movement_mode: MovementMode::ThirdPerson,
        }
    }
}

impl MovementSettings {
    /// Initial vertical velocity that reaches `jump_power` meters at the apex
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_power * -2.0 * self.gravity).sqrt()
    }

    /// Check speeds and gravity
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(self.move_speed, "move_speed")?;
        ensure_finite(self.gravity, "gravity")?;
        ensure_finite(self.jump_power, "jump_power")?;
        if self.move_speed < 0.0 {
            return Err(ConfigError::NegativeMoveSpeed(self.move_speed));
        }
        if self.gravity >= 0.0 {
            return Err(ConfigError::NonNegativeGravity(self.gravity));
        }
        if self.jump_power < 0.0 {
            return Err(ConfigError::NegativeJumpPower(self.jump_power));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(MovementMode::FirstPerson.toggled(), MovementMode::ThirdPerson);
        assert_eq!(MovementMode::ThirdPerson.toggled(), MovementMode::FirstPerson);
    }

    #[test]
    fn test_jump_velocity() {
        let settings = MovementSettings {
            jump_power: 2.0,
            gravity: -9.0,
            ..Default::default()
        };
        assert!((settings.jump_velocity() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_validation() {
        assert!(MovementSettings::default().validate().is_ok());

        let upward = MovementSettings {
            gravity: 1.0,
            ..Default::default()
        };
        assert_eq!(upward.validate(), Err(ConfigError::NonNegativeGravity(1.0)));

        let backwards = MovementSettings {
            move_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(backwards.validate(), Err(ConfigError::NegativeMoveSpeed(-1.0)));

        let sunk = MovementSettings {
            jump_power: -0.5,
            ..Default::default()
        };
        assert_eq!(sunk.validate(), Err(ConfigError::NegativeJumpPower(-0.5)));
    }
}
