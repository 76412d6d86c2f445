/// Errors raised when a rig component is built from invalid settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("pitch clamp is inverted: min {min} > max {max}")]
    InvertedPitchClamp { min: f32, max: f32 },

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("slerp speed must be positive, got {0}")]
    NonPositiveSlerpSpeed(f32),

    #[error("move speed must not be negative, got {0}")]
    NegativeMoveSpeed(f32),

    #[error("gravity must point down (negative), got {0}")]
    NonNegativeGravity(f32),

    #[error("jump power must not be negative, got {0}")]
    NegativeJumpPower(f32),
}

/// Errors raised when equipping a weapon.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("two-handed equipping is not supported")]
    BothHandsUnsupported,
}

pub(crate) fn ensure_finite(value: f32, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite(name))
    }
}
