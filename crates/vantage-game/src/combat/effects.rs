//! Short-lived impact effects left where shots land

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use vantage_core::look_rotation;

/// How long an impact effect stays in the scene
pub const HIT_EFFECT_LIFETIME: f32 = 2.0;

/// Visual flavor of an impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitEffectKind {
    Sparks,
    Dust,
    Splinters,
}

/// A placed impact effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEffect {
    pub kind: HitEffectKind,
    pub position: Vec3,
    /// Faces along the surface normal
    pub rotation: Quat,
    /// Seconds until removal
    pub remaining: f32,
}

/// Live impact effects
#[derive(Debug, Clone)]
pub struct HitEffects {
    effects: Vec<HitEffect>,
    lifetime: f32,
}

impl Default for HitEffects {
    fn default() -> Self {
        Self::with_lifetime(HIT_EFFECT_LIFETIME)
    }
}

impl HitEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifetime(lifetime: f32) -> Self {
        Self {
            effects: Vec::new(),
            lifetime,
        }
    }

    /// Place an effect at a hit point, oriented along the surface normal
    pub fn spawn(&mut self, kind: HitEffectKind, point: Vec3, normal: Vec3) {
        self.effects.push(HitEffect {
            kind,
            position: point,
            rotation: look_rotation(normal, Vec3::Y),
            remaining: self.lifetime,
        });
    }

    /// Age all effects and drop the expired ones
    pub fn tick(&mut self, dt: f32) {
        for effect in &mut self.effects {
            effect.remaining -= dt;
        }
        self.effects.retain(|effect| effect.remaining > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
