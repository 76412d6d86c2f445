//! Engine boundary traits
//!
//! The player rig never talks to rapier directly. It moves a
//! [`CharacterBody`] and casts rays into a [`SceneQuery`]; the sandbox backs
//! both with [`crate::PhysicsScene`], tests back them with small doubles.

use glam::{Quat, Vec3};
use vantage_core::{EntityId, LayerMask, Ray};

/// A collision-resolving character body
pub trait CharacterBody {
    /// Feet position in world space
    fn position(&self) -> Vec3;

    /// Facing rotation
    fn rotation(&self) -> Quat;

    /// Snap the facing rotation
    fn set_rotation(&mut self, rotation: Quat);

    /// Facing forward direction (-Z of the rotation)
    fn forward(&self) -> Vec3 {
        self.rotation() * -Vec3::Z
    }

    /// Move by a desired displacement, resolving collisions and refreshing
    /// the grounded flag
    fn move_by(&mut self, displacement: Vec3, dt: f32);

    /// Whether the last move ended in contact with the ground
    fn is_grounded(&self) -> bool;
}

/// Nearest hit returned by a scene ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Entity attached to the hit collider, if any
    pub entity: Option<EntityId>,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
    /// Distance along the ray
    pub distance: f32,
}

/// Ray queries against collidable scene geometry
pub trait SceneQuery {
    /// Cast a ray and return the nearest hit on the given layers
    fn cast(&self, ray: &Ray, max_distance: f32, layers: LayerMask) -> Option<SceneHit>;

    /// Remove an entity's colliders from the scene
    fn despawn(&mut self, entity: EntityId);
}
