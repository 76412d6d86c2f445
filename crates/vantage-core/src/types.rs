//! Core types used throughout Vantage

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for scene entities (targets, weapons, visibility objects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Pack the ID into 128 bits (used for physics collider user data)
    pub fn to_bits(self) -> u128 {
        self.0.as_u128()
    }

    /// Unpack an ID from 128 bits. Zero is reserved for "no entity".
    pub fn from_bits(bits: u128) -> Option<Self> {
        if bits == 0 {
            None
        } else {
            Some(Self(Uuid::from_u128(bits)))
        }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform component representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a position and Euler angles in degrees (pitch, yaw, roll)
    pub fn from_position_euler_degrees(position: Vec3, euler: Vec3) -> Self {
        Self::from_position_rotation(position, euler_degrees(euler))
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Transform a point from local space into the parent space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (point * self.scale)
    }

    /// Compose a child transform expressed in this transform's local space
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }
}

/// Build a rotation from Euler angles in degrees.
///
/// `x` is pitch (positive looks up), `y` is yaw (positive turns right),
/// `z` is roll. Applied in yaw, pitch, roll order.
pub fn euler_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        glam::EulerRot::YXZ,
        -euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

/// Rotation that points local forward (-Z) along `forward` with `up` kept as
/// close to local +Y as possible.
///
/// Returns the identity for a zero or non-finite forward vector. When
/// `forward` is parallel to `up`, a fallback up axis is used.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(forward) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };

    let mut right = forward.cross(up);
    if right.length_squared() < 1e-8 {
        right = forward.cross(Vec3::Z);
        if right.length_squared() < 1e-8 {
            right = forward.cross(Vec3::X);
        }
    }
    let right = right.normalize();
    let up = right.cross(forward);

    Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
}

/// A ray with an origin and a (normalized) direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Bitmask of collision layers used to filter ray casts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing only the given layer (0..32)
    pub const fn layer(index: u32) -> Self {
        LayerMask(1 << (index & 31))
    }

    /// Whether any layer of `other` is in this mask
    pub fn contains(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Raw bits
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}
