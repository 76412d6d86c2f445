//! Hand IK goals for the host animator
//!
//! Only the goals are produced here; solving the limb chain is left to
//! whatever animates the character.

use glam::{Quat, Vec3};
use vantage_core::Transform;

/// A single IK goal in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkGoal {
    pub position: Vec3,
    pub rotation: Quat,
    /// Blend weight for both position and rotation
    pub weight: f32,
}

impl IkGoal {
    fn from_world(target: &Transform, weight: f32) -> Self {
        Self {
            position: target.position,
            rotation: target.rotation,
            weight,
        }
    }
}

/// Goals for both hands; a hand without a target gets `None`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IkPose {
    pub right: Option<IkGoal>,
    pub left: Option<IkGoal>,
}

/// Hand IK targets in player space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandIk {
    pub weight: f32,
    pub right_target: Option<Transform>,
    pub left_target: Option<Transform>,
}

impl Default for HandIk {
    fn default() -> Self {
        Self {
            weight: 1.0,
            right_target: None,
            left_target: None,
        }
    }
}

impl HandIk {
    pub fn new(weight: f32) -> Self {
        Self {
            weight: weight.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Point both hands at new targets (or release them)
    pub fn set_targets(&mut self, right: Option<Transform>, left: Option<Transform>) {
        self.right_target = right;
        self.left_target = left;
    }

    /// World-space goals for a body placed at `body`
    pub fn pose(&self, body: &Transform) -> IkPose {
        let goal = |target: &Transform| IkGoal::from_world(&body.mul_transform(target), self.weight);
        IkPose {
            right: self.right_target.as_ref().map(goal),
            left: self.left_target.as_ref().map(goal),
        }
    }
}
