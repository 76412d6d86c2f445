//! Vantage Core - Core types and utilities for the Vantage player rig
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Transform, look rotation and Euler helpers
//! - Rays, layer masks and entity IDs for scene queries
//! - Frame time with a time scale

pub mod time;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use time::{GameTime, TimeConfig};
pub use types::{euler_degrees, look_rotation, EntityId, LayerMask, Ray, Transform};
