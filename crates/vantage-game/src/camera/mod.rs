//! Camera rig module
//!
//! Yaw/pitch look with per-perspective sensitivity, instant or slerped
//! application, first/third-person slot placement, and screen picking.

mod config;
mod controller;
mod lens;

pub use config::{CameraLookMode, CameraRigConfig, CameraSettings, PerspectiveSettings};
pub use controller::CameraRig;
pub use lens::Lens;
