//! Vantage Game - Player rig logic
//!
//! Camera rig, movement, weapons, targets, input mapping and the player
//! router that drives them once per frame.

pub mod camera;
pub mod combat;
pub mod error;
pub mod ik;
pub mod input;
pub mod interaction;
pub mod player;
pub mod target;
pub mod visibility;

pub use camera::{CameraLookMode, CameraRig, CameraRigConfig, CameraSettings, Lens, PerspectiveSettings};
pub use combat::{
    Aim, EquipSlot, HandAnchors, HandPositions, HitEffectKind, HitEffects, Loadout,
    PlayerEquipment, Shot, WeaponDefinition, WeaponInstance,
};
pub use error::{ConfigError, EquipError};
pub use ik::{HandIk, IkGoal, IkPose};
pub use input::{ControlSettings, InputAction, InputBindings, InputHandler, PlayerInput};
pub use interaction::InteractionProbe;
pub use player::{
    CursorMode, FrameOutput, MovementController, MovementMode, MovementSettings, Player,
    PlayerConfig,
};
pub use target::{Dummy, Enemy, HitResponse, Hittable, Switch, Target, TargetRegistry, Usable};
pub use visibility::SceneVisibility;
