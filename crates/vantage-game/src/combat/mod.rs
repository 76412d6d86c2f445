//! Combat module
//!
//! Hand slots, hit-scan weapons, impact effects and the weapon loadout.

pub mod effects;
pub mod equipment;
pub mod loadout;
pub mod weapon;

pub use effects::{HitEffect, HitEffectKind, HitEffects, HIT_EFFECT_LIFETIME};
pub use equipment::{EquipSlot, HandAnchors, PlayerEquipment};
pub use loadout::Loadout;
pub use weapon::{Aim, HandPositions, Shot, WeaponDefinition, WeaponInstance};
