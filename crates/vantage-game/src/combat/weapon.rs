//! Hit-scan weapons
//!
//! A [`WeaponDefinition`] is the prototype; equipping spawns a
//! [`WeaponInstance`] that owns its own firing state and timers.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vantage_core::{look_rotation, EntityId, LayerMask, Transform};
use vantage_physics::SceneQuery;

use crate::camera::Lens;
use crate::target::{HitResponse, TargetRegistry};

use super::effects::{HitEffectKind, HitEffects};

/// Hand placement offsets applied to the hand anchors on equip.
///
/// Rotations are Euler angles in degrees. IK offsets are optional; an
/// absent one falls back to the matching hand offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandPositions {
    pub main_hand_position: Vec3,
    pub main_hand_rotation: Vec3,
    pub off_hand_position: Vec3,
    pub off_hand_rotation: Vec3,
    pub ik_main_hand_position: Option<Vec3>,
    pub ik_main_hand_rotation: Option<Vec3>,
    pub ik_off_hand_position: Option<Vec3>,
    pub ik_off_hand_rotation: Option<Vec3>,
}

/// Weapon prototype
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponDefinition {
    pub name: String,
    pub hand_positions: HandPositions,
    /// Layers the shot ray can hit
    pub layer_mask: LayerMask,
    pub damage: f32,
    /// Stop firing after one shot per press
    pub single_burst: bool,
    /// Seconds after a shot during which presses are ignored
    pub recoil_duration: f32,
    pub reload_duration: f32,
    pub hit_effect: Option<HitEffectKind>,
    pub max_range: f32,
}

impl Default for WeaponDefinition {
    fn default() -> Self {
        Self {
            name: "Weapon".to_string(),
            hand_positions: HandPositions::default(),
            layer_mask: LayerMask::ALL,
            damage: 10.0,
            single_burst: false,
            recoil_duration: 0.0,
            reload_duration: 1.5,
            hit_effect: Some(HitEffectKind::Sparks),
            max_range: f32::INFINITY,
        }
    }
}

/// Where the player is aiming this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    /// Cursor position in pixels, top-left origin
    pub cursor: Vec2,
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// World transform of the camera
    pub camera: Transform,
}

/// Result of one shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shot {
    /// Nothing within range
    Miss,
    /// A registered hittable took the hit
    Struck { entity: EntityId, response: HitResponse },
    /// Scenery was hit
    Surface { point: Vec3, effect: Option<HitEffectKind> },
}

/// A live weapon held in a hand slot
#[derive(Debug, Clone)]
pub struct WeaponInstance {
    id: EntityId,
    definition: WeaponDefinition,
    firing: bool,
    recoil_remaining: f32,
    reload_remaining: f32,
    /// Bound camera lens; `None` while unequipped
    lens: Option<Lens>,
    /// Placement relative to the player
    pub local: Transform,
}

impl WeaponInstance {
    /// Spawn a fresh copy of a prototype
    pub fn new(definition: &WeaponDefinition) -> Self {
        Self {
            id: EntityId::new(),
            definition: definition.clone(),
            firing: false,
            recoil_remaining: 0.0,
            reload_remaining: 0.0,
            lens: None,
            local: Transform::default(),
        }
    }

    /// Bind the camera and point the weapon at `look_at` (player space)
    pub fn equip(&mut self, lens: Lens, look_at: Vec3) {
        self.lens = Some(lens);
        self.local.rotation = look_rotation(look_at - self.local.position, Vec3::Y);
    }

    /// Unbind the camera and stop firing
    pub fn unequip(&mut self) {
        self.lens = None;
        self.firing = false;
    }

    /// Fire button state. Presses during recoil are dropped; releases
    /// always stop firing. Ignored while unequipped.
    pub fn fire_input(&mut self, pressed: bool) {
        if self.lens.is_none() {
            return;
        }
        if !pressed {
            self.firing = false;
            return;
        }
        if self.is_recoiling() {
            return;
        }
        self.firing = true;
    }

    /// Start a reload unless one is already running
    pub fn reload(&mut self) {
        if self.is_reloading() || self.definition.reload_duration <= 0.0 {
            return;
        }
        self.reload_remaining = self.definition.reload_duration;
        info!("Reloading {}", self.definition.name);
    }

    /// Advance timers and fire once if the trigger is held
    pub fn tick(
        &mut self,
        dt: f32,
        aim: &Aim,
        world: &mut impl SceneQuery,
        targets: &mut TargetRegistry,
        effects: &mut HitEffects,
    ) -> Option<Shot> {
        self.recoil_remaining = (self.recoil_remaining - dt).max(0.0);
        self.reload_remaining = (self.reload_remaining - dt).max(0.0);

        if !self.firing {
            return None;
        }
        self.fire(aim, world, targets, effects)
    }

    fn fire(
        &mut self,
        aim: &Aim,
        world: &mut impl SceneQuery,
        targets: &mut TargetRegistry,
        effects: &mut HitEffects,
    ) -> Option<Shot> {
        let lens = self.lens?;
        if self.is_reloading() || self.is_recoiling() {
            return None;
        }
        if self.definition.single_burst {
            self.firing = false;
        }

        let ray = lens.screen_point_to_ray(aim.cursor, aim.viewport, &aim.camera);
        let shot = match world.cast(&ray, self.definition.max_range, self.definition.layer_mask) {
            None => Shot::Miss,
            Some(hit) => match hit.entity.filter(|&entity| targets.is_hittable(entity)) {
                Some(entity) => {
                    let response = targets
                        .hit(entity, self.definition.damage)
                        .unwrap_or(HitResponse::Absorbed);
                    if response == HitResponse::Destroyed {
                        world.despawn(entity);
                    }
                    Shot::Struck { entity, response }
                }
                None => {
                    if let Some(kind) = self.definition.hit_effect {
                        effects.spawn(kind, hit.point, hit.normal);
                    }
                    Shot::Surface {
                        point: hit.point,
                        effect: self.definition.hit_effect,
                    }
                }
            },
        };

        debug!("{} fired: {:?}", self.definition.name, shot);
        self.recoil_remaining = self.definition.recoil_duration;
        Some(shot)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn definition(&self) -> &WeaponDefinition {
        &self.definition
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn is_recoiling(&self) -> bool {
        self.recoil_remaining > 0.0
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining > 0.0
    }

    /// Whether a camera is bound
    pub fn is_equipped(&self) -> bool {
        self.lens.is_some()
    }
}
