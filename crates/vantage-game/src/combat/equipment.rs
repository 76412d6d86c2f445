//! Hand slots and the anchors weapons are parented to
//!
//! Equipping copies the weapon's hand offsets onto all four anchors and
//! replaces whatever the targeted hand held before. The other hand keeps
//! its weapon.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vantage_core::{euler_degrees, EntityId, Transform};
use vantage_physics::SceneQuery;

use crate::camera::Lens;
use crate::error::EquipError;
use crate::target::TargetRegistry;

use super::effects::HitEffects;
use super::weapon::{Aim, HandPositions, Shot, WeaponDefinition, WeaponInstance};

/// Where a weapon goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    MainHand,
    OffHand,
    /// Two-handed grip. Not supported; equipping into it is an error.
    BothHands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hand {
    Main,
    Off,
}

/// Hand anchors in player space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandAnchors {
    pub main_hand: Transform,
    pub ik_main_hand: Transform,
    pub off_hand: Transform,
    pub ik_off_hand: Transform,
}

impl HandAnchors {
    /// Copy a weapon's hand offsets onto every anchor
    fn apply(&mut self, hands: &HandPositions) {
        self.main_hand = Transform::from_position_euler_degrees(
            hands.main_hand_position,
            hands.main_hand_rotation,
        );
        self.off_hand = Transform::from_position_euler_degrees(
            hands.off_hand_position,
            hands.off_hand_rotation,
        );

        self.ik_main_hand = Transform::from_position_rotation(
            hands.ik_main_hand_position.unwrap_or(hands.main_hand_position),
            euler_degrees(hands.ik_main_hand_rotation.unwrap_or(hands.main_hand_rotation)),
        );
        self.ik_off_hand = Transform::from_position_rotation(
            hands.ik_off_hand_position.unwrap_or(hands.off_hand_position),
            euler_degrees(hands.ik_off_hand_rotation.unwrap_or(hands.off_hand_rotation)),
        );
    }
}

/// Weapons currently held by the player
#[derive(Debug, Clone, Default)]
pub struct PlayerEquipment {
    anchors: HandAnchors,
    main_hand: Option<WeaponInstance>,
    off_hand: Option<WeaponInstance>,
    /// Camera lens handed to every equipped weapon
    lens: Lens,
}

impl PlayerEquipment {
    pub fn new(lens: Lens) -> Self {
        Self {
            lens,
            ..Default::default()
        }
    }

    /// Spawn a fresh instance of `definition` into `slot`.
    ///
    /// Any weapon already in that hand is unequipped and dropped.
    pub fn equip(
        &mut self,
        definition: &WeaponDefinition,
        slot: EquipSlot,
    ) -> Result<EntityId, EquipError> {
        match slot {
            EquipSlot::MainHand => Ok(self.slot_weapon(definition, Hand::Main)),
            EquipSlot::OffHand => Ok(self.slot_weapon(definition, Hand::Off)),
            EquipSlot::BothHands => Err(EquipError::BothHandsUnsupported),
        }
    }

    pub fn equip_main_hand(&mut self, definition: &WeaponDefinition) -> EntityId {
        self.slot_weapon(definition, Hand::Main)
    }

    pub fn equip_off_hand(&mut self, definition: &WeaponDefinition) -> EntityId {
        self.slot_weapon(definition, Hand::Off)
    }

    fn slot_weapon(&mut self, definition: &WeaponDefinition, hand: Hand) -> EntityId {
        if let Some(mut previous) = self.hand_mut(hand).take() {
            previous.unequip();
            debug!("Dropped {} from {:?}", previous.definition().name, hand);
        }

        self.anchors.apply(&definition.hand_positions);
        let mount = match hand {
            Hand::Main => self.anchors.main_hand.position,
            Hand::Off => self.anchors.off_hand.position,
        };

        let mut weapon = WeaponInstance::new(definition);
        weapon.local = Transform::from_position(mount);
        weapon.equip(self.lens, self.anchors.off_hand.position);

        let id = weapon.id();
        info!("Equipped {} in {:?}", definition.name, hand);
        *self.hand_mut(hand) = Some(weapon);
        id
    }

    /// Take the weapon out of a hand
    pub fn unequip(&mut self, slot: EquipSlot) -> Result<Option<WeaponInstance>, EquipError> {
        let hand = match slot {
            EquipSlot::MainHand => Hand::Main,
            EquipSlot::OffHand => Hand::Off,
            EquipSlot::BothHands => return Err(EquipError::BothHandsUnsupported),
        };
        let mut weapon = self.hand_mut(hand).take();
        if let Some(weapon) = weapon.as_mut() {
            weapon.unequip();
            info!("Unequipped {} from {:?}", weapon.definition().name, slot);
        }
        Ok(weapon)
    }

    /// Forward the fire button to every held weapon
    pub fn fire_input(&mut self, pressed: bool) {
        for weapon in self.weapons_mut() {
            weapon.fire_input(pressed);
        }
    }

    /// Reload every held weapon
    pub fn reload(&mut self) {
        for weapon in self.weapons_mut() {
            weapon.reload();
        }
    }

    /// Run each held weapon's fire path for this frame
    pub fn tick(
        &mut self,
        dt: f32,
        aim: &Aim,
        world: &mut impl SceneQuery,
        targets: &mut TargetRegistry,
        effects: &mut HitEffects,
    ) -> Vec<Shot> {
        let mut shots = Vec::new();
        for weapon in self.weapons_mut() {
            if let Some(shot) = weapon.tick(dt, aim, world, targets, effects) {
                shots.push(shot);
            }
        }
        shots
    }

    /// Weapon held in a hand (`BothHands` never holds one)
    pub fn equipped(&self, slot: EquipSlot) -> Option<&WeaponInstance> {
        match slot {
            EquipSlot::MainHand => self.main_hand.as_ref(),
            EquipSlot::OffHand => self.off_hand.as_ref(),
            EquipSlot::BothHands => None,
        }
    }

    pub fn anchors(&self) -> &HandAnchors {
        &self.anchors
    }

    /// Replace the lens; held weapons are rebound to it
    pub fn set_lens(&mut self, lens: Lens) {
        self.lens = lens;
        let look_at = self.anchors.off_hand.position;
        for weapon in self.weapons_mut() {
            weapon.equip(lens, look_at);
        }
    }

    pub fn lens(&self) -> Lens {
        self.lens
    }

    /// Number of weapons held
    pub fn weapon_count(&self) -> usize {
        self.main_hand.is_some() as usize + self.off_hand.is_some() as usize
    }

    fn hand_mut(&mut self, hand: Hand) -> &mut Option<WeaponInstance> {
        match hand {
            Hand::Main => &mut self.main_hand,
            Hand::Off => &mut self.off_hand,
        }
    }

    fn weapons_mut(&mut self) -> impl Iterator<Item = &mut WeaponInstance> {
        self.main_hand.iter_mut().chain(self.off_hand.iter_mut())
    }
}
