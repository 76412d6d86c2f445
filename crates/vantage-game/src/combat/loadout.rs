//! Primary and secondary weapon picks bound to the weapon keys

use serde::{Deserialize, Serialize};
use vantage_core::EntityId;

use super::equipment::PlayerEquipment;
use super::weapon::WeaponDefinition;

/// Weapons the player can pull out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    pub primary: Option<WeaponDefinition>,
    pub secondary: Option<WeaponDefinition>,
}

impl Loadout {
    pub fn new(primary: WeaponDefinition, secondary: WeaponDefinition) -> Self {
        Self {
            primary: Some(primary),
            secondary: Some(secondary),
        }
    }

    /// Put the primary weapon in the main hand
    pub fn equip_primary(&self, equipment: &mut PlayerEquipment) -> Option<EntityId> {
        self.primary
            .as_ref()
            .map(|definition| equipment.equip_main_hand(definition))
    }

    /// Put the secondary weapon in the main hand
    pub fn equip_secondary(&self, equipment: &mut PlayerEquipment) -> Option<EntityId> {
        self.secondary
            .as_ref()
            .map(|definition| equipment.equip_main_hand(definition))
    }
}
