//! GearSource - Stats from equipped items

use crate::source::StatSource;
use crate::stat_block::{StatAccumulator, WeaponStats};
use crate::types::{EquipmentItem, EquipmentSlot};

/// Stats from an item equipped in a slot
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: EquipmentSlot,
    /// The equipped item
    pub item: &'a EquipmentItem,
}

impl<'a> GearSource<'a> {
    /// Create a new gear source
    pub fn new(slot: EquipmentSlot, item: &'a EquipmentItem) -> Self {
        GearSource { slot, item }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        &self.item.id
    }

    fn priority(&self) -> i32 {
        0 // Gear applies at default priority
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.add_attributes(&self.item.attributes());
        stats.armor_flat += self.item.armor;
        stats.attack_power_flat += self.item.attack_power;

        // Only the weapon slot defines the damage range and attack interval
        if matches!(self.slot, EquipmentSlot::Weapon) {
            stats.weapon = Some(WeaponStats {
                damage_min: self.item.damage_min,
                damage_max: self.item.damage_max,
                attack_speed: self.item.attack_speed,
            });
        }
    }
}
