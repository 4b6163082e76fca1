//! CharacterBuildState - The caller-owned build a UI edits between recomputes

use crate::config::BaseConfig;
use crate::curves::constants::ATTRIBUTE_FLOOR;
use crate::stat_block::{aggregate_attributes, compute_stats, DerivedStats};
use crate::types::{Attribute, AttributeSet, Buff, Equipment, EquipmentItem, EquipmentSlot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest level without rebirth
pub const MAX_LEVEL: u32 = 60;
/// Highest level after rebirth
pub const MAX_REBIRTH_LEVEL: u32 = 80;
/// Most buffs that may be active at once
pub const MAX_ACTIVE_BUFFS: usize = 5;

/// A rejected build edit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("level {level} is outside 1..={max}")]
    LevelOutOfRange { level: u32, max: u32 },
    #[error("{attribute} cannot go below {floor} (requested {value})")]
    AttributeBelowFloor {
        attribute: Attribute,
        value: i32,
        floor: i32,
    },
    #[error("at most {max} buffs can be active")]
    TooManyBuffs { max: usize },
    #[error("buff {0} is already active")]
    BuffAlreadyActive(String),
    #[error("{item} is a {item_slot:?} item and cannot go in the {slot:?} slot")]
    SlotMismatch {
        item: String,
        item_slot: EquipmentSlot,
        slot: EquipmentSlot,
    },
}

/// A requirement an item has that the build does not meet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmetRequirement {
    Level { required: i32, actual: u32 },
    Attribute {
        attribute: Attribute,
        required: i32,
        actual: i32,
    },
}

/// Level, rebirth flag, allocated attributes, equipment and active buffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterBuildState {
    level: u32,
    rebirth: bool,
    allocated: AttributeSet,
    #[serde(default)]
    equipment: Equipment,
    /// Activation order; earlier buffs take precedence for attack speed
    #[serde(default)]
    active_buffs: Vec<Buff>,
}

impl Default for CharacterBuildState {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterBuildState {
    /// A level 1 character with every attribute at the floor
    pub fn new() -> Self {
        CharacterBuildState {
            level: 1,
            rebirth: false,
            allocated: AttributeSet::baseline(),
            equipment: Equipment::new(),
            active_buffs: Vec::new(),
        }
    }

    /// Highest level allowed for a rebirth flag
    pub fn max_level_for(rebirth: bool) -> u32 {
        if rebirth {
            MAX_REBIRTH_LEVEL
        } else {
            MAX_LEVEL
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn rebirth(&self) -> bool {
        self.rebirth
    }

    pub fn max_level(&self) -> u32 {
        Self::max_level_for(self.rebirth)
    }

    pub fn set_level(&mut self, level: u32) -> Result<(), BuildError> {
        let max = self.max_level();
        if level < 1 || level > max {
            return Err(BuildError::LevelOutOfRange { level, max });
        }
        self.level = level;
        Ok(())
    }

    /// Toggle rebirth; leaving rebirth clamps the level to the normal cap
    pub fn set_rebirth(&mut self, rebirth: bool) {
        self.rebirth = rebirth;
        if self.level > self.max_level() {
            tracing::debug!(from = self.level, to = self.max_level(), "level clamped after rebirth change");
            self.level = self.max_level();
        }
    }

    // === Attributes ===

    pub fn allocated(&self) -> &AttributeSet {
        &self.allocated
    }

    /// Set one allocated attribute; values below the floor are rejected
    pub fn set_attribute(&mut self, attribute: Attribute, value: i32) -> Result<(), BuildError> {
        if value < ATTRIBUTE_FLOOR {
            return Err(BuildError::AttributeBelowFloor {
                attribute,
                value,
                floor: ATTRIBUTE_FLOOR,
            });
        }
        self.allocated.set(attribute, value);
        Ok(())
    }

    /// Add (or with a negative amount, remove) points on one attribute
    pub fn adjust_attribute(&mut self, attribute: Attribute, amount: i32) -> Result<(), BuildError> {
        let value = self.allocated.get(attribute).saturating_add(amount);
        self.set_attribute(attribute, value)
    }

    /// Points allocated above the floor across all attributes
    pub fn points_allocated(&self) -> i32 {
        Attribute::all()
            .iter()
            .map(|a| self.allocated.surplus(*a))
            .fold(0, i32::saturating_add)
    }

    /// Put every attribute back to the floor
    pub fn reset_attributes(&mut self) {
        self.allocated = AttributeSet::baseline();
    }

    // === Equipment ===

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&EquipmentItem> {
        self.equipment.get(&slot)
    }

    /// Equip an item to its slot, returning whatever it replaced
    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item: EquipmentItem,
    ) -> Result<Option<EquipmentItem>, BuildError> {
        if item.slot != slot {
            return Err(BuildError::SlotMismatch {
                item: item.name.clone(),
                item_slot: item.slot,
                slot,
            });
        }
        Ok(self.equipment.insert(slot, item))
    }

    /// Unequip an item from a slot, returning it if present
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentItem> {
        self.equipment.remove(&slot)
    }

    // === Buffs ===

    pub fn active_buffs(&self) -> &[Buff] {
        &self.active_buffs
    }

    pub fn is_buff_active(&self, name: &str) -> bool {
        self.active_buffs.iter().any(|b| b.name == name)
    }

    /// Activate a buff at the end of the active list
    pub fn activate_buff(&mut self, buff: Buff) -> Result<(), BuildError> {
        if self.is_buff_active(&buff.name) {
            return Err(BuildError::BuffAlreadyActive(buff.name));
        }
        if self.active_buffs.len() >= MAX_ACTIVE_BUFFS {
            return Err(BuildError::TooManyBuffs {
                max: MAX_ACTIVE_BUFFS,
            });
        }
        self.active_buffs.push(buff);
        Ok(())
    }

    /// Deactivate a buff by name; returns whether it was active
    pub fn deactivate_buff(&mut self, name: &str) -> bool {
        let before = self.active_buffs.len();
        self.active_buffs.retain(|b| b.name != name);
        self.active_buffs.len() != before
    }

    /// Activate an inactive buff or deactivate an active one
    ///
    /// Returns whether the buff is active afterwards.
    pub fn toggle_buff(&mut self, buff: &Buff) -> Result<bool, BuildError> {
        if self.deactivate_buff(&buff.name) {
            return Ok(false);
        }
        self.activate_buff(buff.clone())?;
        Ok(true)
    }

    pub fn clear_buffs(&mut self) {
        self.active_buffs.clear();
    }

    // === Derived ===

    /// Allocated + equipment + buff attributes
    pub fn final_attributes(&self) -> AttributeSet {
        aggregate_attributes(&self.allocated, &self.equipment, &self.active_buffs)
    }

    /// Requirements of `item` this build does not meet
    ///
    /// Informational: equipping never checks requirements.
    pub fn unmet_requirements(&self, item: &EquipmentItem) -> Vec<UnmetRequirement> {
        let mut unmet = Vec::new();
        if item.level > 0 && item.level as i64 > self.level as i64 {
            unmet.push(UnmetRequirement::Level {
                required: item.level,
                actual: self.level,
            });
        }

        let attributes = self.final_attributes();
        let required = item.requirements();
        for attribute in Attribute::all() {
            let needed = required.get(*attribute);
            let actual = attributes.get(*attribute);
            if needed > 0 && actual < needed {
                unmet.push(UnmetRequirement::Attribute {
                    attribute: *attribute,
                    required: needed,
                    actual,
                });
            }
        }
        unmet
    }

    /// Compute derived stats for the current build
    pub fn compute(&self, config: &BaseConfig) -> DerivedStats {
        compute_stats(
            self.level,
            self.rebirth,
            &self.allocated,
            &self.equipment,
            &self.active_buffs,
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuffCategory;

    fn weapon(id: &str, level: i32, req_strength: i32) -> EquipmentItem {
        EquipmentItem {
            id: id.to_string(),
            name: id.to_string(),
            level,
            slot: EquipmentSlot::Weapon,
            subtype: "Axe".to_string(),
            stamina: 0,
            strength: 2,
            intelligence: 0,
            agility: 0,
            armor: 0.0,
            attack_power: 0.0,
            damage_min: 20.0,
            damage_max: 30.0,
            attack_speed: Some(2000.0),
            req_stamina: 0,
            req_strength,
            req_intelligence: 0,
            req_agility: 0,
            sprite: String::new(),
        }
    }

    fn buff(name: &str) -> Buff {
        Buff::new(name, BuffCategory::Buff)
    }

    #[test]
    fn test_level_bounds() {
        let mut build = CharacterBuildState::new();
        assert!(build.set_level(60).is_ok());
        assert_eq!(
            build.set_level(61),
            Err(BuildError::LevelOutOfRange { level: 61, max: 60 })
        );
        assert!(build.set_level(0).is_err());

        build.set_rebirth(true);
        assert!(build.set_level(80).is_ok());
        assert!(build.set_level(81).is_err());
    }

    #[test]
    fn test_leaving_rebirth_clamps_level() {
        let mut build = CharacterBuildState::new();
        build.set_rebirth(true);
        build.set_level(75).unwrap();

        build.set_rebirth(false);
        assert_eq!(build.level(), 60);
    }

    #[test]
    fn test_attribute_floor() {
        let mut build = CharacterBuildState::new();
        assert!(build.set_attribute(Attribute::Strength, 35).is_ok());
        assert!(matches!(
            build.set_attribute(Attribute::Strength, 19),
            Err(BuildError::AttributeBelowFloor { value: 19, .. })
        ));
        assert_eq!(build.allocated().strength, 35);

        assert!(build.adjust_attribute(Attribute::Agility, -1).is_err());
        assert!(build.adjust_attribute(Attribute::Agility, 5).is_ok());
        assert_eq!(build.points_allocated(), 20);
    }

    #[test]
    fn test_reset_attributes() {
        let mut build = CharacterBuildState::new();
        build.set_attribute(Attribute::Stamina, 50).unwrap();
        build.reset_attributes();
        assert_eq!(build.allocated(), &AttributeSet::baseline());
        assert_eq!(build.points_allocated(), 0);
    }

    #[test]
    fn test_buff_limit() {
        let mut build = CharacterBuildState::new();
        for i in 0..MAX_ACTIVE_BUFFS {
            build.activate_buff(buff(&format!("buff_{}", i))).unwrap();
        }
        assert_eq!(
            build.activate_buff(buff("one_too_many")),
            Err(BuildError::TooManyBuffs { max: 5 })
        );
        assert_eq!(build.active_buffs().len(), 5);
    }

    #[test]
    fn test_buff_toggle() {
        let mut build = CharacterBuildState::new();
        let haste = buff("Haste");

        assert_eq!(build.toggle_buff(&haste), Ok(true));
        assert!(build.is_buff_active("Haste"));
        assert_eq!(
            build.activate_buff(haste.clone()),
            Err(BuildError::BuffAlreadyActive("Haste".to_string()))
        );
        assert_eq!(build.toggle_buff(&haste), Ok(false));
        assert!(!build.is_buff_active("Haste"));
    }

    #[test]
    fn test_buff_order_is_activation_order() {
        let mut build = CharacterBuildState::new();
        build.activate_buff(buff("B")).unwrap();
        build.activate_buff(buff("A")).unwrap();
        build.activate_buff(buff("C")).unwrap();
        build.deactivate_buff("A");

        let names: Vec<&str> = build.active_buffs().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_equip_and_replace() {
        let mut build = CharacterBuildState::new();
        let first = weapon("axe", 1, 0);
        let second = weapon("better_axe", 1, 0);

        assert_eq!(build.equip(EquipmentSlot::Weapon, first.clone()), Ok(None));
        assert_eq!(build.equip(EquipmentSlot::Weapon, second), Ok(Some(first)));
        assert_eq!(build.equipped(EquipmentSlot::Weapon).map(|i| i.id.as_str()), Some("better_axe"));

        assert!(build.unequip(EquipmentSlot::Weapon).is_some());
        assert!(build.unequip(EquipmentSlot::Weapon).is_none());
    }

    #[test]
    fn test_equip_wrong_slot() {
        let mut build = CharacterBuildState::new();
        let result = build.equip(EquipmentSlot::Head, weapon("axe", 1, 0));
        assert!(matches!(result, Err(BuildError::SlotMismatch { .. })));
        assert!(build.equipment().is_empty());
    }

    #[test]
    fn test_unmet_requirements() {
        let mut build = CharacterBuildState::new();
        let axe = weapon("axe", 12, 32);

        let unmet = build.unmet_requirements(&axe);
        assert_eq!(
            unmet,
            vec![
                UnmetRequirement::Level {
                    required: 12,
                    actual: 1
                },
                UnmetRequirement::Attribute {
                    attribute: Attribute::Strength,
                    required: 32,
                    actual: 20
                },
            ]
        );

        build.set_level(12).unwrap();
        build.set_attribute(Attribute::Strength, 32).unwrap();
        assert!(build.unmet_requirements(&axe).is_empty());
    }

    #[test]
    fn test_equipping_ignores_requirements() {
        let mut build = CharacterBuildState::new();
        assert!(build.equip(EquipmentSlot::Weapon, weapon("axe", 40, 90)).is_ok());
    }

    #[test]
    fn test_compute_uses_state() {
        let mut build = CharacterBuildState::new();
        build.set_level(10).unwrap();
        build.set_attribute(Attribute::Stamina, 30).unwrap();

        let stats = build.compute(&BaseConfig::default());
        // 18 * 10 + 10 * 20
        assert!((stats.hp - 380.0).abs() < 1e-9);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut build = CharacterBuildState::new();
        build.set_level(20).unwrap();
        build.equip(EquipmentSlot::Weapon, weapon("axe", 12, 32)).unwrap();
        build.activate_buff(buff("Haste")).unwrap();

        let json = serde_json::to_string(&build).unwrap();
        let restored: CharacterBuildState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, build);
    }
}
