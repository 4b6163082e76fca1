//! Core types specific to build_core

use crate::config::lenient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the four character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Agility,
    Strength,
    Intelligence,
    Stamina,
}

impl Attribute {
    /// Get all attributes in display order
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Agility,
            Attribute::Strength,
            Attribute::Intelligence,
            Attribute::Stamina,
        ]
    }

    /// Short label as used by the game data (AGI/STR/INT/STA)
    pub fn short_name(&self) -> &'static str {
        match self {
            Attribute::Agility => "AGI",
            Attribute::Strength => "STR",
            Attribute::Intelligence => "INT",
            Attribute::Stamina => "STA",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Agility => "Agility",
            Attribute::Strength => "Strength",
            Attribute::Intelligence => "Intelligence",
            Attribute::Stamina => "Stamina",
        };
        f.write_str(name)
    }
}

/// Agility, strength, intelligence and stamina
///
/// Allocated sets never go below [`ATTRIBUTE_FLOOR`](crate::curves::constants::ATTRIBUTE_FLOOR);
/// final sets may, since gear and buffs can carry negative deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeSet {
    pub agility: i32,
    pub strength: i32,
    pub intelligence: i32,
    pub stamina: i32,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::baseline()
    }
}

impl AttributeSet {
    /// Every attribute at the 20-point floor
    pub fn baseline() -> Self {
        let floor = crate::curves::constants::ATTRIBUTE_FLOOR;
        AttributeSet {
            agility: floor,
            strength: floor,
            intelligence: floor,
            stamina: floor,
        }
    }

    /// All attributes zero (used for deltas)
    pub fn zero() -> Self {
        AttributeSet {
            agility: 0,
            strength: 0,
            intelligence: 0,
            stamina: 0,
        }
    }

    pub fn new(agility: i32, strength: i32, intelligence: i32, stamina: i32) -> Self {
        AttributeSet {
            agility,
            strength,
            intelligence,
            stamina,
        }
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Agility => self.agility,
            Attribute::Strength => self.strength,
            Attribute::Intelligence => self.intelligence,
            Attribute::Stamina => self.stamina,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        match attribute {
            Attribute::Agility => self.agility = value,
            Attribute::Strength => self.strength = value,
            Attribute::Intelligence => self.intelligence = value,
            Attribute::Stamina => self.stamina = value,
        }
    }

    /// Add another set component-wise, saturating at the `i32` bounds
    pub fn add(&mut self, other: &AttributeSet) {
        self.agility = self.agility.saturating_add(other.agility);
        self.strength = self.strength.saturating_add(other.strength);
        self.intelligence = self.intelligence.saturating_add(other.intelligence);
        self.stamina = self.stamina.saturating_add(other.stamina);
    }

    /// Points above the floor for one attribute, clamped to zero
    pub fn surplus(&self, attribute: Attribute) -> i32 {
        self.get(attribute)
            .saturating_sub(crate::curves::constants::ATTRIBUTE_FLOOR)
            .max(0)
    }
}

/// Equipment slot, also the item "Type" in the game data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Offhand,
    Head,
    Chest,
    Hands,
    Legs,
    Feet,
    Ring,
    Amulet,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Offhand,
            EquipmentSlot::Head,
            EquipmentSlot::Chest,
            EquipmentSlot::Hands,
            EquipmentSlot::Legs,
            EquipmentSlot::Feet,
            EquipmentSlot::Ring,
            EquipmentSlot::Amulet,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Offhand => "Offhand",
            EquipmentSlot::Head => "Head",
            EquipmentSlot::Chest => "Chest",
            EquipmentSlot::Hands => "Hands",
            EquipmentSlot::Legs => "Legs",
            EquipmentSlot::Feet => "Feet",
            EquipmentSlot::Ring => "Ring",
            EquipmentSlot::Amulet => "Amulet",
        }
    }

    /// Parse a slot name as written in the item data (case-insensitive)
    pub fn parse(name: &str) -> Option<EquipmentSlot> {
        EquipmentSlot::all()
            .iter()
            .copied()
            .find(|slot| slot.name().eq_ignore_ascii_case(name.trim()))
    }
}

// Custom deserializer for case-insensitive matching
impl<'de> Deserialize<'de> for EquipmentSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EquipmentSlot::parse(&s).ok_or_else(|| {
            serde::de::Error::unknown_variant(
                &s,
                &["weapon", "offhand", "head", "chest", "hands", "legs", "feet", "ring", "amulet"],
            )
        })
    }
}

/// Equipped items by slot, iterated in slot order
pub type Equipment = BTreeMap<EquipmentSlot, EquipmentItem>;

/// Equippable item reference data
///
/// Numeric fields go through the lenient loaders, so `""` and missing values
/// arrive here as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Level", default, deserialize_with = "lenient::integer")]
    pub level: i32,
    #[serde(rename = "Type")]
    pub slot: EquipmentSlot,
    #[serde(rename = "Subtype", default)]
    pub subtype: String,

    // Attribute deltas
    #[serde(rename = "STA", default, deserialize_with = "lenient::integer")]
    pub stamina: i32,
    #[serde(rename = "STR", default, deserialize_with = "lenient::integer")]
    pub strength: i32,
    #[serde(rename = "INT", default, deserialize_with = "lenient::integer")]
    pub intelligence: i32,
    #[serde(rename = "AGI", default, deserialize_with = "lenient::integer")]
    pub agility: i32,

    #[serde(rename = "Armor", default, deserialize_with = "lenient::number")]
    pub armor: f64,
    #[serde(rename = "ATK Power", default, deserialize_with = "lenient::number")]
    pub attack_power: f64,
    #[serde(rename = "Min Damage", default, deserialize_with = "lenient::number")]
    pub damage_min: f64,
    #[serde(rename = "Max Damage", default, deserialize_with = "lenient::number")]
    pub damage_max: f64,
    /// Milliseconds between attacks; `None` when the data leaves it blank
    #[serde(rename = "Attack Speed", default, deserialize_with = "lenient::optional_number")]
    pub attack_speed: Option<f64>,

    // Requirements
    #[serde(rename = "Req STA", default, deserialize_with = "lenient::integer")]
    pub req_stamina: i32,
    #[serde(rename = "Req STR", default, deserialize_with = "lenient::integer")]
    pub req_strength: i32,
    #[serde(rename = "Req INT", default, deserialize_with = "lenient::integer")]
    pub req_intelligence: i32,
    #[serde(rename = "Req AGI", default, deserialize_with = "lenient::integer")]
    pub req_agility: i32,

    #[serde(rename = "Sprite", default)]
    pub sprite: String,
}

impl EquipmentItem {
    /// Attribute deltas granted by this item
    pub fn attributes(&self) -> AttributeSet {
        AttributeSet::new(self.agility, self.strength, self.intelligence, self.stamina)
    }

    /// Attribute requirements of this item
    pub fn requirements(&self) -> AttributeSet {
        AttributeSet::new(
            self.req_agility,
            self.req_strength,
            self.req_intelligence,
            self.req_stamina,
        )
    }
}

/// Whether a buff is a plain buff or a morph (shapeshift)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuffCategory {
    #[default]
    Buff,
    Morph,
}

/// Buff or morph reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category", default)]
    pub category: BuffCategory,
    #[serde(rename = "ATK Power", default, deserialize_with = "lenient::number")]
    pub attack_power: f64,
    #[serde(rename = "Crit %", default, deserialize_with = "lenient::number")]
    pub critical: f64,
    /// Signed milliseconds added to the weapon's attack interval (negative = faster)
    #[serde(rename = "ATK Speed", default, deserialize_with = "lenient::number")]
    pub attack_speed: f64,
    #[serde(rename = "Energy/s", default, deserialize_with = "lenient::number")]
    pub energy_regen: f64,
    #[serde(rename = "Health/s", default, deserialize_with = "lenient::number")]
    pub health_regen: f64,
    #[serde(rename = "Armor", default, deserialize_with = "lenient::number")]
    pub armor: f64,
    #[serde(rename = "STA", default, deserialize_with = "lenient::integer")]
    pub stamina: i32,
    #[serde(rename = "STR", default, deserialize_with = "lenient::integer")]
    pub strength: i32,
    #[serde(rename = "INT", default, deserialize_with = "lenient::integer")]
    pub intelligence: i32,
    #[serde(rename = "AGI", default, deserialize_with = "lenient::integer")]
    pub agility: i32,
}

impl Buff {
    /// Create a buff with no effects (builder entry point)
    pub fn new(name: impl Into<String>, category: BuffCategory) -> Self {
        Buff {
            name: name.into(),
            category,
            attack_power: 0.0,
            critical: 0.0,
            attack_speed: 0.0,
            energy_regen: 0.0,
            health_regen: 0.0,
            armor: 0.0,
            stamina: 0,
            strength: 0,
            intelligence: 0,
            agility: 0,
        }
    }

    /// Attribute deltas granted by this buff
    pub fn attributes(&self) -> AttributeSet {
        AttributeSet::new(self.agility, self.strength, self.intelligence, self.stamina)
    }

    /// Whether the buff modifies attack speed at all
    pub fn modifies_attack_speed(&self) -> bool {
        self.attack_speed != 0.0
    }
}

/// Monster with per-kill rewards already reduced to expectations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: String,
    pub name: String,
    pub level: i32,
    pub health: f64,
    /// Expected gold per kill (coin range midpoint plus drop-table sell value)
    pub average_gold_per_kill: f64,
    pub xp_per_kill: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_saturates() {
        let mut set = AttributeSet::baseline();
        set.add(&AttributeSet::new(i32::MAX, i32::MIN, 5, 0));
        assert_eq!(set.agility, i32::MAX);
        assert_eq!(set.strength, i32::MIN + 20);
        set.add(&AttributeSet::new(0, i32::MIN, 0, 0));
        assert_eq!(set.strength, i32::MIN);
        assert_eq!(set.surplus(Attribute::Agility), i32::MAX - 20);
        assert_eq!(set.surplus(Attribute::Strength), 0);
    }

    #[test]
    fn test_surplus_clamps_below_floor() {
        let set = AttributeSet::new(15, 20, 35, 0);
        assert_eq!(set.surplus(Attribute::Agility), 0);
        assert_eq!(set.surplus(Attribute::Strength), 0);
        assert_eq!(set.surplus(Attribute::Intelligence), 15);
        assert_eq!(set.surplus(Attribute::Stamina), 0);
    }

    #[test]
    fn test_slot_parse_is_case_insensitive() {
        assert_eq!(EquipmentSlot::parse("weapon"), Some(EquipmentSlot::Weapon));
        assert_eq!(EquipmentSlot::parse(" Chest "), Some(EquipmentSlot::Chest));
        assert_eq!(EquipmentSlot::parse("cloak"), None);
    }

    #[test]
    fn test_item_with_blank_fields() {
        let json = r#"{
            "id": "rusty_sword",
            "Name": "Rusty Sword",
            "Level": "3",
            "Type": "Weapon",
            "STR": "",
            "AGI": 2,
            "Min Damage": "9",
            "Max Damage": 14,
            "Attack Speed": ""
        }"#;

        let item: EquipmentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.level, 3);
        assert_eq!(item.slot, EquipmentSlot::Weapon);
        assert_eq!(item.strength, 0);
        assert_eq!(item.agility, 2);
        assert_eq!(item.stamina, 0);
        assert!((item.damage_min - 9.0).abs() < f64::EPSILON);
        assert_eq!(item.attack_speed, None);
    }

    #[test]
    fn test_buff_defaults_to_buff_category() {
        let json = r#"{ "Name": "Haste", "ATK Speed": -200 }"#;
        let buff: Buff = serde_json::from_str(json).unwrap();
        assert_eq!(buff.category, BuffCategory::Buff);
        assert!(buff.modifies_attack_speed());
        assert!((buff.attack_speed + 200.0).abs() < f64::EPSILON);
    }
}
