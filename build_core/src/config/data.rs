//! Item, buff and monster catalogs

use super::{lenient, ConfigError};
use crate::types::{Buff, EquipmentItem, EquipmentSlot, MonsterRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const BUNDLED_ITEMS: &str = include_str!("../../data/items.json");
const BUNDLED_BUFFS: &str = include_str!("../../data/buffs.json");
const BUNDLED_MONSTERS: &str = include_str!("../../data/monsters.json");

/// One entry of a monster's drop table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropEntry {
    #[serde(rename = "Item", default)]
    pub item: String,
    /// Drop chance in percent (0-100)
    #[serde(rename = "Chance", default, deserialize_with = "lenient::number")]
    pub chance: f64,
    /// Vendor sell value of the dropped item
    #[serde(rename = "Sell", default, deserialize_with = "lenient::number")]
    pub sell_value: f64,
}

/// Monster as written in the data files, before reward expectations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMonster {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Level", default, deserialize_with = "lenient::integer")]
    pub level: i32,
    #[serde(rename = "Health", default, deserialize_with = "lenient::number")]
    pub health: f64,
    #[serde(rename = "Gold Min", default, deserialize_with = "lenient::number")]
    pub gold_min: f64,
    #[serde(rename = "Gold Max", default, deserialize_with = "lenient::number")]
    pub gold_max: f64,
    #[serde(rename = "XP", default, deserialize_with = "lenient::number")]
    pub xp: f64,
    #[serde(rename = "Drops", default)]
    pub drops: Vec<DropEntry>,
}

impl RawMonster {
    /// Expected gold per kill: coin range midpoint plus expected drop value
    pub fn average_gold_per_kill(&self) -> f64 {
        let coins = (self.gold_min + self.gold_max) / 2.0;
        let drops: f64 = self
            .drops
            .iter()
            .map(|drop| (drop.chance / 100.0).clamp(0.0, 1.0) * drop.sell_value)
            .sum();
        coins + drops
    }

    /// Reduce to the record the farming projection consumes
    pub fn into_record(self) -> MonsterRecord {
        let average_gold_per_kill = self.average_gold_per_kill();
        MonsterRecord {
            id: self.id,
            name: self.name,
            level: self.level,
            health: self.health,
            average_gold_per_kill,
            xp_per_kill: self.xp,
        }
    }
}

/// Immutable reference data: items by id, buffs by name, monsters by (level, name)
#[derive(Debug, Clone, Default)]
pub struct GameData {
    items: BTreeMap<String, EquipmentItem>,
    buffs: BTreeMap<String, Buff>,
    monsters: Vec<MonsterRecord>,
}

impl GameData {
    /// Build catalogs from already-parsed records, rejecting duplicate keys
    pub fn from_records(
        items: Vec<EquipmentItem>,
        buffs: Vec<Buff>,
        monsters: Vec<RawMonster>,
    ) -> Result<Self, ConfigError> {
        let mut item_map = BTreeMap::new();
        for item in items {
            let id = item.id.clone();
            if item_map.insert(id.clone(), item).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate item id: {}",
                    id
                )));
            }
        }

        let mut buff_map = BTreeMap::new();
        for buff in buffs {
            let name = buff.name.clone();
            if buff_map.insert(name.clone(), buff).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate buff name: {}",
                    name
                )));
            }
        }

        let mut seen_monsters = BTreeSet::new();
        let mut records: Vec<MonsterRecord> = Vec::with_capacity(monsters.len());
        for raw in monsters {
            if !seen_monsters.insert(raw.id.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate monster id: {}",
                    raw.id
                )));
            }
            records.push(raw.into_record());
        }
        records.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));

        tracing::info!(
            items = item_map.len(),
            buffs = buff_map.len(),
            monsters = records.len(),
            "game data loaded"
        );

        Ok(GameData {
            items: item_map,
            buffs: buff_map,
            monsters: records,
        })
    }

    /// Parse catalogs from JSON arrays
    pub fn from_json(items: &str, buffs: &str, monsters: &str) -> Result<Self, ConfigError> {
        let items: Vec<EquipmentItem> = super::parse_json(items)?;
        let buffs: Vec<Buff> = super::parse_json(buffs)?;
        let monsters: Vec<RawMonster> = super::parse_json(monsters)?;
        Self::from_records(items, buffs, monsters)
    }

    /// Load `items.json`, `buffs.json` and `monsters.json` from a directory
    ///
    /// Any file that does not exist falls back to the bundled copy.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let items = load_or_bundled(dir, "items.json", BUNDLED_ITEMS)?;
        let buffs = load_or_bundled(dir, "buffs.json", BUNDLED_BUFFS)?;
        let monsters = load_or_bundled(dir, "monsters.json", BUNDLED_MONSTERS)?;
        Self::from_records(items, buffs, monsters)
    }

    /// Look up an item by id
    pub fn item(&self, id: &str) -> Option<&EquipmentItem> {
        self.items.get(id)
    }

    /// All items in id order
    pub fn items(&self) -> impl Iterator<Item = &EquipmentItem> {
        self.items.values()
    }

    /// Items that fit a slot, ordered by level then name
    pub fn items_for_slot(&self, slot: EquipmentSlot) -> Vec<&EquipmentItem> {
        let mut items: Vec<&EquipmentItem> =
            self.items.values().filter(|item| item.slot == slot).collect();
        items.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        items
    }

    /// Look up a buff by name
    pub fn buff(&self, name: &str) -> Option<&Buff> {
        self.buffs.get(name)
    }

    /// All buffs in name order
    pub fn buffs(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.values()
    }

    /// Look up a monster by id
    pub fn monster(&self, id: &str) -> Option<&MonsterRecord> {
        self.monsters.iter().find(|m| m.id == id)
    }

    /// All monsters ordered by level then name
    pub fn monsters(&self) -> &[MonsterRecord] {
        &self.monsters
    }
}

fn load_or_bundled<T: DeserializeOwned>(
    dir: &Path,
    name: &str,
    bundled: &str,
) -> Result<T, ConfigError> {
    let path = dir.join(name);
    if path.exists() {
        tracing::debug!(path = %path.display(), "reading data file");
        super::load_json(&path)
    } else {
        tracing::debug!(file = name, "data file missing, using bundled copy");
        super::parse_json(bundled)
    }
}

/// Get the game data bundled with the crate
pub fn default_game_data() -> Result<GameData, ConfigError> {
    GameData::from_json(BUNDLED_ITEMS, BUNDLED_BUFFS, BUNDLED_MONSTERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_gold_expectation() {
        let json = r#"[{
            "id": "boar",
            "Name": "Wild Boar",
            "Level": 4,
            "Health": "120",
            "Gold Min": 2,
            "Gold Max": 6,
            "XP": 30,
            "Drops": [
                { "Item": "Boar Hide", "Chance": 50, "Sell": 10 },
                { "Item": "Tusk", "Chance": "25", "Sell": "" }
            ]
        }]"#;

        let monsters: Vec<RawMonster> = serde_json::from_str(json).unwrap();
        let record = monsters.into_iter().next().unwrap().into_record();

        // (2 + 6) / 2 + 0.5 * 10 + 0.25 * 0 = 9
        assert!((record.average_gold_per_kill - 9.0).abs() < 1e-9);
        assert!((record.health - 120.0).abs() < f64::EPSILON);
        assert!((record.xp_per_kill - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let items = r#"[
            { "id": "cap", "Name": "Cap", "Type": "Head" },
            { "id": "cap", "Name": "Other Cap", "Type": "Head" }
        ]"#;

        let result = GameData::from_json(items, "[]", "[]");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_monster_rejected() {
        let monsters = r#"[
            { "id": "rat", "Name": "Rat", "Level": 1, "Health": 20 },
            { "id": "wolf", "Name": "Wolf", "Level": 3, "Health": 60 },
            { "id": "rat", "Name": "Sewer Rat", "Level": 2, "Health": 30 }
        ]"#;

        match GameData::from_json("[]", "[]", monsters) {
            Err(ConfigError::ValidationError(message)) => assert!(message.contains("rat")),
            other => panic!("expected validation error, got {:?}", other.map(|d| d.monsters().len())),
        }
    }

    #[test]
    fn test_unknown_slot_is_parse_error() {
        let items = r#"[{ "id": "cape", "Name": "Cape", "Type": "Back" }]"#;
        let result = GameData::from_json(items, "[]", "[]");
        assert!(matches!(result, Err(ConfigError::JsonError(_))));
    }

    #[test]
    fn test_default_game_data_loads() {
        let data = default_game_data().unwrap();
        assert!(data.items().count() > 0);
        assert!(data.buffs().count() > 0);
        assert!(!data.monsters().is_empty());

        // Monsters come back sorted by level
        let levels: Vec<i32> = data.monsters().iter().map(|m| m.level).collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
    }

    #[test]
    fn test_items_for_slot_filters() {
        let data = default_game_data().unwrap();
        let weapons = data.items_for_slot(EquipmentSlot::Weapon);
        assert!(!weapons.is_empty());
        assert!(weapons.iter().all(|item| item.slot == EquipmentSlot::Weapon));
    }

    #[test]
    fn test_load_dir_falls_back_to_bundled() {
        let dir = std::env::temp_dir().join("build_core_missing_data_dir");
        let data = GameData::load_dir(&dir).unwrap();
        assert_eq!(
            data.monsters().len(),
            default_game_data().unwrap().monsters().len()
        );
    }
}
