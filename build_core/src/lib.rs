//! build_core - Character build calculation engine
//!
//! This library provides:
//! - Rating curves: dodge from agility, critical chance with an 80% soft cap,
//!   armor mitigation
//! - StatSource / StatAccumulator: allocated points, gear and buffs summed
//!   into one set of totals
//! - compute_stats: the derived combat stats of a build (HP, energy, armor,
//!   attack power, crit, dodge, damage, DPS)
//! - CharacterBuildState: the editable build with its level, slot and buff rules
//! - Farming projection: time-to-kill and gold/XP per hour per monster
//! - Config: base balance values (TOML) and item/buff/monster catalogs (JSON)

pub mod build;
pub mod config;
pub mod curves;
pub mod farming;
pub mod prelude;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use build::{BuildError, CharacterBuildState, UnmetRequirement, MAX_ACTIVE_BUFFS};
pub use config::{default_game_data, BaseConfig, ConfigError, GameData};
pub use curves::{apply_crit_soft_cap, critical_chance, dodge_from_agility, mitigation_percent};
pub use farming::{project, sort_rows, PerformanceRow, SortColumn, SortDirection};
pub use source::{AllocatedSource, BuffSource, GearSource, StatSource};
pub use stat_block::{aggregate_attributes, compute_stats, DerivedStats, StatAccumulator};
pub use types::{
    Attribute, AttributeSet, Buff, BuffCategory, Equipment, EquipmentItem, EquipmentSlot,
    MonsterRecord,
};
