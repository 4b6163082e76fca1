//! Game balance constants

use serde::{Deserialize, Serialize};

/// Tunable base values every build starts from
///
/// `dodge` is carried for completeness but does not feed the dodge curve,
/// which works purely from agility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseConfig {
    /// Base attack power before attribute and buff bonuses
    #[serde(default = "default_atk_power")]
    pub atk_power: f64,
    /// Unarmed attack interval in milliseconds
    #[serde(default = "default_atk_speed")]
    pub atk_speed: f64,
    /// Base critical chance in percent
    #[serde(default = "default_critical")]
    pub critical: f64,
    #[serde(default = "default_dodge")]
    pub dodge: f64,
    /// Unarmed damage range
    #[serde(default)]
    pub damage: DamageRange,
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            atk_power: default_atk_power(),
            atk_speed: default_atk_speed(),
            critical: default_critical(),
            dodge: default_dodge(),
            damage: DamageRange::default(),
        }
    }
}

impl BaseConfig {
    /// Parse the configuration bundled with the crate
    pub fn bundled() -> Result<Self, super::ConfigError> {
        super::parse_toml(include_str!("../../config/base.toml"))
    }
}

fn default_atk_power() -> f64 {
    40.0
}
fn default_atk_speed() -> f64 {
    1400.0
}
fn default_critical() -> f64 {
    6.43
}
fn default_dodge() -> f64 {
    5.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageRange {
    #[serde(default = "default_damage_min")]
    pub min: f64,
    #[serde(default = "default_damage_max")]
    pub max: f64,
}

impl Default for DamageRange {
    fn default() -> Self {
        DamageRange {
            min: default_damage_min(),
            max: default_damage_max(),
        }
    }
}

fn default_damage_min() -> f64 {
    7.0
}
fn default_damage_max() -> f64 {
    10.0
}
