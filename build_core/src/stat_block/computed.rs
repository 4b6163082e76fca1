//! Derived combat stats computed from accumulated sources

use super::constants::*;
use super::StatAccumulator;
use crate::config::BaseConfig;
use crate::curves::constants::ATTRIBUTE_FLOOR;
use crate::curves::{apply_crit_soft_cap, critical_chance, dodge_from_agility, mitigation_percent};
use crate::types::{Attribute, AttributeSet};
use serde::{Deserialize, Serialize};

/// Final combat statistics of a build
///
/// Always recomputed from scratch; nothing here is incremental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub final_attributes: AttributeSet,
    pub hp: f64,
    pub energy: f64,
    pub armor: f64,
    /// Milliseconds between attacks, never below 100
    pub attack_speed_ms: f64,
    pub attack_power: f64,
    pub crit_percent: f64,
    pub dodge_percent: f64,
    pub min_damage: f64,
    pub max_damage: f64,
    /// Expected damage per second, crit folded in as a flat multiplier
    pub dps: f64,
    pub mitigation_percent: f64,
    pub hp_regen_per_sec: f64,
    pub energy_regen_per_sec: f64,
}

impl DerivedStats {
    /// Derive final stats from accumulated sources
    ///
    /// Dodge is read off the curve at the agility above the floor, so a
    /// baseline character has 0%. Feeding total agility instead gives 5% at
    /// the floor, the same value as `BaseConfig::dodge`; switching readings
    /// means changing only the `dodge_percent` line below.
    pub fn from_accumulator(acc: &StatAccumulator, level: u32, config: &BaseConfig) -> Self {
        let attrs = acc.attributes;
        let level_f = level as f64;

        // Weapon characteristics, unarmed unless the weapon slot is filled
        let (weapon_min, weapon_max, weapon_speed) = match acc.weapon {
            Some(weapon) => (
                weapon.damage_min,
                weapon.damage_max,
                weapon.attack_speed.unwrap_or(config.atk_speed),
            ),
            None => (config.damage.min, config.damage.max, config.atk_speed),
        };

        let hp = (HP_PER_LEVEL * level_f).round()
            + attrs.surplus(Attribute::Stamina) as f64 * HP_PER_STAMINA;
        let energy = (ENERGY_PER_LEVEL * level_f).round()
            + attrs.surplus(Attribute::Intelligence) as f64 * ENERGY_PER_INTELLIGENCE;

        let armor = (attrs.surplus(Attribute::Strength) as f64 * ARMOR_PER_STRENGTH
            + acc.armor_flat)
            .max(0.0);
        let mitigation = mitigation_percent(armor, level);

        let attack_speed_ms =
            (weapon_speed + acc.attack_speed_buff.unwrap_or(0.0)).max(MIN_ATTACK_SPEED_MS);

        let attack_power =
            (config.atk_power + attribute_attack_power(&attrs) + acc.attack_power_flat).max(0.0);

        // Stat crit and buff crit are diminished separately against the same cap
        let stat_crit = critical_chance(config.critical, attrs.agility, attrs.intelligence);
        let crit_percent = apply_crit_soft_cap(stat_crit, acc.critical_flat).max(0.0);

        let dodge_percent = dodge_from_agility(attrs.surplus(Attribute::Agility) as f64).max(0.0);

        // AP * (ms / 1000) / 14, kept in one division so round values stay exact
        let ap_damage = (attack_power * attack_speed_ms / (1000.0 * AP_DAMAGE_DIVISOR)).floor();
        let min_damage = weapon_min + ap_damage;
        let max_damage = weapon_max + ap_damage;

        let dps = if attack_speed_ms > 0.0 {
            let average_hit = (min_damage + max_damage) / 2.0;
            let attacks_per_second = 1000.0 / attack_speed_ms;
            average_hit * attacks_per_second * (1.0 + crit_percent / 100.0)
        } else {
            0.0
        };

        DerivedStats {
            final_attributes: attrs,
            hp,
            energy,
            armor,
            attack_speed_ms,
            attack_power,
            crit_percent,
            dodge_percent,
            min_damage,
            max_damage,
            dps,
            mitigation_percent: mitigation,
            hp_regen_per_sec: acc.health_regen,
            energy_regen_per_sec: acc.energy_regen,
        }
    }
}

/// Attack power granted by attributes
///
/// Strength wins every tie for highest attribute (as long as it is at the
/// floor or above) and then gives 3 per point. Otherwise the highest other
/// attribute gives 2 per point and strength still adds 1 per point.
pub fn attribute_attack_power(attrs: &AttributeSet) -> f64 {
    let floor = ATTRIBUTE_FLOOR;
    let highest_other = attrs.agility.max(attrs.intelligence).max(attrs.stamina);
    let strength_drives = attrs.strength >= floor && attrs.strength >= highest_other;

    if strength_drives {
        (attrs.strength.saturating_sub(floor) as f64 * AP_PER_STRENGTH_PRIMARY).max(0.0)
    } else {
        let primary = (highest_other.saturating_sub(floor) as f64 * AP_PER_OTHER_PRIMARY).max(0.0);
        let secondary =
            (attrs.strength.saturating_sub(floor) as f64 * AP_PER_STRENGTH_SECONDARY).max(0.0);
        primary + secondary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat_block::WeaponStats;

    fn acc_with(attributes: AttributeSet) -> StatAccumulator {
        let mut acc = StatAccumulator::new();
        acc.add_attributes(&attributes);
        acc
    }

    #[test]
    fn test_baseline_character() {
        let acc = acc_with(AttributeSet::baseline());
        let stats = DerivedStats::from_accumulator(&acc, 1, &BaseConfig::default());

        assert!((stats.hp - 18.0).abs() < 1e-9);
        assert!((stats.energy - 20.0).abs() < 1e-9);
        assert!((stats.armor - 0.0).abs() < 1e-9);
        assert!((stats.attack_speed_ms - 1400.0).abs() < 1e-9);
        assert!((stats.attack_power - 40.0).abs() < 1e-9);
        assert!((stats.crit_percent - 6.43).abs() < 1e-9);
        assert!((stats.dodge_percent - 0.0).abs() < 1e-9);
        assert!((stats.min_damage - 11.0).abs() < 1e-9);
        assert!((stats.max_damage - 14.0).abs() < 1e-9);
        assert!((stats.dps - 12.5 * (1000.0 / 1400.0) * 1.0643).abs() < 1e-9);
        assert!((stats.dps - 9.50).abs() < 0.01);
    }

    #[test]
    fn test_hp_and_energy_scale() {
        let acc = acc_with(AttributeSet::new(20, 20, 30, 25));
        let stats = DerivedStats::from_accumulator(&acc, 10, &BaseConfig::default());

        // 18 * 10 + 5 * 20
        assert!((stats.hp - 280.0).abs() < 1e-9);
        // 20 * 10 + 10 * 15
        assert!((stats.energy - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_armor_and_mitigation() {
        let mut acc = acc_with(AttributeSet::new(20, 30, 20, 20));
        acc.armor_flat = 200.0;
        let stats = DerivedStats::from_accumulator(&acc, 1, &BaseConfig::default());

        // 10 * 5 + 200
        assert!((stats.armor - 250.0).abs() < 1e-9);
        // 250 / (200 + 50 + 250)
        assert!((stats.mitigation_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_armor_floors_at_zero() {
        let mut acc = acc_with(AttributeSet::baseline());
        acc.armor_flat = -80.0;
        let stats = DerivedStats::from_accumulator(&acc, 5, &BaseConfig::default());

        assert!((stats.armor - 0.0).abs() < f64::EPSILON);
        assert!((stats.mitigation_percent - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weapon_overrides_unarmed() {
        let mut acc = acc_with(AttributeSet::baseline());
        acc.weapon = Some(WeaponStats {
            damage_min: 20.0,
            damage_max: 30.0,
            attack_speed: Some(2000.0),
        });
        let stats = DerivedStats::from_accumulator(&acc, 1, &BaseConfig::default());

        // floor(40 * 2.0 / 14) = 5
        assert!((stats.attack_speed_ms - 2000.0).abs() < 1e-9);
        assert!((stats.min_damage - 25.0).abs() < 1e-9);
        assert!((stats.max_damage - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_weapon_without_speed_uses_default() {
        let mut acc = acc_with(AttributeSet::baseline());
        acc.weapon = Some(WeaponStats {
            damage_min: 12.0,
            damage_max: 19.0,
            attack_speed: None,
        });
        let stats = DerivedStats::from_accumulator(&acc, 1, &BaseConfig::default());

        assert!((stats.attack_speed_ms - 1400.0).abs() < 1e-9);
        assert!((stats.min_damage - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_attack_speed_floor() {
        let mut acc = acc_with(AttributeSet::baseline());
        acc.attack_speed_buff = Some(-5000.0);
        let stats = DerivedStats::from_accumulator(&acc, 1, &BaseConfig::default());

        assert!((stats.attack_speed_ms - 100.0).abs() < f64::EPSILON);
        assert!(stats.dps.is_finite());
    }

    #[test]
    fn test_strength_drives_on_tie() {
        // Strength tied with agility: strength drives at 3 per point
        let attrs = AttributeSet::new(30, 30, 20, 20);
        assert!((attribute_attack_power(&attrs) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_other_attribute_drives_with_strength_secondary() {
        // Agility 40 drives: 20 * 2, strength 25 adds 5 * 1
        let attrs = AttributeSet::new(40, 25, 20, 20);
        assert!((attribute_attack_power(&attrs) - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stamina_can_drive() {
        let attrs = AttributeSet::new(20, 20, 20, 35);
        assert!((attribute_attack_power(&attrs) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_everything_below_floor_gives_nothing() {
        let attrs = AttributeSet::new(10, 15, 12, 5);
        assert!((attribute_attack_power(&attrs) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attack_power_floor() {
        let mut acc = acc_with(AttributeSet::baseline());
        acc.attack_power_flat = -500.0;
        let stats = DerivedStats::from_accumulator(&acc, 1, &BaseConfig::default());

        assert!((stats.attack_power - 0.0).abs() < f64::EPSILON);
        // Damage falls back to the bare weapon range
        assert!((stats.min_damage - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_buff_crit_layers_with_soft_cap() {
        let config = BaseConfig {
            critical: 75.0,
            ..BaseConfig::default()
        };
        let mut acc = acc_with(AttributeSet::baseline());
        acc.critical_flat = 20.0;
        let stats = DerivedStats::from_accumulator(&acc, 1, &config);

        assert!((stats.crit_percent - 87.5).abs() < 1e-9);
    }

    #[test]
    fn test_stat_and_buff_crit_diminish_separately() {
        let config = BaseConfig {
            critical: 70.0,
            ..BaseConfig::default()
        };
        // 280 agility surplus = 20% raw from stats: 70 + 10 + 5 = 85
        let mut acc = acc_with(AttributeSet::new(300, 20, 20, 20));
        // Buff crit applied entirely above the cap: 85 + 4 * 0.5
        acc.critical_flat = 4.0;
        let stats = DerivedStats::from_accumulator(&acc, 1, &config);

        assert!((stats.crit_percent - 87.0).abs() < 1e-9);
    }

    #[test]
    fn test_dodge_uses_agility_surplus() {
        let acc = acc_with(AttributeSet::new(180, 20, 20, 20));
        let stats = DerivedStats::from_accumulator(&acc, 1, &BaseConfig::default());
        assert!((stats.dodge_percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_regen_comes_from_accumulator() {
        let mut acc = acc_with(AttributeSet::baseline());
        acc.health_regen = 4.0;
        acc.energy_regen = 3.0;
        let stats = DerivedStats::from_accumulator(&acc, 1, &BaseConfig::default());

        assert!((stats.hp_regen_per_sec - 4.0).abs() < f64::EPSILON);
        assert!((stats.energy_regen_per_sec - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extreme_attribute_deltas_saturate() {
        use crate::stat_block::compute_stats;
        use crate::types::{Buff, Equipment};

        let huge: Buff =
            serde_json::from_str(r#"{ "Name": "Giant", "STR": 2147483647, "AGI": 2147483647, "INT": 2147483647, "STA": 2147483647 }"#)
                .unwrap();
        let tiny: Buff =
            serde_json::from_str(r#"{ "Name": "Withered", "STR": -3e9, "AGI": -3e9, "INT": -3e9, "STA": -3e9 }"#)
                .unwrap();
        let config = BaseConfig::default();

        let high = compute_stats(1, false, &AttributeSet::baseline(), &Equipment::new(), &[huge.clone(), huge], &config);
        assert_eq!(high.final_attributes.strength, i32::MAX);
        assert!(high.hp.is_finite() && high.hp > 0.0);
        assert!(high.attack_power.is_finite() && high.attack_power > 0.0);
        assert!(high.crit_percent.is_finite() && high.crit_percent > 80.0);
        assert!(high.dodge_percent.is_finite());
        assert!(high.dps.is_finite());

        let low = compute_stats(1, false, &AttributeSet::baseline(), &Equipment::new(), &[tiny.clone(), tiny], &config);
        assert_eq!(low.final_attributes.agility, i32::MIN);
        assert!((low.attack_power - config.atk_power).abs() < 1e-9);
        assert!(low.dodge_percent.abs() < 1e-9);
        assert!((low.crit_percent - config.critical).abs() < 1e-9);
    }
}
