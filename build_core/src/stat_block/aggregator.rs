//! StatAccumulator - Collects stat contributions before derivation

use crate::types::AttributeSet;

/// Damage characteristics of the equipped weapon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub damage_min: f64,
    pub damage_max: f64,
    /// Milliseconds between attacks, `None` to use the unarmed default
    pub attack_speed: Option<f64>,
}

/// Accumulates stat contributions from various sources
///
/// Every field starts at zero/empty; sources add to it and
/// [`DerivedStats::from_accumulator`](super::DerivedStats::from_accumulator)
/// turns the totals into final stats.
#[derive(Debug, Clone, PartialEq)]
pub struct StatAccumulator {
    // === Attributes ===
    pub attributes: AttributeSet,

    // === Direct bonuses (gear + buffs) ===
    pub armor_flat: f64,
    pub attack_power_flat: f64,

    // === Buff-only bonuses ===
    /// Raw critical percent from buffs, layered after the stat-derived value
    pub critical_flat: f64,
    pub health_regen: f64,
    pub energy_regen: f64,
    /// Signed interval change from the first attack-speed buff seen
    pub attack_speed_buff: Option<f64>,
    /// Name of the buff that supplied `attack_speed_buff`
    pub attack_speed_buff_source: Option<String>,

    // === Weapon ===
    pub weapon: Option<WeaponStats>,
}

impl Default for StatAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatAccumulator {
    pub fn new() -> Self {
        StatAccumulator {
            attributes: AttributeSet::zero(),
            armor_flat: 0.0,
            attack_power_flat: 0.0,
            critical_flat: 0.0,
            health_regen: 0.0,
            energy_regen: 0.0,
            attack_speed_buff: None,
            attack_speed_buff_source: None,
            weapon: None,
        }
    }

    /// Add attribute deltas
    pub fn add_attributes(&mut self, delta: &AttributeSet) {
        self.attributes.add(delta);
    }

    /// Record an attack-speed buff unless one was already recorded
    ///
    /// Returns whether this buff's value was taken.
    pub fn offer_attack_speed_buff(&mut self, name: &str, interval_ms: f64) -> bool {
        if self.attack_speed_buff.is_some() {
            tracing::trace!(buff = name, "attack speed buff ignored, another one applies");
            return false;
        }
        self.attack_speed_buff = Some(interval_ms);
        self.attack_speed_buff_source = Some(name.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let acc = StatAccumulator::new();
        assert_eq!(acc.attributes, AttributeSet::zero());
        assert!(acc.weapon.is_none());
        assert!(acc.attack_speed_buff.is_none());
    }

    #[test]
    fn test_attack_speed_buff_does_not_stack() {
        let mut acc = StatAccumulator::new();
        assert!(acc.offer_attack_speed_buff("Haste", -200.0));
        assert!(!acc.offer_attack_speed_buff("Frenzy", -300.0));

        assert_eq!(acc.attack_speed_buff, Some(-200.0));
        assert_eq!(acc.attack_speed_buff_source.as_deref(), Some("Haste"));
    }

    #[test]
    fn test_add_attributes_is_componentwise() {
        let mut acc = StatAccumulator::new();
        acc.add_attributes(&AttributeSet::new(1, 2, 3, 4));
        acc.add_attributes(&AttributeSet::new(-1, 0, 1, 0));
        assert_eq!(acc.attributes, AttributeSet::new(0, 2, 4, 4));
    }
}
