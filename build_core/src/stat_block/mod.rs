//! Stat calculation - Aggregates sources into derived combat stats

mod aggregator;
mod computed;

pub use aggregator::{StatAccumulator, WeaponStats};
pub use computed::DerivedStats;

use crate::config::BaseConfig;
use crate::source::{AllocatedSource, BuffSource, GearSource, StatSource};
use crate::types::{AttributeSet, Buff, Equipment};

/// Calculator constants
pub mod constants {
    /// Health granted across the full 60 levels, paid out linearly per level
    pub const HP_PER_LEVEL: f64 = 1080.0 / 60.0;
    /// Energy granted across the full 60 levels, paid out linearly per level
    pub const ENERGY_PER_LEVEL: f64 = 1200.0 / 60.0;

    pub const HP_PER_STAMINA: f64 = 20.0;
    pub const ENERGY_PER_INTELLIGENCE: f64 = 15.0;
    pub const ARMOR_PER_STRENGTH: f64 = 5.0;

    /// Attack power per point when strength is the driving attribute
    pub const AP_PER_STRENGTH_PRIMARY: f64 = 3.0;
    /// Attack power per point of any other driving attribute
    pub const AP_PER_OTHER_PRIMARY: f64 = 2.0;
    /// Attack power per strength point when another attribute drives
    pub const AP_PER_STRENGTH_SECONDARY: f64 = 1.0;

    /// Attack power converted into flat damage: AP * seconds per attack / 14
    pub const AP_DAMAGE_DIVISOR: f64 = 14.0;

    /// Fastest possible attack interval
    pub const MIN_ATTACK_SPEED_MS: f64 = 100.0;
}

/// Collect every source of a build, in application order
fn collect_sources<'a>(
    allocated: &'a AttributeSet,
    equipment: &'a Equipment,
    buffs: &'a [Buff],
) -> Vec<Box<dyn StatSource + 'a>> {
    let mut sources: Vec<Box<dyn StatSource + 'a>> = Vec::with_capacity(1 + equipment.len() + buffs.len());
    sources.push(Box::new(AllocatedSource::new(allocated)));
    for (slot, item) in equipment {
        sources.push(Box::new(GearSource::new(*slot, item)));
    }
    for buff in buffs {
        sources.push(Box::new(BuffSource::new(buff)));
    }

    // Stable: equal priorities keep input order, so buff order is preserved
    sources.sort_by_key(|s| s.priority());
    sources
}

/// Run all sources of a build through a fresh accumulator
pub fn accumulate(allocated: &AttributeSet, equipment: &Equipment, buffs: &[Buff]) -> StatAccumulator {
    let mut accumulator = StatAccumulator::new();
    for source in collect_sources(allocated, equipment, buffs) {
        source.apply(&mut accumulator);
    }
    accumulator
}

/// Final attributes: allocated + item deltas + buff deltas
pub fn aggregate_attributes(
    allocated: &AttributeSet,
    equipment: &Equipment,
    buffs: &[Buff],
) -> AttributeSet {
    accumulate(allocated, equipment, buffs).attributes
}

/// Compute every derived stat of a build
///
/// Pure and total: the same inputs always give the same output, and no input
/// makes it fail. `rebirth` only widens the level range a caller may pass; the
/// formulas themselves do not depend on it. Buff order matters only for attack
/// speed, where the first attack-speed buff in `buffs` is the one applied.
pub fn compute_stats(
    level: u32,
    rebirth: bool,
    allocated: &AttributeSet,
    equipment: &Equipment,
    buffs: &[Buff],
    config: &BaseConfig,
) -> DerivedStats {
    tracing::trace!(level, rebirth, items = equipment.len(), buffs = buffs.len(), "computing stats");
    let accumulator = accumulate(allocated, equipment, buffs);
    DerivedStats::from_accumulator(&accumulator, level, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BuffCategory, EquipmentItem, EquipmentSlot};

    fn item(id: &str, slot: EquipmentSlot) -> EquipmentItem {
        EquipmentItem {
            id: id.to_string(),
            name: id.to_string(),
            level: 1,
            slot,
            subtype: String::new(),
            stamina: 0,
            strength: 0,
            intelligence: 0,
            agility: 0,
            armor: 0.0,
            attack_power: 0.0,
            damage_min: 0.0,
            damage_max: 0.0,
            attack_speed: None,
            req_stamina: 0,
            req_strength: 0,
            req_intelligence: 0,
            req_agility: 0,
            sprite: String::new(),
        }
    }

    #[test]
    fn test_aggregate_sums_all_sources() {
        let allocated = AttributeSet::new(25, 30, 20, 22);

        let mut equipment = Equipment::new();
        let mut helm = item("helm", EquipmentSlot::Head);
        helm.stamina = 3;
        helm.agility = -1;
        equipment.insert(EquipmentSlot::Head, helm);
        let mut ring = item("ring", EquipmentSlot::Ring);
        ring.intelligence = 2;
        equipment.insert(EquipmentSlot::Ring, ring);

        let mut buff = Buff::new("Might", BuffCategory::Buff);
        buff.strength = 4;

        let total = aggregate_attributes(&allocated, &equipment, &[buff]);
        assert_eq!(total, AttributeSet::new(24, 34, 22, 25));
    }

    #[test]
    fn test_aggregate_allows_below_floor() {
        let allocated = AttributeSet::baseline();
        let mut morph = Buff::new("Bear Form", BuffCategory::Morph);
        morph.agility = -6;

        let total = aggregate_attributes(&allocated, &Equipment::new(), &[morph]);
        assert_eq!(total.agility, 14);
    }

    #[test]
    fn test_aggregate_without_sources_is_allocated() {
        let allocated = AttributeSet::new(40, 20, 33, 21);
        let total = aggregate_attributes(&allocated, &Equipment::new(), &[]);
        assert_eq!(total, allocated);
    }

    #[test]
    fn test_buff_order_survives_priority_sort() {
        let mut equipment = Equipment::new();
        equipment.insert(EquipmentSlot::Weapon, item("sword", EquipmentSlot::Weapon));

        let mut slow = Buff::new("Slow Start", BuffCategory::Buff);
        slow.attack_speed = 100.0;
        let mut fast = Buff::new("Quickening", BuffCategory::Buff);
        fast.attack_speed = -100.0;

        let acc = accumulate(&AttributeSet::baseline(), &equipment, &[slow.clone(), fast.clone()]);
        assert_eq!(acc.attack_speed_buff, Some(100.0));

        let acc = accumulate(&AttributeSet::baseline(), &equipment, &[fast, slow]);
        assert_eq!(acc.attack_speed_buff, Some(-100.0));
    }
}
