//! BuffSource - Active buffs and morphs

use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::Buff;

/// An active buff contributing to the build
pub struct BuffSource<'a> {
    pub buff: &'a Buff,
}

impl<'a> BuffSource<'a> {
    /// Create a new buff source
    pub fn new(buff: &'a Buff) -> Self {
        BuffSource { buff }
    }
}

impl StatSource for BuffSource<'_> {
    fn id(&self) -> &str {
        &self.buff.name
    }

    fn priority(&self) -> i32 {
        200 // Buffs apply after gear
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        let buff = self.buff;

        stats.add_attributes(&buff.attributes());
        stats.armor_flat += buff.armor;
        stats.attack_power_flat += buff.attack_power;
        stats.critical_flat += buff.critical;
        stats.health_regen += buff.health_regen;
        stats.energy_regen += buff.energy_regen;

        if buff.modifies_attack_speed() {
            stats.offer_attack_speed_buff(&buff.name, buff.attack_speed);
        }
    }
}

/// Common buff presets
pub struct BuffPresets;

impl BuffPresets {
    /// Create a flat attack power buff
    pub fn attack_power(name: &str, amount: f64) -> Buff {
        let mut buff = Buff::new(name, crate::types::BuffCategory::Buff);
        buff.attack_power = amount;
        buff
    }

    /// Create an attack speed buff (negative milliseconds = faster)
    pub fn haste(name: &str, interval_ms: f64) -> Buff {
        let mut buff = Buff::new(name, crate::types::BuffCategory::Buff);
        buff.attack_speed = interval_ms;
        buff
    }

    /// Create a critical chance buff
    pub fn focus(name: &str, critical: f64) -> Buff {
        let mut buff = Buff::new(name, crate::types::BuffCategory::Buff);
        buff.critical = critical;
        buff
    }
}
