//! StatSource - Trait and implementations for stat providers

mod allocated;
mod buff;
mod gear;

pub use allocated::AllocatedSource;
pub use buff::BuffSource;
pub use gear::GearSource;

use crate::stat_block::StatAccumulator;

/// Trait for anything that contributes stats to a build
pub trait StatSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Allocated attributes: -100
    /// - Gear: 0
    /// - Buffs: 200
    ///
    /// Sources with equal priority keep their input order.
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
