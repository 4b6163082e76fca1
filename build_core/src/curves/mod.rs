//! Rating curves - Dodge, Critical chance, Armor mitigation

mod critical;
mod dodge;
mod mitigation;

pub use critical::{apply_crit_soft_cap, critical_chance};
pub use dodge::dodge_from_agility;
pub use mitigation::mitigation_percent;

/// Formula constants shared by the curves and the stat calculator
pub mod constants {
    /// Baseline value of every attribute; bonuses derive from the surplus above it
    pub const ATTRIBUTE_FLOOR: i32 = 20;

    /// Dodge tiers as (width in agility points, percent per point).
    /// The last tier is open-ended.
    pub const DODGE_TIERS: [(f64, f64); 4] = [
        (160.0, 0.25),
        (160.0, 0.125),
        (320.0, 0.0625),
        (f64::INFINITY, 0.03125),
    ];

    /// Critical percent gained per agility or intelligence point above the floor
    pub const CRIT_PER_POINT: f64 = 1.0 / 14.0;

    /// Critical chance above which additions count for half
    pub const CRIT_SOFT_CAP: f64 = 80.0;

    /// Share of an addition that still applies past the soft cap
    pub const CRIT_OVERCAP_FACTOR: f64 = 0.5;

    /// Mitigation formula: armor / (BASE + PER_LEVEL * level + armor)
    pub const MITIGATION_BASE: f64 = 200.0;
    pub const MITIGATION_PER_LEVEL: f64 = 50.0;
}
