//! Dodge - Tiered diminishing returns on agility
//!
//! Each tier converts agility at half the rate of the one before it:
//!
//! | Agility   | Dodge per point |
//! |-----------|-----------------|
//! | 0-160     | 0.25%           |
//! | 161-320   | 0.125%          |
//! | 321-640   | 0.0625%         |
//! | 641+      | 0.03125%        |
//!
//! There is no upper cap.

use super::constants::DODGE_TIERS;

/// Calculate dodge percent from an agility amount
///
/// Negative input is treated as zero.
pub fn dodge_from_agility(agility: f64) -> f64 {
    let mut remaining = agility.max(0.0);
    let mut dodge = 0.0;

    for (width, rate) in DODGE_TIERS {
        if remaining <= 0.0 {
            break;
        }
        let points = remaining.min(width);
        dodge += points * rate;
        remaining -= points;
    }

    dodge
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_negative() {
        assert!((dodge_from_agility(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((dodge_from_agility(-50.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tier_boundaries() {
        assert!((dodge_from_agility(160.0) - 40.0).abs() < 1e-9);
        // One point into the second tier
        assert!((dodge_from_agility(161.0) - 40.125).abs() < 1e-9);
        assert!((dodge_from_agility(320.0) - 60.0).abs() < 1e-9);
        // Halfway through the third tier: 60 + 160 * 0.0625
        assert!((dodge_from_agility(480.0) - 70.0).abs() < 1e-9);
        assert!((dodge_from_agility(640.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_beyond_last_boundary_is_uncapped() {
        // 80 + 360 * 0.03125
        assert!((dodge_from_agility(1000.0) - 91.25).abs() < 1e-9);
        assert!(dodge_from_agility(10_000.0) > 100.0);
    }

    #[test]
    fn test_each_tier_is_half_the_previous() {
        let first = dodge_from_agility(1.0);
        let second = dodge_from_agility(161.0) - dodge_from_agility(160.0);
        let third = dodge_from_agility(321.0) - dodge_from_agility(320.0);
        let fourth = dodge_from_agility(641.0) - dodge_from_agility(640.0);

        assert!((second - first / 2.0).abs() < 1e-9);
        assert!((third - second / 2.0).abs() < 1e-9);
        assert!((fourth - third / 2.0).abs() < 1e-9);
    }
}
