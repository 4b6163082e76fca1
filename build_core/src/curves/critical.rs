//! Critical chance - Linear gains from agility and intelligence, halved past 80%

use super::constants::{ATTRIBUTE_FLOOR, CRIT_OVERCAP_FACTOR, CRIT_PER_POINT, CRIT_SOFT_CAP};

/// Add `addition` to `current` under the 80% soft cap
///
/// The part of the addition that lands above the cap counts for half. If
/// `current` is already at or above the cap the whole addition is halved.
pub fn apply_crit_soft_cap(current: f64, addition: f64) -> f64 {
    if current + addition <= CRIT_SOFT_CAP {
        current + addition
    } else if current < CRIT_SOFT_CAP {
        let to_cap = CRIT_SOFT_CAP - current;
        CRIT_SOFT_CAP + (addition - to_cap) * CRIT_OVERCAP_FACTOR
    } else {
        current + addition * CRIT_OVERCAP_FACTOR
    }
}

/// Calculate critical chance from a base value and final agility/intelligence
///
/// Each point of agility or intelligence above the floor adds 1/14 percent.
/// The result is floored at zero and not capped above.
pub fn critical_chance(base: f64, agility: i32, intelligence: i32) -> f64 {
    let surplus = agility.saturating_sub(ATTRIBUTE_FLOOR).max(0) as f64
        + intelligence.saturating_sub(ATTRIBUTE_FLOOR).max(0) as f64;
    let raw = surplus * CRIT_PER_POINT;
    apply_crit_soft_cap(base, raw).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_surplus_keeps_base() {
        assert!((critical_chance(6.43, 20, 20) - 6.43).abs() < 1e-9);
    }

    #[test]
    fn test_below_floor_adds_nothing() {
        assert!((critical_chance(6.43, 5, 12) - 6.43).abs() < 1e-9);
    }

    #[test]
    fn test_linear_below_cap() {
        // 14 agility + 14 intelligence above the floor = 2%
        assert!((critical_chance(5.0, 34, 34) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_addition_crossing_cap() {
        // 75 + 5 (to 80) + 15 * 0.5
        assert!((apply_crit_soft_cap(75.0, 20.0) - 87.5).abs() < 1e-9);

        // Same through attributes: 280 surplus points / 14 = 20%
        assert!((critical_chance(75.0, 300, 20) - 87.5).abs() < 1e-9);
    }

    #[test]
    fn test_exactly_at_cap() {
        assert!((apply_crit_soft_cap(70.0, 10.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_already_over_cap() {
        assert!((apply_crit_soft_cap(85.0, 10.0) - 90.0).abs() < 1e-9);
        assert!((apply_crit_soft_cap(80.0, 4.0) - 82.0).abs() < 1e-9);
    }

    #[test]
    fn test_can_exceed_hundred() {
        assert!(critical_chance(80.0, 20 + 14 * 60, 20) > 100.0);
    }

    #[test]
    fn test_negative_base_floors_at_zero() {
        assert!((critical_chance(-10.0, 20, 20) - 0.0).abs() < f64::EPSILON);
    }
}
