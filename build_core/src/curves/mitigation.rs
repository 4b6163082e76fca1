//! Armor mitigation - Hyperbolic reduction against a level-scaled constant

use super::constants::{MITIGATION_BASE, MITIGATION_PER_LEVEL};

/// Percent of incoming damage removed by armor at a given level
///
/// `Mitigation = Armor / (200 + 50 * level + Armor) * 100`
pub fn mitigation_percent(armor: f64, level: u32) -> f64 {
    let denominator = MITIGATION_BASE + MITIGATION_PER_LEVEL * level as f64 + armor;
    if denominator <= 0.0 {
        return 0.0;
    }
    armor / denominator * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_armor() {
        assert!((mitigation_percent(0.0, 10) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_level_one() {
        // 250 / (200 + 50 + 250) = 50%
        assert!((mitigation_percent(250.0, 1) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_higher_level_reduces_mitigation() {
        let low = mitigation_percent(500.0, 10);
        let high = mitigation_percent(500.0, 60);
        assert!(high < low);
    }

    #[test]
    fn test_diminishing_returns() {
        let first = mitigation_percent(100.0, 20);
        let doubled = mitigation_percent(200.0, 20);
        assert!(doubled > first);
        assert!(doubled < first * 2.0);
    }
}
