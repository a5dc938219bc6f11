// Static highlight tiers for raw per-game values.
//
// The cutoffs are fixed basketball calibrations, not percentiles of the
// live pool. They must not be derived from the current dataset.

use crate::valuation::category::{Category, Polarity};

/// Tier returned for unknown categories and non-finite values.
pub const NEUTRAL_TIER: u8 = 2;

/// Highest tier.
pub const MAX_TIER: u8 = 4;

/// Cutoffs per category, listed from the worst end of the scale to the
/// best: ascending for normal categories, descending for turnovers.
const THRESHOLDS: [(Category, [f64; 4]); 9] = [
    (Category::FieldGoalPct, [0.445, 0.465, 0.49, 0.535]),
    (Category::FreeThrowPct, [0.72, 0.77, 0.82, 0.87]),
    (Category::ThreePointers, [0.5, 1.1, 1.8, 2.6]),
    (Category::Points, [9.0, 13.0, 18.0, 24.0]),
    (Category::Rebounds, [3.0, 4.5, 6.5, 9.0]),
    (Category::Assists, [1.5, 2.5, 4.0, 6.0]),
    (Category::Steals, [0.5, 0.8, 1.1, 1.4]),
    (Category::Blocks, [0.25, 0.45, 0.8, 1.3]),
    (Category::Turnovers, [2.9, 2.3, 1.7, 1.4]),
];

/// The cutoff row for a category.
pub fn thresholds(category: Category) -> [f64; 4] {
    THRESHOLDS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, t)| *t)
        .unwrap_or_default()
}

/// Classify a raw value by category key. Unknown keys get [`NEUTRAL_TIER`].
pub fn classify(value: f64, key: &str) -> u8 {
    match Category::from_key(key) {
        Some(category) => classify_category(value, category),
        None => NEUTRAL_TIER,
    }
}

/// Classify a raw value into a tier in `0..=4`.
///
/// Let `c` be the number of cutoffs the value is at or above. The band is
/// `c - 1`, floored at 0 and capped at 3, so values below the second cutoff
/// share the bottom band. Higher-is-better categories report the band
/// directly; turnovers mirror it as `4 - band`.
pub fn classify_category(value: f64, category: Category) -> u8 {
    if !value.is_finite() {
        return NEUTRAL_TIER;
    }
    let cutoffs = thresholds(category);
    let at_or_above = cutoffs.iter().filter(|&&t| value >= t).count() as u8;
    let band = at_or_above.saturating_sub(1).min(MAX_TIER - 1);
    match category.polarity() {
        Polarity::HigherIsBetter => band,
        Polarity::LowerIsBetter => MAX_TIER - band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::category::ALL_CATEGORIES;

    #[test]
    fn field_goal_example() {
        // 0.50 clears 0.445, 0.465 and 0.49 but not 0.535
        assert_eq!(classify(0.50, "fg"), 2);
    }

    #[test]
    fn turnover_example_is_inverted() {
        // 1.7 <= 1.9 < 2.3
        assert_eq!(classify(1.9, "to"), 3);
    }

    #[test]
    fn field_goal_bands() {
        assert_eq!(classify(0.40, "fg"), 0);
        assert_eq!(classify(0.45, "fg"), 0);
        assert_eq!(classify(0.47, "fg"), 1);
        assert_eq!(classify(0.60, "fg"), 3);
    }

    #[test]
    fn turnover_bands() {
        // Careless ball-handler sits at the bottom of the inverted scale
        assert_eq!(classify(3.5, "to"), 1);
        assert_eq!(classify(2.5, "to"), 2);
        assert_eq!(classify(1.5, "to"), 4);
        assert_eq!(classify(0.8, "to"), 4);
    }

    #[test]
    fn higher_turnovers_never_rank_above_lower() {
        let values = [0.5, 1.0, 1.45, 1.8, 2.4, 3.0, 4.0];
        for w in values.windows(2) {
            assert!(classify(w[0], "to") >= classify(w[1], "to"));
        }
    }

    #[test]
    fn tiers_are_monotone_for_normal_categories() {
        for cat in ALL_CATEGORIES.into_iter().filter(|c| *c != Category::Turnovers) {
            let t = thresholds(cat);
            let probes = [t[0] - 1.0, t[0], t[1], t[2], t[3], t[3] + 1.0];
            for w in probes.windows(2) {
                assert!(classify_category(w[0], cat) <= classify_category(w[1], cat), "{cat}");
            }
        }
    }

    #[test]
    fn unknown_key_is_neutral() {
        assert_eq!(classify(10.0, "double_doubles"), NEUTRAL_TIER);
    }

    #[test]
    fn non_finite_value_is_neutral() {
        assert_eq!(classify(f64::NAN, "pts"), NEUTRAL_TIER);
    }

    #[test]
    fn tier_is_always_in_range() {
        for cat in ALL_CATEGORIES {
            for v in [-10.0, 0.0, 0.5, 1.0, 2.0, 5.0, 50.0] {
                assert!(classify_category(v, cat) <= MAX_TIER);
            }
        }
    }

    #[test]
    fn every_category_has_a_row() {
        for cat in ALL_CATEGORIES {
            assert_ne!(thresholds(cat), [0.0; 4], "{cat}");
        }
    }
}
