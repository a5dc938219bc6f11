// Punt set and the Total (sum of non-punted category scores).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::valuation::category::Category;
use crate::valuation::normalize::NormalizedScore;
use crate::valuation::ScoredPlayer;

/// Categories the user has chosen to exclude from the Total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuntSet(BTreeSet<Category>);

impl PuntSet {
    pub fn new() -> Self {
        PuntSet(BTreeSet::new())
    }

    /// Build a punt set from category keys. Unrecognized keys are ignored.
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut set = BTreeSet::new();
        for key in keys {
            match Category::from_key(key.as_ref()) {
                Some(c) => {
                    set.insert(c);
                }
                None => debug!("ignoring unknown punt key '{}'", key.as_ref()),
            }
        }
        PuntSet(set)
    }

    /// Flip membership. Returns `true` if the category is now punted.
    pub fn toggle(&mut self, category: Category) -> bool {
        if self.0.remove(&category) {
            false
        } else {
            self.0.insert(category);
            true
        }
    }

    pub fn insert(&mut self, category: Category) -> bool {
        self.0.insert(category)
    }

    pub fn remove(&mut self, category: Category) -> bool {
        self.0.remove(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Category> for PuntSet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        PuntSet(iter.into_iter().collect())
    }
}

/// Sum of the scores of every category not in `punts`.
pub fn totalize(score: &NormalizedScore, punts: &PuntSet) -> f64 {
    score
        .iter()
        .filter(|(category, _)| !punts.contains(*category))
        .map(|(_, s)| s)
        .sum()
}

/// Return a copy of `score` with its Total set.
pub fn with_total(score: &NormalizedScore, punts: &PuntSet) -> NormalizedScore {
    let mut out = score.clone();
    out.total = Some(totalize(score, punts));
    out
}

/// Recompute the Total of every scored player in place. Only the Total
/// changes; category scores and the aggregate are left untouched.
pub fn retotal(players: &mut [ScoredPlayer], punts: &PuntSet) {
    for p in players.iter_mut() {
        p.scores.total = Some(totalize(&p.scores, punts));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn sample_score() -> NormalizedScore {
        NormalizedScore::new(vec![
            (Category::FieldGoalPct, 1.25),
            (Category::Points, 2.0),
            (Category::Turnovers, -1.5),
            (Category::Blocks, 0.0),
        ])
    }

    #[test]
    fn total_without_punts_is_plain_sum() {
        let total = totalize(&sample_score(), &PuntSet::new());
        assert!(approx_eq(total, 1.75, 1e-12));
    }

    #[test]
    fn punting_removes_exactly_that_score() {
        let score = sample_score();
        let mut punts = PuntSet::new();
        let before = totalize(&score, &punts);

        punts.toggle(Category::Turnovers);
        let after = totalize(&score, &punts);
        assert!(approx_eq(before - after, score.get(Category::Turnovers), 1e-12));

        punts.toggle(Category::Turnovers);
        assert_eq!(totalize(&score, &punts), before);
    }

    #[test]
    fn punting_zero_score_leaves_total_unchanged() {
        let score = sample_score();
        let punts: PuntSet = [Category::Blocks].into_iter().collect();
        assert_eq!(totalize(&score, &punts), totalize(&score, &PuntSet::new()));
    }

    #[test]
    fn punting_category_not_scored_is_noop() {
        let score = sample_score();
        let punts: PuntSet = [Category::Steals].into_iter().collect();
        assert_eq!(totalize(&score, &punts), totalize(&score, &PuntSet::new()));
    }

    #[test]
    fn from_keys_ignores_unknown() {
        let punts = PuntSet::from_keys(&["ft", "bogus", "TO"]);
        assert_eq!(punts.len(), 2);
        assert!(punts.contains(Category::FreeThrowPct));
        assert!(punts.contains(Category::Turnovers));
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut punts = PuntSet::new();
        assert!(punts.toggle(Category::Assists));
        assert!(!punts.toggle(Category::Assists));
        assert!(punts.is_empty());
    }

    #[test]
    fn with_total_sets_total_only() {
        let score = sample_score();
        let punts: PuntSet = [Category::Points].into_iter().collect();
        let totaled = with_total(&score, &punts);
        assert!(approx_eq(totaled.total.unwrap(), -0.25, 1e-12));
        assert_eq!(totaled.get(Category::Points), 2.0);
        assert!(score.total.is_none());
    }

    #[test]
    fn serde_is_a_plain_key_list() {
        let punts: PuntSet = [Category::Turnovers, Category::FieldGoalPct].into_iter().collect();
        let json = serde_json::to_string(&punts).unwrap();
        assert_eq!(json, "[\"fg\",\"to\"]");
    }
}
