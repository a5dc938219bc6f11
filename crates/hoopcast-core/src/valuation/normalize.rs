// Per-category normalization strategies: z-score and min-max.

use serde::{Deserialize, Serialize};

use crate::player::Snapshot;
use crate::valuation::aggregate::{category_value, CategoryStat, PoolAggregate};
use crate::valuation::category::{Category, Polarity};
use crate::valuation::EPSILON;

/// Weight applied to the inverted turnover score under min-max scaling.
pub const MINMAX_TURNOVER_WEIGHT: f64 = 0.25;

// ---------------------------------------------------------------------------
// Normalized score
// ---------------------------------------------------------------------------

/// Per-category normalized scores for one player, in the aggregate's
/// category order, plus the Total once a totalizer has run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NormalizedScore {
    scores: Vec<(Category, f64)>,
    pub total: Option<f64>,
}

impl NormalizedScore {
    pub fn new(scores: Vec<(Category, f64)>) -> Self {
        NormalizedScore {
            scores,
            total: None,
        }
    }

    /// Score for a category; 0 for a category this score does not carry.
    pub fn get(&self, category: Category) -> f64 {
        self.scores
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0.0, |(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.scores.iter().copied()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.scores.iter().map(|(c, _)| *c)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Strategy trait
// ---------------------------------------------------------------------------

/// Turns a player's snapshot plus the pool aggregate into per-category
/// scores. Implementations must never return NaN or infinities.
pub trait ScoreNormalizer {
    /// Score a single category value (already on the aggregate's basis).
    fn score_value(&self, category: Category, value: f64, stat: &CategoryStat) -> f64;

    /// Score every aggregated category for one snapshot. A snapshot without
    /// data scores 0 everywhere. The Total is left unset.
    fn normalize(&self, snapshot: &Snapshot, aggregate: &PoolAggregate) -> NormalizedScore {
        let scores = aggregate
            .iter()
            .map(|(category, stat)| {
                let score = match snapshot.line() {
                    Some(line) => {
                        let value = category_value(line, category, &aggregate.league);
                        self.score_value(category, value, &stat)
                    }
                    None => 0.0,
                };
                (category, score)
            })
            .collect();
        NormalizedScore::new(scores)
    }
}

/// `(value - mean) / std`, inverted for lower-is-better categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZScore;

impl ScoreNormalizer for ZScore {
    fn score_value(&self, category: Category, value: f64, stat: &CategoryStat) -> f64 {
        if stat.std < EPSILON {
            return 0.0;
        }
        match category.polarity() {
            Polarity::HigherIsBetter => (value - stat.mean) / stat.std,
            Polarity::LowerIsBetter => (stat.mean - value) / stat.std,
        }
    }
}

/// Linear rescale of `[min, max]` onto `[-1, 1]`. Inverted categories are
/// mirrored and then multiplied by [`MINMAX_TURNOVER_WEIGHT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMax;

impl ScoreNormalizer for MinMax {
    fn score_value(&self, category: Category, value: f64, stat: &CategoryStat) -> f64 {
        let range = stat.max - stat.min;
        if range < EPSILON {
            return 0.0;
        }
        let unit = (value - stat.min) / range;
        match category.polarity() {
            Polarity::HigherIsBetter => (2.0 * unit - 1.0).clamp(-1.0, 1.0),
            Polarity::LowerIsBetter => {
                (1.0 - 2.0 * unit).clamp(-1.0, 1.0) * MINMAX_TURNOVER_WEIGHT
            }
        }
    }
}

/// Configurable choice of normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    ZScore,
    MinMax,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::ZScore => "zscore",
            Strategy::MinMax => "minmax",
        }
    }
}

impl ScoreNormalizer for Strategy {
    fn score_value(&self, category: Category, value: f64, stat: &CategoryStat) -> f64 {
        match self {
            Strategy::ZScore => ZScore.score_value(category, value, stat),
            Strategy::MinMax => MinMax.score_value(category, value, stat),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
