// Aggregate summary over a user-selected set of rows.

use std::collections::HashSet;

use serde::Serialize;

use crate::player::PlayerId;
use crate::valuation::category::{Category, ALL_CATEGORIES};
use crate::valuation::{safe_div, ScoredPlayer};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatSummary {
    pub sum: f64,
    pub average: f64,
}

impl StatSummary {
    fn from_values<I: IntoIterator<Item = f64>>(values: I, count: usize) -> Self {
        let sum: f64 = values.into_iter().sum();
        StatSummary {
            sum,
            average: safe_div(sum, count as f64),
        }
    }
}

/// Volume-weighted shooting over a selection: `makes / attempts`, never
/// the mean of individual percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PercentageSummary {
    pub makes: f64,
    pub attempts: f64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SelectionSummary {
    pub count: usize,
    stats: Vec<(Category, StatSummary)>,
    percentages: Vec<(Category, PercentageSummary)>,
    scores: Vec<(Category, StatSummary)>,
    pub total: StatSummary,
    pub games: StatSummary,
    pub minutes: StatSummary,
}

impl SelectionSummary {
    /// Per-game counting stat summary. Zero for percentage categories.
    pub fn stat(&self, category: Category) -> StatSummary {
        lookup(&self.stats, category)
    }

    pub fn percentage(&self, category: Category) -> PercentageSummary {
        lookup(&self.percentages, category)
    }

    /// Normalized score summary for a category.
    pub fn score(&self, category: Category) -> StatSummary {
        lookup(&self.scores, category)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn lookup<T: Copy + Default>(entries: &[(Category, T)], category: Category) -> T {
    entries
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, v)| *v)
        .unwrap_or_default()
}

/// Summarize every player in `players` whose id is in `selection`.
///
/// Players without data for the mode contribute zeros and still count
/// toward averages. An empty selection yields an all-zero summary.
pub fn summarize(players: &[ScoredPlayer], selection: &HashSet<PlayerId>) -> SelectionSummary {
    let selected: Vec<&ScoredPlayer> = players
        .iter()
        .filter(|p| selection.contains(&p.id()))
        .collect();
    let count = selected.len();
    if count == 0 {
        return SelectionSummary::default();
    }

    let stats = ALL_CATEGORIES
        .iter()
        .filter(|c| !c.is_percentage())
        .map(|&c| {
            let summary =
                StatSummary::from_values(selected.iter().map(|p| p.snapshot().per_game(c)), count);
            (c, summary)
        })
        .collect();

    let percentages = ALL_CATEGORIES
        .iter()
        .filter(|c| c.is_percentage())
        .map(|&c| {
            let (makes, attempts) = selected
                .iter()
                .filter_map(|p| p.snapshot().line())
                .filter_map(|l| l.makes_attempts(c))
                .fold((0.0, 0.0), |(m, a), (pm, pa)| (m + pm, a + pa));
            let summary = PercentageSummary {
                makes,
                attempts,
                pct: safe_div(makes, attempts),
            };
            (c, summary)
        })
        .collect();

    // Every row of one scored pool carries the same score categories.
    let scores = selected[0]
        .scores
        .categories()
        .map(|c| {
            let summary = StatSummary::from_values(selected.iter().map(|p| p.score(c)), count);
            (c, summary)
        })
        .collect();

    SelectionSummary {
        count,
        stats,
        percentages,
        scores,
        total: StatSummary::from_values(selected.iter().map(|p| p.total()), count),
        games: StatSummary::from_values(
            selected.iter().map(|p| f64::from(p.snapshot().games())),
            count,
        ),
        minutes: StatSummary::from_values(selected.iter().map(|p| p.snapshot().minutes()), count),
    }
}
