// League-wide per-category aggregates with volume-weighted percentage stats.

use std::collections::HashMap;

use tracing::debug;

use crate::player::{Player, SeasonMode, StatLine};
use crate::valuation::category::Category;
use crate::valuation::{safe_div, EPSILON};

// ---------------------------------------------------------------------------
// Category statistics
// ---------------------------------------------------------------------------

/// Min, max, mean and (population) standard deviation of one category's
/// scoring basis across a player pool.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryStat {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

/// Compute min/max/mean/std for a slice of values.
///
/// Returns an all-zero `CategoryStat` for an empty slice. Uses the population
/// standard deviation (N denominator), since the pool is the full relevant
/// player universe rather than a sample.
pub fn compute_category_stat(values: &[f64]) -> CategoryStat {
    if values.is_empty() {
        return CategoryStat::default();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    CategoryStat {
        min,
        max,
        mean,
        std: variance.sqrt(),
    }
}

// ---------------------------------------------------------------------------
// Scoring basis
// ---------------------------------------------------------------------------

/// Pool-wide shooting percentages, weighted by attempts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LeagueAverages {
    pub fg_pct: f64,
    pub ft_pct: f64,
}

impl LeagueAverages {
    pub fn pct(&self, category: Category) -> f64 {
        match category {
            Category::FieldGoalPct => self.fg_pct,
            Category::FreeThrowPct => self.ft_pct,
            _ => 0.0,
        }
    }
}

/// Percentage impact: `(player_pct - league_pct) * attempts`.
///
/// A shooter above the league percentage produces a positive impact that
/// scales with volume, so a 3-for-3 bench player cannot outrank a
/// high-volume efficient starter.
pub fn impact_value(pct: f64, league_pct: f64, attempts: f64) -> f64 {
    (pct - league_pct) * attempts
}

/// The value a category is scored on. Counting categories use the season
/// total (per-game × games); percentage categories use the impact value over
/// season-total attempts. Aggregation and normalization both go through this
/// function so the two bases can never diverge.
pub fn category_value(line: &StatLine, category: Category, league: &LeagueAverages) -> f64 {
    if category.is_percentage() {
        impact_value(
            line.per_game(category),
            league.pct(category),
            line.season_attempts(category),
        )
    } else {
        line.season_total(category)
    }
}

/// Attempt-weighted league percentages over a set of stat lines.
fn compute_league_averages(lines: &[&StatLine]) -> LeagueAverages {
    let ratio = |category: Category| {
        let makes: f64 = lines.iter().map(|l| l.season_makes(category)).sum();
        let attempts: f64 = lines.iter().map(|l| l.season_attempts(category)).sum();
        if attempts < EPSILON {
            return 0.0;
        }
        safe_div(makes, attempts)
    };
    LeagueAverages {
        fg_pct: ratio(Category::FieldGoalPct),
        ft_pct: ratio(Category::FreeThrowPct),
    }
}

// ---------------------------------------------------------------------------
// Pool aggregate
// ---------------------------------------------------------------------------

/// Per-category statistics for one (pool, season mode) pair.
///
/// Built fresh by [`aggregate`]; never patched in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoolAggregate {
    pub mode: SeasonMode,
    pub league: LeagueAverages,
    /// Number of players that contributed to the statistics.
    pub sample_size: usize,
    categories: Vec<Category>,
    stats: HashMap<Category, CategoryStat>,
}

impl PoolAggregate {
    /// Categories in the order they were requested.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Statistics for a category; all-zero for a category that was not
    /// aggregated.
    pub fn get(&self, category: Category) -> CategoryStat {
        self.stats.get(&category).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, CategoryStat)> + '_ {
        self.categories.iter().map(|c| (*c, self.get(*c)))
    }
}

/// Compute per-category statistics over every player with data for `mode`.
pub fn aggregate(players: &[Player], mode: SeasonMode, categories: &[Category]) -> PoolAggregate {
    aggregate_qualified(players, mode, categories, 0)
}

/// Like [`aggregate`], additionally excluding players whose snapshot has
/// fewer than `min_games` games.
///
/// Players without a snapshot for `mode` are excluded rather than counted
/// as zeros. An empty qualified pool yields an all-zero aggregate.
pub fn aggregate_qualified(
    players: &[Player],
    mode: SeasonMode,
    categories: &[Category],
    min_games: u32,
) -> PoolAggregate {
    let mut categories_dedup: Vec<Category> = Vec::with_capacity(categories.len());
    for c in categories {
        if !categories_dedup.contains(c) {
            categories_dedup.push(*c);
        }
    }

    let with_data: Vec<&StatLine> = players.iter().filter_map(|p| p.stats(mode)).collect();
    let qualified: Vec<&StatLine> = with_data
        .iter()
        .copied()
        .filter(|l| l.games >= min_games)
        .collect();

    debug!(
        mode = mode.label(),
        pool = players.len(),
        no_data = players.len() - with_data.len(),
        below_min_games = with_data.len() - qualified.len(),
        "aggregating pool"
    );

    let league = compute_league_averages(&qualified);

    let stats: HashMap<Category, CategoryStat> = categories_dedup
        .iter()
        .map(|&category| {
            let values: Vec<f64> = qualified
                .iter()
                .map(|l| category_value(l, category, &league))
                .collect();
            (category, compute_category_stat(&values))
        })
        .collect();

    PoolAggregate {
        mode,
        league,
        sample_size: qualified.len(),
        categories: categories_dedup,
        stats,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::category::ALL_CATEGORIES;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn line(games: u32, pts: f64, fgm: f64, fga: f64) -> StatLine {
        StatLine {
            games,
            pts,
            fgm,
            fga,
            ..StatLine::default()
        }
    }

    fn player(id: u32, projected: Option<StatLine>, past: Option<StatLine>) -> Player {
        Player {
            id,
            first_name: format!("P{id}"),
            last_name: String::new(),
            team: "TST".into(),
            positions: Vec::new(),
            projected: projected.into(),
            past_year: past.into(),
            auction: Default::default(),
            injuries: Vec::new(),
        }
    }

    #[test]
    fn category_stat_known_values() {
        // Values: [2, 4, 4, 4, 5, 5, 7, 9]
        // Mean = 5, population variance = 32/8 = 4, std = 2
        let stat = compute_category_stat(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!(approx_eq(stat.mean, 5.0, 1e-10));
        assert!(approx_eq(stat.std, 2.0, 1e-10));
        assert!(approx_eq(stat.min, 2.0, 1e-10));
        assert!(approx_eq(stat.max, 9.0, 1e-10));
    }

    #[test]
    fn category_stat_empty_is_zero() {
        assert_eq!(compute_category_stat(&[]), CategoryStat::default());
    }

    #[test]
    fn category_stat_single_value_has_zero_std() {
        let stat = compute_category_stat(&[42.0]);
        assert!(approx_eq(stat.mean, 42.0, 1e-10));
        assert!(approx_eq(stat.std, 0.0, 1e-10));
        assert!(approx_eq(stat.min, stat.max, 1e-10));
    }

    #[test]
    fn impact_scales_with_attempts() {
        // .500 shooter vs .460 league on 1000 attempts => +40
        assert!(approx_eq(impact_value(0.5, 0.46, 1000.0), 40.0, 1e-9));
        let low = impact_value(0.6, 0.46, 100.0);
        let high = impact_value(0.6, 0.46, 400.0);
        assert!(approx_eq(high / low, 4.0, 1e-9));
        assert!(impact_value(0.40, 0.46, 500.0) < 0.0);
    }

    #[test]
    fn counting_categories_use_season_totals() {
        let players = vec![
            player(1, Some(line(80, 20.0, 8.0, 16.0)), None),
            player(2, Some(line(40, 20.0, 8.0, 16.0)), None),
        ];
        let agg = aggregate(&players, SeasonMode::Projected, &[Category::Points]);
        // Totals: 1600 and 800 => mean 1200, std 400
        let pts = agg.get(Category::Points);
        assert!(approx_eq(pts.mean, 1200.0, 1e-9));
        assert!(approx_eq(pts.std, 400.0, 1e-9));
        assert!(approx_eq(pts.min, 800.0, 1e-9));
        assert!(approx_eq(pts.max, 1600.0, 1e-9));
    }

    #[test]
    fn league_fg_pct_is_attempt_weighted() {
        // Player A: 10 games at 5/10 per game
        // Player B: 30 games at 3/10 per game
        let players = vec![
            player(1, Some(line(10, 0.0, 5.0, 10.0)), None),
            player(2, Some(line(30, 0.0, 3.0, 10.0)), None),
        ];
        let agg = aggregate(&players, SeasonMode::Projected, &[Category::FieldGoalPct]);
        // Season totals: A 50/100, B 90/300 => 140/400 = 0.35
        assert!(approx_eq(agg.league.fg_pct, 0.35, 1e-12));

        // Impacts: A (0.5-0.35)*100 = 15, B (0.3-0.35)*300 = -15 => mean 0, std 15
        let fg = agg.get(Category::FieldGoalPct);
        assert!(approx_eq(fg.mean, 0.0, 1e-9));
        assert!(approx_eq(fg.std, 15.0, 1e-9));
    }

    #[test]
    fn players_without_data_are_excluded_not_zeroed() {
        let players = vec![
            player(1, Some(line(10, 10.0, 0.0, 0.0)), Some(line(10, 30.0, 0.0, 0.0))),
            player(2, Some(line(10, 20.0, 0.0, 0.0)), None),
        ];
        let agg = aggregate(&players, SeasonMode::PastYear, &[Category::Points]);
        assert_eq!(agg.sample_size, 1);
        // Only the veteran counts: mean = 300, std = 0 (a zero row would give 150)
        let pts = agg.get(Category::Points);
        assert!(approx_eq(pts.mean, 300.0, 1e-9));
        assert!(approx_eq(pts.std, 0.0, 1e-12));
    }

    #[test]
    fn min_games_excludes_low_sample_players() {
        let players = vec![
            player(1, Some(line(70, 20.0, 0.0, 0.0)), None),
            player(2, Some(line(5, 40.0, 0.0, 0.0)), None),
        ];
        let agg = aggregate_qualified(&players, SeasonMode::Projected, &[Category::Points], 10);
        assert_eq!(agg.sample_size, 1);
        assert!(approx_eq(agg.get(Category::Points).mean, 1400.0, 1e-9));
    }

    #[test]
    fn empty_pool_is_all_zero() {
        let agg = aggregate(&[], SeasonMode::Projected, &ALL_CATEGORIES);
        assert_eq!(agg.sample_size, 0);
        assert_eq!(agg.categories().len(), 9);
        for (_, stat) in agg.iter() {
            assert_eq!(stat, CategoryStat::default());
        }
        assert_eq!(agg.league, LeagueAverages::default());
    }

    #[test]
    fn all_no_data_pool_is_all_zero() {
        let players = vec![player(1, None, None), player(2, None, None)];
        let agg = aggregate(&players, SeasonMode::Projected, &ALL_CATEGORIES);
        assert_eq!(agg.sample_size, 0);
        for (_, stat) in agg.iter() {
            assert!(stat.mean.is_finite() && stat.std.is_finite());
            assert_eq!(stat, CategoryStat::default());
        }
    }

    #[test]
    fn duplicate_categories_collapse() {
        let agg = aggregate(
            &[],
            SeasonMode::Projected,
            &[Category::Points, Category::Points, Category::Blocks],
        );
        assert_eq!(agg.categories(), &[Category::Points, Category::Blocks]);
    }

    #[test]
    fn unrequested_category_reads_as_zero() {
        let players = vec![player(1, Some(line(10, 10.0, 1.0, 2.0)), None)];
        let agg = aggregate(&players, SeasonMode::Projected, &[Category::Points]);
        assert_eq!(agg.get(Category::Steals), CategoryStat::default());
        assert_eq!(agg.mode, SeasonMode::Projected);
    }
}
