// Valuation engine: pool aggregates, normalized category scores, punt totals,
// and static highlight tiers.

pub mod aggregate;
pub mod category;
pub mod normalize;
pub mod tiers;
pub mod totals;

use tracing::debug;

use crate::player::{Player, PlayerId, SeasonMode, Snapshot};
use crate::valuation::aggregate::{aggregate_qualified, PoolAggregate};
use crate::valuation::category::Category;
use crate::valuation::normalize::{NormalizedScore, ScoreNormalizer, Strategy};
use crate::valuation::totals::{retotal, PuntSet};

/// Threshold below which a denominator is treated as zero.
pub(crate) const EPSILON: f64 = 1e-9;

/// `numerator / denominator`, or 0 when the denominator is (nearly) zero.
pub(crate) fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < EPSILON {
        return 0.0;
    }
    numerator / denominator
}

// ---------------------------------------------------------------------------
// Scored players
// ---------------------------------------------------------------------------

/// A player carried through the scoring pipeline for one season mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlayer {
    pub player: Player,
    pub mode: SeasonMode,
    pub scores: NormalizedScore,
}

impl ScoredPlayer {
    pub fn id(&self) -> PlayerId {
        self.player.id
    }

    /// The snapshot the scores were computed from.
    pub fn snapshot(&self) -> &Snapshot {
        self.player.snapshot(self.mode)
    }

    pub fn total(&self) -> f64 {
        self.scores.total.unwrap_or(0.0)
    }

    pub fn score(&self, category: Category) -> f64 {
        self.scores.get(category)
    }
}

/// Inputs that determine the aggregate and every category score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringParams {
    pub mode: SeasonMode,
    pub strategy: Strategy,
    pub categories: Vec<Category>,
    /// Players with fewer games are left out of the aggregate (still scored).
    pub min_games: u32,
}

/// A fully scored pool. Players keep the order of the input pool.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPool {
    pub params: ScoringParams,
    pub aggregate: PoolAggregate,
    pub players: Vec<ScoredPlayer>,
}

impl ScoredPool {
    /// Re-apply a punt set. Touches only the Totals.
    pub fn apply_punts(&mut self, punts: &PuntSet) {
        retotal(&mut self.players, punts);
    }
}

/// Aggregate the pool, normalize every player against it, and total the
/// scores under `punts`.
///
/// Every player is scored, including those excluded from the aggregate;
/// players without data for the mode score 0 everywhere.
pub fn score_pool(players: &[Player], params: &ScoringParams, punts: &PuntSet) -> ScoredPool {
    let aggregate = aggregate_qualified(players, params.mode, &params.categories, params.min_games);

    let mut scored: Vec<ScoredPlayer> = players
        .iter()
        .map(|p| ScoredPlayer {
            scores: params.strategy.normalize(p.snapshot(params.mode), &aggregate),
            mode: params.mode,
            player: p.clone(),
        })
        .collect();
    retotal(&mut scored, punts);

    debug!(
        players = scored.len(),
        sample = aggregate.sample_size,
        strategy = params.strategy.label(),
        mode = params.mode.label(),
        "scored pool"
    );

    ScoredPool {
        params: params.clone(),
        aggregate,
        players: scored,
    }
}

// ---------------------------------------------------------------------------
// Score cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CacheEntry {
    pool_version: u64,
    pool: ScoredPool,
}

/// Memoizes the most recent scored pool, keyed by the caller's pool version
/// and the scoring parameters. Any key change recomputes from scratch; a
/// punt change only re-totals.
#[derive(Debug, Clone, Default)]
pub struct ScoreCache {
    entry: Option<CacheEntry>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the scored pool for `(pool_version, params)`, recomputing only
    /// when the key differs from the cached one. Totals always reflect
    /// `punts`.
    pub fn get_or_score(
        &mut self,
        pool_version: u64,
        players: &[Player],
        params: &ScoringParams,
        punts: &PuntSet,
    ) -> &ScoredPool {
        let fresh = matches!(
            &self.entry,
            Some(e) if e.pool_version == pool_version && e.pool.params == *params
        );
        if fresh {
            debug!(pool_version, "score cache hit");
        } else {
            debug!(pool_version, "score cache miss, recomputing");
            self.entry = None;
        }

        let entry = self.entry.get_or_insert_with(|| CacheEntry {
            pool_version,
            pool: score_pool(players, params, punts),
        });
        entry.pool.apply_punts(punts);
        &entry.pool
    }

    /// Whether a pool for this key is cached.
    pub fn is_cached(&self, pool_version: u64, params: &ScoringParams) -> bool {
        matches!(
            &self.entry,
            Some(e) if e.pool_version == pool_version && e.pool.params == *params
        )
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
