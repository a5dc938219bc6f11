// View projection: filter -> sort over a scored pool, plus the selection summary.

pub mod filter;
pub mod sort;
pub mod summary;

use std::collections::HashSet;

use tracing::debug;

use crate::favourites::FavouritesStore;
use crate::player::PlayerId;
use crate::valuation::ScoredPlayer;
use crate::view::filter::{filter_players, FilterSpec};
use crate::view::sort::{sort_rows, SortSpec};
use crate::view::summary::{summarize, SelectionSummary};

/// Everything the presentation layer controls about the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSpec {
    pub filter: FilterSpec,
    pub sort: SortSpec,
    pub selection: HashSet<PlayerId>,
}

/// Rows to display, in order, and the summary of the current selection.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    pub rows: Vec<&'a ScoredPlayer>,
    pub summary: SelectionSummary,
}

impl<'a> Projection<'a> {
    pub fn ids(&self) -> Vec<PlayerId> {
        self.rows.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project a scored pool into display rows.
///
/// `players` must be in pool order; an unsorted view returns exactly that
/// order. The selection summary covers every selected player in the pool,
/// whether or not the current filter shows them.
pub fn project<'a>(
    players: &'a [ScoredPlayer],
    spec: &ViewSpec,
    favourites: &dyn FavouritesStore,
) -> Projection<'a> {
    let favourite_ids = if spec.filter.favourites_only {
        favourites.all()
    } else {
        HashSet::new()
    };

    let mut rows = filter_players(players, &spec.filter, &favourite_ids);
    sort_rows(&mut rows, &spec.sort);
    let summary = summarize(players, &spec.selection);

    debug!(
        pool = players.len(),
        rows = rows.len(),
        selected = summary.count,
        "projected view"
    );

    Projection { rows, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favourites::MemoryFavourites;
    use crate::player::{Player, Position, SeasonMode, Snapshot, StatLine};
    use crate::valuation::category::Category;
    use crate::valuation::normalize::NormalizedScore;
    use crate::view::sort::{SortDirection, SortKey};

    fn make_row(id: u32, positions: Vec<Position>, total: f64) -> ScoredPlayer {
        let mut scores = NormalizedScore::new(vec![(Category::Points, total)]);
        scores.total = Some(total);
        ScoredPlayer {
            player: Player {
                id,
                first_name: format!("P{id}"),
                last_name: String::new(),
                team: if id % 2 == 0 { "BOS".into() } else { "MIA".into() },
                positions,
                projected: Some(StatLine {
                    games: 60,
                    pts: total * 10.0,
                    ..StatLine::default()
                })
                .into(),
                past_year: Snapshot::NoData,
                auction: Default::default(),
                injuries: Vec::new(),
            },
            mode: SeasonMode::Projected,
            scores,
        }
    }

    fn pool() -> Vec<ScoredPlayer> {
        vec![
            make_row(1, vec![Position::PointGuard], 1.0),
            make_row(2, vec![Position::ShootingGuard, Position::SmallForward], 3.0),
            make_row(3, vec![Position::PowerForward, Position::Center], 2.0),
            make_row(4, vec![Position::Center], 3.0),
        ]
    }

    #[test]
    fn default_view_is_pool_order() {
        let players = pool();
        let projection = project(&players, &ViewSpec::default(), &MemoryFavourites::new());
        assert_eq!(projection.ids(), vec![1, 2, 3, 4]);
        assert!(projection.summary.is_empty());
    }

    #[test]
    fn tri_state_cycle_restores_pool_order() {
        let players = pool();
        let favourites = MemoryFavourites::new();
        let mut spec = ViewSpec::default();

        spec.sort.toggle(SortKey::Total);
        assert_eq!(project(&players, &spec, &favourites).ids(), vec![2, 4, 3, 1]);
        spec.sort.toggle(SortKey::Total);
        assert_eq!(project(&players, &spec, &favourites).ids(), vec![1, 3, 2, 4]);
        spec.sort.toggle(SortKey::Total);
        assert_eq!(spec.sort.direction, SortDirection::None);
        assert_eq!(project(&players, &spec, &favourites).ids(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn favourites_filter_reads_store() {
        let players = pool();
        let mut favourites = MemoryFavourites::new();
        favourites.toggle(3).unwrap();
        favourites.toggle(1).unwrap();

        let mut spec = ViewSpec::default();
        spec.filter.favourites_only = true;
        spec.sort = SortSpec::descending(SortKey::Total);
        assert_eq!(project(&players, &spec, &favourites).ids(), vec![3, 1]);
    }

    #[test]
    fn summary_covers_selection_outside_filter() {
        let players = pool();
        let spec = ViewSpec {
            filter: FilterSpec::with_positions([Position::PointGuard]),
            sort: SortSpec::default(),
            selection: [1, 4].into_iter().collect(),
        };
        let projection = project(&players, &spec, &MemoryFavourites::new());
        assert_eq!(projection.ids(), vec![1]);
        assert_eq!(projection.summary.count, 2);
        // Totals 1.0 + 3.0
        assert_eq!(projection.summary.total.sum, 4.0);
    }

    #[test]
    fn filter_and_sort_compose() {
        let players = pool();
        let spec = ViewSpec {
            filter: FilterSpec::with_positions([Position::Center, Position::SmallForward]),
            sort: SortSpec::new(SortKey::Total, SortDirection::Ascending),
            selection: HashSet::new(),
        };
        let projection = project(&players, &spec, &MemoryFavourites::new());
        // 3 (2.0), then ties 2 and 4 at 3.0 in pool order
        assert_eq!(projection.ids(), vec![3, 2, 4]);
        assert_eq!(projection.len(), 3);
    }

    #[test]
    fn projection_does_not_mutate_pool() {
        let players = pool();
        let before = players.clone();
        let spec = ViewSpec {
            sort: SortSpec::descending(SortKey::Stat(Category::Points)),
            ..ViewSpec::default()
        };
        let _ = project(&players, &spec, &MemoryFavourites::new());
        assert_eq!(players, before);
    }
}
