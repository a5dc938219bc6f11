// Row ordering and the tri-state sort-column controller.

use std::cmp::Ordering;

use crate::valuation::category::Category;
use crate::valuation::ScoredPlayer;

/// Column a view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Total,
    /// Normalized score of one category.
    Score(Category),
    /// Raw per-game value (or percentage) of one category.
    Stat(Category),
    Games,
    Minutes,
    AuctionValue,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Descending,
    Ascending,
    /// Keep the incoming pool order.
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        SortSpec { key, direction }
    }

    pub fn descending(key: SortKey) -> Self {
        SortSpec::new(key, SortDirection::Descending)
    }

    /// Column-header click. A new key starts descending; the active key
    /// cycles descending -> ascending -> none -> descending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key != key {
            self.key = key;
            self.direction = SortDirection::Descending;
            return;
        }
        self.direction = match self.direction {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::None,
            SortDirection::None => SortDirection::Descending,
        };
    }

    pub fn is_active(&self) -> bool {
        self.direction != SortDirection::None
    }
}

/// Numeric value of a sort key for one row. No-data snapshots read as 0.
pub fn sort_value(player: &ScoredPlayer, key: SortKey) -> f64 {
    match key {
        SortKey::Total => player.total(),
        SortKey::Score(category) => player.score(category),
        SortKey::Stat(category) => player.snapshot().per_game(category),
        SortKey::Games => f64::from(player.snapshot().games()),
        SortKey::Minutes => player.snapshot().minutes(),
        SortKey::AuctionValue => player.player.auction_value(player.mode).unwrap_or(0.0),
        // Name is ordered lexically, see compare()
        SortKey::Name => 0.0,
    }
}

fn compare(a: &ScoredPlayer, b: &ScoredPlayer, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a
            .player
            .name()
            .to_lowercase()
            .cmp(&b.player.name().to_lowercase()),
        _ => sort_value(a, key)
            .partial_cmp(&sort_value(b, key))
            .unwrap_or(Ordering::Equal),
    }
}

/// Sort rows in place. The sort is stable in both directions, so ties keep
/// the order they arrived in. `SortDirection::None` leaves rows untouched.
pub fn sort_rows(rows: &mut [&ScoredPlayer], spec: &SortSpec) {
    match spec.direction {
        SortDirection::None => {}
        SortDirection::Ascending => rows.sort_by(|a, b| compare(a, b, spec.key)),
        SortDirection::Descending => rows.sort_by(|a, b| compare(b, a, spec.key)),
    }
}
