// Row filtering: position eligibility, team, name text, favourites.

use std::collections::HashSet;

use crate::player::{PlayerId, Position};
use crate::valuation::ScoredPlayer;

/// Active row filters. The default filter passes everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// A player passes if ANY of their positions is in the set. Empty passes all.
    pub positions: HashSet<Position>,
    /// Exact team abbreviation, or `None` to pass all teams.
    pub team: Option<String>,
    /// Case-insensitive substring match on the full name. Empty passes all.
    pub text: String,
    /// Keep only ids in the favourites set handed to [`filter_players`].
    pub favourites_only: bool,
}

impl FilterSpec {
    pub fn with_positions<I: IntoIterator<Item = Position>>(positions: I) -> Self {
        FilterSpec {
            positions: positions.into_iter().collect(),
            ..FilterSpec::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.team.is_none() && self.text.is_empty() && !self.favourites_only
    }

    /// Whether a single player passes every active filter.
    pub fn matches(&self, player: &ScoredPlayer, favourites: &HashSet<PlayerId>) -> bool {
        let p = &player.player;

        if !self.positions.is_empty() && !p.positions.iter().any(|pos| self.positions.contains(pos)) {
            return false;
        }
        if let Some(team) = &self.team {
            if p.team != *team {
                return false;
            }
        }
        if !self.text.is_empty() && !p.name().to_lowercase().contains(&self.text.to_lowercase()) {
            return false;
        }
        if self.favourites_only && !favourites.contains(&p.id) {
            return false;
        }
        true
    }
}

/// Filter scored players, preserving their order.
pub fn filter_players<'a>(
    players: &'a [ScoredPlayer],
    spec: &FilterSpec,
    favourites: &HashSet<PlayerId>,
) -> Vec<&'a ScoredPlayer> {
    players.iter().filter(|p| spec.matches(p, favourites)).collect()
}
