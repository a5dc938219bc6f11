// Player records, season-mode snapshots, and player pool loading.
//
// The data-fetch collaborator hands over a JSON array of player records.
// Each record carries a projected and a past-year snapshot; either may be
// absent. Absence is modelled as `Snapshot::NoData`, never as zeros.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::valuation::category::Category;
use crate::valuation::safe_div;

pub type PlayerId = u32;

// ---------------------------------------------------------------------------
// Season mode
// ---------------------------------------------------------------------------

/// Which snapshot the computations read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonMode {
    #[default]
    Projected,
    PastYear,
}

impl SeasonMode {
    pub fn label(&self) -> &'static str {
        match self {
            SeasonMode::Projected => "projected",
            SeasonMode::PastYear => "past_year",
        }
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Basketball position eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
}

impl Position {
    /// Parse a position code ("PG", "sg", ...). Combo codes like "G" or "F"
    /// are not eligibilities and return `None`.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PG" => Some(Position::PointGuard),
            "SG" => Some(Position::ShootingGuard),
            "SF" => Some(Position::SmallForward),
            "PF" => Some(Position::PowerForward),
            "C" => Some(Position::Center),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Format a position list compactly (e.g. "PG/SG").
pub fn format_positions(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "--".to_string();
    }
    positions
        .iter()
        .map(|p| p.display_str())
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Stat lines and snapshots
// ---------------------------------------------------------------------------

/// Per-game stat line for one season mode, plus games played.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatLine {
    pub games: u32,
    #[serde(default)]
    pub minutes: f64,
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    #[serde(rename = "3pm")]
    pub tpm: f64,
    #[serde(rename = "to")]
    pub tov: f64,
    pub fgm: f64,
    pub fga: f64,
    pub ftm: f64,
    pub fta: f64,
}

impl StatLine {
    pub fn fg_pct(&self) -> f64 {
        safe_div(self.fgm, self.fga)
    }

    pub fn ft_pct(&self) -> f64 {
        safe_div(self.ftm, self.fta)
    }

    /// Per-game makes and attempts for a percentage category.
    pub fn makes_attempts(&self, category: Category) -> Option<(f64, f64)> {
        match category {
            Category::FieldGoalPct => Some((self.fgm, self.fga)),
            Category::FreeThrowPct => Some((self.ftm, self.fta)),
            _ => None,
        }
    }

    /// Raw display value: per-game average for counting categories, the
    /// shooting percentage for percentage categories.
    pub fn per_game(&self, category: Category) -> f64 {
        match category {
            Category::FieldGoalPct => self.fg_pct(),
            Category::FreeThrowPct => self.ft_pct(),
            Category::ThreePointers => self.tpm,
            Category::Points => self.pts,
            Category::Rebounds => self.reb,
            Category::Assists => self.ast,
            Category::Steals => self.stl,
            Category::Blocks => self.blk,
            Category::Turnovers => self.tov,
        }
    }

    /// Season-total basis for counting categories (per-game × games).
    /// Percentage categories have no season total and return their
    /// percentage unchanged.
    pub fn season_total(&self, category: Category) -> f64 {
        if category.is_percentage() {
            return self.per_game(category);
        }
        self.per_game(category) * self.games as f64
    }

    /// Season-total attempts for a percentage category (0 for counting ones).
    pub fn season_attempts(&self, category: Category) -> f64 {
        self.makes_attempts(category)
            .map(|(_, attempts)| attempts * self.games as f64)
            .unwrap_or(0.0)
    }

    /// Season-total makes for a percentage category (0 for counting ones).
    pub fn season_makes(&self, category: Category) -> f64 {
        self.makes_attempts(category)
            .map(|(makes, _)| makes * self.games as f64)
            .unwrap_or(0.0)
    }

    fn all_finite(&self) -> bool {
        [
            self.minutes, self.pts, self.reb, self.ast, self.stl, self.blk, self.tpm, self.tov,
            self.fgm, self.fga, self.ftm, self.fta,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// A season-mode snapshot: either a stat line or the explicit "no data"
/// sentinel (e.g. a rookie has no past-year snapshot).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<StatLine>", into = "Option<StatLine>")]
pub enum Snapshot {
    #[default]
    NoData,
    Stats(StatLine),
}

impl From<Option<StatLine>> for Snapshot {
    fn from(line: Option<StatLine>) -> Self {
        match line {
            Some(line) => Snapshot::Stats(line),
            None => Snapshot::NoData,
        }
    }
}

impl From<Snapshot> for Option<StatLine> {
    fn from(snapshot: Snapshot) -> Self {
        match snapshot {
            Snapshot::Stats(line) => Some(line),
            Snapshot::NoData => None,
        }
    }
}

impl Snapshot {
    pub fn line(&self) -> Option<&StatLine> {
        match self {
            Snapshot::Stats(line) => Some(line),
            Snapshot::NoData => None,
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self, Snapshot::Stats(_))
    }

    /// Display value for a category; 0 when there is no data.
    pub fn per_game(&self, category: Category) -> f64 {
        self.line().map_or(0.0, |l| l.per_game(category))
    }

    pub fn games(&self) -> u32 {
        self.line().map_or(0, |l| l.games)
    }

    pub fn minutes(&self) -> f64 {
        self.line().map_or(0.0, |l| l.minutes)
    }
}

// ---------------------------------------------------------------------------
// Player record
// ---------------------------------------------------------------------------

/// Auction dollar values as published by the data source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuctionValues {
    #[serde(default)]
    pub projected: Option<f64>,
    #[serde(default)]
    pub past_year: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Injury {
    pub status: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub projected: Snapshot,
    #[serde(default)]
    pub past_year: Snapshot,
    #[serde(default)]
    pub auction: AuctionValues,
    #[serde(default)]
    pub injuries: Vec<Injury>,
}

impl Player {
    pub fn name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (true, _) => self.last_name.clone(),
            (_, true) => self.first_name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// The single accessor every computation uses to read a season mode.
    pub fn snapshot(&self, mode: SeasonMode) -> &Snapshot {
        match mode {
            SeasonMode::Projected => &self.projected,
            SeasonMode::PastYear => &self.past_year,
        }
    }

    pub fn stats(&self, mode: SeasonMode) -> Option<&StatLine> {
        self.snapshot(mode).line()
    }

    pub fn auction_value(&self, mode: SeasonMode) -> Option<f64> {
        match mode {
            SeasonMode::Projected => self.auction.projected,
            SeasonMode::PastYear => self.auction.past_year,
        }
    }

    pub fn is_injured(&self) -> bool {
        !self.injuries.is_empty()
    }

    fn snapshots_finite(&self) -> bool {
        [&self.projected, &self.past_year]
            .iter()
            .all(|s| s.line().map_or(true, StatLine::all_finite))
    }
}

// ---------------------------------------------------------------------------
// Pool loading
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Parse a JSON array of player records. Malformed records, records with
/// non-finite stats, and duplicate ids are skipped with a warning.
fn load_pool_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, serde_json::Error> {
    let raw: Vec<serde_json::Value> = serde_json::from_reader(rdr)?;
    let mut seen: HashSet<PlayerId> = HashSet::new();
    let mut players = Vec::with_capacity(raw.len());

    for value in raw {
        let player: Player = match serde_json::from_value(value) {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping malformed player record: {}", e);
                continue;
            }
        };
        if !player.snapshots_finite() {
            warn!("skipping player '{}': non-finite stat value", player.name());
            continue;
        }
        if !seen.insert(player.id) {
            warn!("skipping duplicate player id {} ('{}')", player.id, player.name());
            continue;
        }
        players.push(player);
    }
    Ok(players)
}

/// Load the player pool from a JSON file.
pub fn load_pool(path: &Path) -> Result<Vec<Player>, PoolError> {
    let file = std::fs::File::open(path).map_err(|e| PoolError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_pool_from_reader(std::io::BufReader::new(file)).map_err(|e| {
        PoolError::Json {
            path: path.display().to_string(),
            source: e,
        }
    })?;

    if players.is_empty() {
        return Err(PoolError::Validation(format!(
            "{} produced zero valid player records",
            path.display()
        )));
    }

    let rookies = players.iter().filter(|p| !p.past_year.has_data()).count();
    info!(
        "Loaded {} players from {} ({} without past-year data)",
        players.len(),
        path.display(),
        rookies
    );
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
