// Scoring categories: stable keys, polarity, and counting vs. percentage kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A nine-category basketball scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "fg")]
    FieldGoalPct,
    #[serde(rename = "ft")]
    FreeThrowPct,
    #[serde(rename = "3pm")]
    ThreePointers,
    #[serde(rename = "pts")]
    Points,
    #[serde(rename = "reb")]
    Rebounds,
    #[serde(rename = "ast")]
    Assists,
    #[serde(rename = "stl")]
    Steals,
    #[serde(rename = "blk")]
    Blocks,
    #[serde(rename = "to")]
    Turnovers,
}

/// All categories in canonical display order.
pub const ALL_CATEGORIES: [Category; 9] = [
    Category::FieldGoalPct,
    Category::FreeThrowPct,
    Category::ThreePointers,
    Category::Points,
    Category::Rebounds,
    Category::Assists,
    Category::Steals,
    Category::Blocks,
    Category::Turnovers,
];

/// Whether a category is accumulated per game or computed from makes/attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Counting,
    Percentage,
}

/// Direction in which a category's raw value is "good".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Category {
    /// Stable key used in config files, export columns, and the classifier.
    pub fn key(&self) -> &'static str {
        match self {
            Category::FieldGoalPct => "fg",
            Category::FreeThrowPct => "ft",
            Category::ThreePointers => "3pm",
            Category::Points => "pts",
            Category::Rebounds => "reb",
            Category::Assists => "ast",
            Category::Steals => "stl",
            Category::Blocks => "blk",
            Category::Turnovers => "to",
        }
    }

    /// Parse a category key. Accepts the stable keys plus common display
    /// spellings ("FG%", "TOV", "TPM", ...). Returns `None` for anything else.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fg" | "fg%" | "fg_pct" => Some(Category::FieldGoalPct),
            "ft" | "ft%" | "ft_pct" => Some(Category::FreeThrowPct),
            "3pm" | "3ptm" | "tpm" | "fg3m" => Some(Category::ThreePointers),
            "pts" => Some(Category::Points),
            "reb" => Some(Category::Rebounds),
            "ast" => Some(Category::Assists),
            "stl" => Some(Category::Steals),
            "blk" => Some(Category::Blocks),
            "to" | "tov" => Some(Category::Turnovers),
            _ => None,
        }
    }

    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::FieldGoalPct => "FG%",
            Category::FreeThrowPct => "FT%",
            Category::ThreePointers => "3PM",
            Category::Points => "PTS",
            Category::Rebounds => "REB",
            Category::Assists => "AST",
            Category::Steals => "STL",
            Category::Blocks => "BLK",
            Category::Turnovers => "TO",
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::FieldGoalPct | Category::FreeThrowPct => CategoryKind::Percentage,
            _ => CategoryKind::Counting,
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Category::Turnovers => Polarity::LowerIsBetter,
            _ => Polarity::HigherIsBetter,
        }
    }

    pub fn is_percentage(&self) -> bool {
        self.kind() == CategoryKind::Percentage
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
