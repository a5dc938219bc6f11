// Export records for projected rows and a CSV writer over them.
//
// Column keys depend only on the configured category list. Season mode and
// punts change values, never the key set.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::player::format_positions;
use crate::valuation::category::Category;
use crate::valuation::ScoredPlayer;

/// Raw stat columns, in output order.
const STAT_COLUMNS: [(&str, Category); 9] = [
    ("pts", Category::Points),
    ("reb", Category::Rebounds),
    ("ast", Category::Assists),
    ("stl", Category::Steals),
    ("blk", Category::Blocks),
    ("3pm", Category::ThreePointers),
    ("to", Category::Turnovers),
    ("fg_pct", Category::FieldGoalPct),
    ("ft_pct", Category::FreeThrowPct),
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single exported value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(u64),
    Float(f64),
    Text(String),
}

impl Cell {
    fn render(&self) -> String {
        match self {
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => format!("{v:.4}"),
            Cell::Text(s) => s.clone(),
        }
    }
}

/// One exported player, as ordered `(key, value)` columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    columns: Vec<(String, Cell)>,
}

impl ExportRow {
    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.columns.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.columns.iter().map(|(_, v)| v)
    }
}

fn score_key(category: Category) -> String {
    format!("z_{}", category.key())
}

/// Column keys for a category list.
pub fn headers(categories: &[Category]) -> Vec<String> {
    let mut keys: Vec<String> = ["id", "name", "team", "positions", "games", "minutes"]
        .iter()
        .map(|k| k.to_string())
        .collect();
    keys.extend(STAT_COLUMNS.iter().map(|(k, _)| k.to_string()));
    keys.extend(categories.iter().map(|c| score_key(*c)));
    keys.push("total".into());
    keys
}

pub fn export_row(player: &ScoredPlayer, categories: &[Category]) -> ExportRow {
    let snapshot = player.snapshot();
    let mut columns = vec![
        ("id".to_string(), Cell::Int(u64::from(player.id()))),
        ("name".to_string(), Cell::Text(player.player.name())),
        ("team".to_string(), Cell::Text(player.player.team.clone())),
        (
            "positions".to_string(),
            Cell::Text(format_positions(&player.player.positions)),
        ),
        ("games".to_string(), Cell::Int(u64::from(snapshot.games()))),
        ("minutes".to_string(), Cell::Float(snapshot.minutes())),
    ];
    columns.extend(
        STAT_COLUMNS
            .iter()
            .map(|(k, c)| (k.to_string(), Cell::Float(snapshot.per_game(*c)))),
    );
    columns.extend(
        categories
            .iter()
            .map(|c| (score_key(*c), Cell::Float(player.score(*c)))),
    );
    columns.push(("total".to_string(), Cell::Float(player.total())));
    ExportRow { columns }
}

pub fn export_rows(rows: &[&ScoredPlayer], categories: &[Category]) -> Vec<ExportRow> {
    rows.iter().map(|p| export_row(p, categories)).collect()
}

/// Write a header line plus one record per row.
pub fn write_csv<W: Write>(
    writer: W,
    categories: &[Category],
    rows: &[ExportRow],
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers(categories))?;
    for row in rows {
        wtr.write_record(row.values().map(Cell::render))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write rows to a CSV file at `path`, replacing any existing file.
pub fn export_csv(path: &Path, categories: &[Category], rows: &[ExportRow]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    write_csv(file, categories, rows)?;
    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}
