// Configuration loading and parsing (config/league.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::player::SeasonMode;
use crate::valuation::category::{Category, ALL_CATEGORIES};
use crate::valuation::normalize::Strategy;
use crate::valuation::totals::PuntSet;
use crate::valuation::ScoringParams;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub scoring: ScoringConfig,
    pub data_paths: DataPaths,
}

#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub name: String,
    /// Scored categories, in configured order.
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub strategy: Strategy,
    pub season_mode: SeasonMode,
    pub punts: PuntSet,
    pub min_games: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
    #[serde(default)]
    pub favourites_db: Option<String>,
}

impl Config {
    /// Scoring inputs for the valuation pipeline.
    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            mode: self.scoring.season_mode,
            strategy: self.scoring.strategy,
            categories: self.league.categories.clone(),
            min_games: self.scoring.min_games,
        }
    }

    /// Favourites database location: the configured path, else the
    /// platform data directory, else `hoopcast.db` in the working directory.
    pub fn favourites_db_path(&self) -> PathBuf {
        if let Some(path) = &self.data_paths.favourites_db {
            return PathBuf::from(path);
        }
        directories::ProjectDirs::from("", "", "hoopcast")
            .map(|dirs| dirs.data_dir().join("favourites.db"))
            .unwrap_or_else(|| PathBuf::from("hoopcast.db"))
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueSection,
    #[serde(default)]
    scoring: ScoringSection,
    data: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
struct LeagueSection {
    name: String,
    #[serde(default = "default_categories")]
    categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ScoringSection {
    #[serde(default)]
    strategy: Strategy,
    #[serde(default)]
    season_mode: SeasonMode,
    #[serde(default)]
    punts: Vec<String>,
    #[serde(default)]
    min_games: u32,
}

fn default_categories() -> Vec<String> {
    ALL_CATEGORIES.iter().map(|c| c.key().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text = read_file(&league_path)?;
    let file: LeagueFile = toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
        path: league_path.clone(),
        source: e,
    })?;

    let categories = validate(&file)?;

    Ok(Config {
        league: LeagueConfig {
            name: file.league.name,
            categories,
        },
        scoring: ScoringConfig {
            strategy: file.scoring.strategy,
            season_mode: file.scoring.season_mode,
            punts: PuntSet::from_keys(&file.scoring.punts),
            min_games: file.scoring.min_games,
        },
        data_paths: file.data,
    })
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the raw file and resolve the category list.
fn validate(file: &LeagueFile) -> Result<Vec<Category>, ConfigError> {
    if file.league.categories.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.categories".into(),
            message: "must list at least one category".into(),
        });
    }

    let mut categories = Vec::with_capacity(file.league.categories.len());
    for key in &file.league.categories {
        let Some(category) = Category::from_key(key) else {
            return Err(ConfigError::ValidationError {
                field: "league.categories".into(),
                message: format!("unknown category '{key}'"),
            });
        };
        if categories.contains(&category) {
            return Err(ConfigError::ValidationError {
                field: "league.categories".into(),
                message: format!("duplicate category '{key}'"),
            });
        }
        categories.push(category);
    }

    for key in &file.scoring.punts {
        match Category::from_key(key) {
            Some(c) if categories.contains(&c) => {}
            _ => {
                return Err(ConfigError::ValidationError {
                    field: "scoring.punts".into(),
                    message: format!("'{key}' is not a configured category"),
                });
            }
        }
    }

    if file.data.players.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.players".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(categories)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
