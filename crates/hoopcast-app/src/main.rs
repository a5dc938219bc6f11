// Hoopcast entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file)
// 2. Load config
// 3. Load the player pool
// 4. Open the favourites store
// 5. Score the pool and project the default view (Total, descending)
// 6. Print the ranked rows, optionally export them to CSV
//
// Usage: hoopcast [EXPORT_CSV]

use std::path::{Path, PathBuf};

use hoopcast_core::config;
use hoopcast_core::export;
use hoopcast_core::favourites::{FavouritesStore, SqliteFavourites};
use hoopcast_core::player::{self, format_positions};
use hoopcast_core::valuation::category::Category;
use hoopcast_core::valuation::tiers::classify_category;
use hoopcast_core::valuation::{ScoreCache, ScoredPlayer};
use hoopcast_core::view::sort::{SortKey, SortSpec};
use hoopcast_core::view::{self, ViewSpec};

use anyhow::Context;
use tracing::info;

/// Version of the loaded pool; the harness loads exactly once.
const POOL_VERSION: u64 = 1;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Hoopcast starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} categories, strategy={}, mode={}",
        config.league.name,
        config.league.categories.len(),
        config.scoring.strategy.label(),
        config.scoring.season_mode.label()
    );

    // 3. Load the player pool
    let players = player::load_pool(Path::new(&config.data_paths.players))
        .context("failed to load player pool")?;

    // 4. Open the favourites store
    let db_path = config.favourites_db_path();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let favourites = SqliteFavourites::open(&db_path.to_string_lossy())
        .context("failed to open favourites store")?;
    info!("Favourites store opened at {}", db_path.display());

    // 5. Score and project
    let params = config.scoring_params();
    let mut cache = ScoreCache::new();
    let scored = cache.get_or_score(POOL_VERSION, &players, &params, &config.scoring.punts);

    let spec = ViewSpec {
        sort: SortSpec::descending(SortKey::Total),
        selection: favourites.all(),
        ..ViewSpec::default()
    };
    let projection = view::project(&scored.players, &spec, &favourites);

    // 6. Print and export
    print_table(&projection.rows, &config.league.categories);
    if !projection.summary.is_empty() {
        println!(
            "\nFavourites: {} players, total {:.2} (avg {:.2})",
            projection.summary.count, projection.summary.total.sum, projection.summary.total.average
        );
    }

    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        let rows = export::export_rows(&projection.rows, &config.league.categories);
        export::export_csv(&path, &config.league.categories, &rows)
            .with_context(|| format!("failed to export to {}", path.display()))?;
        println!("\nExported {} rows to {}", rows.len(), path.display());
    }

    info!("Hoopcast finished");
    Ok(())
}

/// Print ranked rows with per-category values and their highlight tier.
fn print_table(rows: &[&ScoredPlayer], categories: &[Category]) {
    let mut header = format!("{:>3}  {:<24} {:<6} {:<6}", "#", "Name", "Team", "Pos");
    for c in categories {
        header.push_str(&format!(" {:>9}", c.key()));
    }
    header.push_str(&format!(" {:>7}", "Total"));
    println!("{header}");

    for (i, p) in rows.iter().enumerate() {
        let mut line = format!(
            "{:>3}  {:<24} {:<6} {:<6}",
            i + 1,
            p.player.name(),
            p.player.team,
            format_positions(&p.player.positions)
        );
        for &c in categories {
            let value = p.snapshot().per_game(c);
            let cell = if c.is_percentage() {
                format!("{value:.3}")
            } else {
                format!("{value:.1}")
            };
            if p.snapshot().has_data() {
                line.push_str(&format!(" {:>6}[{}]", cell, classify_category(value, c)));
            } else {
                line.push_str(&format!(" {:>9}", "--"));
            }
        }
        line.push_str(&format!(" {:>7.2}", p.total()));
        println!("{line}");
    }
}

/// Initialize tracing to log to a file under `logs/`.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("hoopcast.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hoopcast=info,hoopcast_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
