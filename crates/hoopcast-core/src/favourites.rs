// Favourite-player stores handed to the view projector.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::player::PlayerId;

/// Externally owned set of favourite player ids. The projector only reads
/// it; toggling is the presentation layer's job.
pub trait FavouritesStore {
    /// Snapshot of every favourite id.
    fn all(&self) -> HashSet<PlayerId>;

    /// Flip membership. Returns `true` if the player is now a favourite.
    fn toggle(&mut self, id: PlayerId) -> Result<bool>;

    fn contains(&self, id: PlayerId) -> bool {
        self.all().contains(&id)
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFavourites {
    ids: HashSet<PlayerId>,
}

impl MemoryFavourites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<PlayerId> for MemoryFavourites {
    fn from_iter<I: IntoIterator<Item = PlayerId>>(iter: I) -> Self {
        MemoryFavourites {
            ids: iter.into_iter().collect(),
        }
    }
}

impl FavouritesStore for MemoryFavourites {
    fn all(&self) -> HashSet<PlayerId> {
        self.ids.clone()
    }

    fn toggle(&mut self, id: PlayerId) -> Result<bool> {
        if self.ids.remove(&id) {
            Ok(false)
        } else {
            self.ids.insert(id);
            Ok(true)
        }
    }

    fn contains(&self, id: PlayerId) -> bool {
        self.ids.contains(&id)
    }
}

// ---------------------------------------------------------------------------
// SQLite store
// ---------------------------------------------------------------------------

/// SQLite-backed favourites. The id set is read once on open and every
/// toggle is written through before the in-memory copy changes.
pub struct SqliteFavourites {
    conn: Mutex<Connection>,
    ids: HashSet<PlayerId>,
}

impl SqliteFavourites {
    /// Open (or create) the favourites database at `path`. Pass `":memory:"`
    /// for an ephemeral store.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open favourites database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS favourites (
                player_id INTEGER PRIMARY KEY
            );",
        )
        .context("failed to create favourites schema")?;

        let ids = Self::load_ids(&conn)?;
        info!("Loaded {} favourites from {}", ids.len(), path);

        Ok(Self {
            conn: Mutex::new(conn),
            ids,
        })
    }

    fn load_ids(conn: &Connection) -> Result<HashSet<PlayerId>> {
        let mut stmt = conn
            .prepare("SELECT player_id FROM favourites")
            .context("failed to prepare favourites query")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, PlayerId>(0))
            .context("failed to query favourites")?
            .collect::<std::result::Result<HashSet<_>, _>>()
            .context("failed to map favourite rows")?;
        Ok(ids)
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }
}

impl FavouritesStore for SqliteFavourites {
    fn all(&self) -> HashSet<PlayerId> {
        self.ids.clone()
    }

    fn toggle(&mut self, id: PlayerId) -> Result<bool> {
        let now_favourite = !self.ids.contains(&id);
        {
            let conn = self.conn();
            if now_favourite {
                conn.execute(
                    "INSERT OR IGNORE INTO favourites (player_id) VALUES (?1)",
                    params![id],
                )
                .context("failed to insert favourite")?;
            } else {
                conn.execute("DELETE FROM favourites WHERE player_id = ?1", params![id])
                    .context("failed to delete favourite")?;
            }
        }

        if now_favourite {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
        debug!(player_id = id, favourite = now_favourite, "toggled favourite");
        Ok(now_favourite)
    }

    fn contains(&self, id: PlayerId) -> bool {
        self.ids.contains(&id)
    }
}
