//! Store handle: SQLite connection pool plus schema bootstrap
//!
//! Uses sqlx SqlitePool with explicit connection limits. Every connection
//! enforces foreign keys so `link_tags` can never reference a missing row.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use super::migrations;

/// Default maximum connections for the pool.
/// Kept low: SQLite serialises writers anyway.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Relational store shared by all repositories.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) the database file at `path` and run migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the file
    /// cannot be opened, or the schema cannot be applied.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::open("botdata.db", DEFAULT_MAX_CONNECTIONS).await?;
    /// ```
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> Result<Self, sqlx::Error> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        tracing::info!(path = %path.display(), max_connections, "Opened store");
        Self::from_pool(pool).await
    }

    /// Open a private in-memory database (for testing).
    ///
    /// Limited to one connection that is never recycled, since every new
    /// in-memory connection would see an empty database.
    pub async fn open_in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, applying migrations first.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        migrations::run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections, waiting for in-flight queries.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
