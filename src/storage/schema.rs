use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::collections::BTreeSet;
use std::path::Path;

use super::types::DatabaseError;

/// Tables the exporter reads from
pub const REQUIRED_TABLES: [&str; 4] = ["articles", "digests", "threads", "article_threads"];

// ============================================================================
// Database
// ============================================================================

/// Read-only handle on a Sieve database.
///
/// Backed by a single pooled connection, so every query in a run is
/// serialised over the same SQLite handle.
pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    /// Open an existing database read-only
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if `path` does not exist and
    /// `DatabaseError::Open` if SQLite cannot open it.
    pub async fn open(path: &Path) -> Result<Self, DatabaseError> {
        if !path.exists() {
            return Err(DatabaseError::NotFound(path.to_path_buf()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(DatabaseError::Open)?;

        tracing::debug!(path = %path.display(), "Opened database read-only");
        Ok(Self { pool })
    }

    /// Check that every table in [`REQUIRED_TABLES`] exists
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::MissingTables` listing the absent tables in name order.
    pub async fn verify_schema(&self) -> Result<(), DatabaseError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&self.pool)
                .await?;
        let present: BTreeSet<String> = rows.into_iter().map(|(name,)| name).collect();

        let missing: Vec<String> = REQUIRED_TABLES
            .iter()
            .filter(|table| !present.contains(**table))
            .map(|table| table.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DatabaseError::MissingTables(missing))
        }
    }

    /// Close the underlying connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}
