//! SQLite-backed [`SampleStore`] for coinpulse.
//!
//! One table, `price_samples`, keyed on `(asset_id, ts)` with unix-second
//! timestamps. Reads are plain indexed range scans; ingestion upserts
//! inside a transaction.

use std::env;
use std::fs;
use std::path::PathBuf;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use coinpulse_core::store::{SampleStore, StoreError, StoreFuture};
use coinpulse_core::{AssetId, Sample, Series, TimeWindow, UtcDateTime};

/// Store location and pool sizing.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: resolve_db_path(),
            max_connections: 4,
        }
    }
}

impl StoreConfig {
    pub fn at(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.db_path.display())
    }
}

/// Database location: `COINPULSE_DB` names the database file itself and
/// wins outright; otherwise `coinpulse.db` inside the resolved home.
fn resolve_db_path() -> PathBuf {
    if let Some(path) = env::var_os("COINPULSE_DB") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    resolve_home().join("coinpulse.db")
}

/// Home directory: `$COINPULSE_HOME`, then `~/.coinpulse`.
fn resolve_home() -> PathBuf {
    if let Some(path) = env::var_os("COINPULSE_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".coinpulse");
    }

    PathBuf::from(".coinpulse")
}

#[derive(Debug, FromRow)]
struct SampleRow {
    asset_id: String,
    ts: i64,
    price: f64,
}

impl SampleRow {
    fn into_sample(self) -> Result<Sample, StoreError> {
        let asset_id = AssetId::parse(&self.asset_id)
            .map_err(|error| StoreError::InvalidData(error.to_string()))?;
        let ts = UtcDateTime::from_unix_timestamp(self.ts)
            .map_err(|error| StoreError::InvalidData(error.to_string()))?;
        Sample::new(asset_id, ts, self.price)
            .map_err(|error| StoreError::InvalidData(error.to_string()))
    }
}

/// SQLite sample store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at the configured path.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| StoreError::Connection(error.to_string()))?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect(&config.url())
            .await
            .map_err(|error| StoreError::Connection(error.to_string()))?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Private in-process database; one connection, since every SQLite
    /// `:memory:` connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|error| StoreError::Connection(error.to_string()))?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS price_samples (
                asset_id TEXT NOT NULL,
                ts INTEGER NOT NULL,
                price REAL NOT NULL,
                PRIMARY KEY (asset_id, ts)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|error| StoreError::Query(error.to_string()))?;

        Ok(())
    }

    async fn fetch_range_inner(
        &self,
        asset_id: &AssetId,
        window: TimeWindow,
    ) -> Result<Series, StoreError> {
        let start = window
            .start
            .map_or(i64::MIN, |bound| bound.unix_timestamp());
        let end = window.end.map_or(i64::MAX, |bound| bound.unix_timestamp());

        let rows = sqlx::query_as::<_, SampleRow>(
            "SELECT asset_id, ts, price FROM price_samples \
             WHERE asset_id = ? AND ts >= ? AND ts < ? ORDER BY ts ASC",
        )
        .bind(asset_id.as_str())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| StoreError::Query(error.to_string()))?;

        debug!(asset = %asset_id, rows = rows.len(), "range fetch");

        let samples = rows
            .into_iter()
            .map(SampleRow::into_sample)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Series::new(asset_id.clone(), samples))
    }

    async fn latest_at_or_before_inner(
        &self,
        asset_id: &AssetId,
        at: UtcDateTime,
    ) -> Result<Option<Sample>, StoreError> {
        let row = sqlx::query_as::<_, SampleRow>(
            "SELECT asset_id, ts, price FROM price_samples \
             WHERE asset_id = ? AND ts <= ? ORDER BY ts DESC LIMIT 1",
        )
        .bind(asset_id.as_str())
        .bind(at.unix_timestamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| StoreError::Query(error.to_string()))?;

        row.map(SampleRow::into_sample).transpose()
    }

    async fn list_assets_inner(&self) -> Result<Vec<AssetId>, StoreError> {
        let names: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT asset_id FROM price_samples ORDER BY asset_id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|error| StoreError::Query(error.to_string()))?;

        names
            .into_iter()
            .map(|(name,)| {
                AssetId::parse(&name).map_err(|error| StoreError::InvalidData(error.to_string()))
            })
            .collect()
    }

    async fn insert_samples_inner(&self, samples: &[Sample]) -> Result<usize, StoreError> {
        if samples.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|error| StoreError::Query(error.to_string()))?;

        let mut written = 0usize;
        for sample in samples {
            let result = sqlx::query(
                "INSERT OR REPLACE INTO price_samples (asset_id, ts, price) VALUES (?, ?, ?)",
            )
            .bind(sample.asset_id.as_str())
            .bind(sample.ts.unix_timestamp())
            .bind(sample.price)
            .execute(&mut *tx)
            .await
            .map_err(|error| StoreError::Query(error.to_string()))?;
            written += result.rows_affected() as usize;
        }

        tx.commit()
            .await
            .map_err(|error| StoreError::Query(error.to_string()))?;

        debug!(rows = written, "samples upserted");
        Ok(written)
    }
}

impl SampleStore for SqliteStore {
    fn fetch_range<'a>(
        &'a self,
        asset_id: &'a AssetId,
        window: TimeWindow,
    ) -> StoreFuture<'a, Series> {
        Box::pin(self.fetch_range_inner(asset_id, window))
    }

    fn latest_at_or_before<'a>(
        &'a self,
        asset_id: &'a AssetId,
        at: UtcDateTime,
    ) -> StoreFuture<'a, Option<Sample>> {
        Box::pin(self.latest_at_or_before_inner(asset_id, at))
    }

    fn list_assets<'a>(&'a self) -> StoreFuture<'a, Vec<AssetId>> {
        Box::pin(self.list_assets_inner())
    }

    fn insert_samples<'a>(&'a self, samples: &'a [Sample]) -> StoreFuture<'a, usize> {
        Box::pin(self.insert_samples_inner(samples))
    }
}
