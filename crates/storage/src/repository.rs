//! Repository Implementation

use crate::{StorageError, StorageSettings};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Maximum rows retained; pruning after each insert deletes everything older.
pub const RETENTION_LIMIT: i64 = 10;

const CREATE_READINGS: &str = "
    CREATE TABLE IF NOT EXISTS readings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp_ms INTEGER NOT NULL,
        lumen REAL NOT NULL,
        temperature REAL NOT NULL,
        humidity REAL NOT NULL
    )";

// Descending index speeds up the select-latest and prune queries.
const CREATE_TIMESTAMP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS readings_timestamp ON readings (timestamp_ms DESC)";

/// A stored sensor reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SensorReading {
    pub id: i64,
    /// Epoch milliseconds, assigned from the server clock at insert time
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    pub lumen: f64,
    pub temperature: f64,
    pub humidity: f64,
}

/// A validated reading awaiting insertion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewReading {
    pub lumen: f64,
    pub temperature: f64,
    pub humidity: f64,
}

/// Repository for sensor reading persistence
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open (or create) the database and prepare the schema
    pub async fn connect(settings: &StorageSettings) -> Result<Self, StorageError> {
        let options = settings.url.parse::<SqliteConnectOptions>()?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await?;
        info!("Connected to database at {}", settings.url);
        let repository = Self { pool };
        repository.create_schema().await?;
        Ok(repository)
    }

    /// Create an in-memory repository for tests
    ///
    /// A single-connection pool, since every SQLite `:memory:` connection is
    /// its own database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let repository = Self { pool };
        repository.create_schema().await?;
        Ok(repository)
    }

    async fn create_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_READINGS).execute(&self.pool).await?;
        sqlx::query(CREATE_TIMESTAMP_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a reading, then prune everything beyond the retention window
    ///
    /// Both statements run in one transaction, so a failed prune rolls the
    /// insert back. Returns the assigned row id. Not idempotent: repeated
    /// identical calls each insert a new row.
    pub async fn insert(&self, reading: NewReading) -> Result<i64, StorageError> {
        self.insert_at(Utc::now().timestamp_millis(), reading).await
    }

    async fn insert_at(&self, timestamp_ms: i64, reading: NewReading) -> Result<i64, StorageError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO readings (timestamp_ms, lumen, temperature, humidity) VALUES (?, ?, ?, ?)",
        )
        .bind(timestamp_ms)
        .bind(reading.lumen)
        .bind(reading.temperature)
        .bind(reading.humidity)
        .execute(&mut *tx)
        .await?;
        let id = inserted.last_insert_rowid();

        let pruned = sqlx::query(
            "DELETE FROM readings WHERE id NOT IN (
                SELECT id FROM readings ORDER BY timestamp_ms DESC, id DESC LIMIT ?
            )",
        )
        .bind(RETENTION_LIMIT)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if pruned.rows_affected() > 0 {
            debug!("Pruned {} reading(s) beyond retention window", pruned.rows_affected());
        }
        Ok(id)
    }

    /// Get the most recent readings, newest first, capped at the retention window
    pub async fn latest(&self) -> Result<Vec<SensorReading>, StorageError> {
        let rows = sqlx::query_as::<_, SensorReading>(
            "SELECT id, timestamp_ms, lumen, temperature, humidity FROM readings
             ORDER BY timestamp_ms DESC, id DESC LIMIT ?",
        )
        .bind(RETENTION_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get all readings strictly newer than the given timestamp, oldest first
    ///
    /// No limit is applied: the caller receives everything accumulated since.
    pub async fn since(&self, timestamp_ms: i64) -> Result<Vec<SensorReading>, StorageError> {
        let rows = sqlx::query_as::<_, SensorReading>(
            "SELECT id, timestamp_ms, lumen, temperature, humidity FROM readings
             WHERE timestamp_ms > ? ORDER BY timestamp_ms ASC, id ASC",
        )
        .bind(timestamp_ms)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Total number of stored readings
    pub async fn count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM readings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
