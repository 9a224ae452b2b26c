//! Storage Layer
//!
//! Provides SQLite persistence with repository pattern.

mod repository;
mod settings;

pub use repository::{NewReading, Repository, SensorReading, RETENTION_LIMIT};
pub use settings::StorageSettings;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection, statement or transaction failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
