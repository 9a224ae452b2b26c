//! Storage Settings

use serde::Deserialize;

/// Database connection settings
///
/// Passed into [`Repository::connect`](crate::Repository::connect) explicitly
/// rather than read from ambient environment state, so tests can inject an
/// in-memory backend.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// SQLite connection URL (default: `sqlite:sensors.db`)
    pub url: String,
    /// Maximum pooled connections (default: 5)
    pub max_connections: u32,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            url: "sqlite:sensors.db".to_string(),
            max_connections: 5,
        }
    }
}
