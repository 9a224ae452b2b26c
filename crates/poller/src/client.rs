//! Telemetry API Client

use crate::SensorReading;
use thiserror::Error;

/// Client-side fetch errors, surfaced to the presentation layer as a single
/// error state. Never retried explicitly; the poll loop just keeps going.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection or protocol failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),
}

/// HTTP client for the sensors endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the most recent readings, newest first
    pub async fn fetch_latest(&self) -> Result<Vec<SensorReading>, TransportError> {
        self.fetch(&[]).await
    }

    /// Fetch all readings strictly newer than the given timestamp, oldest first
    pub async fn fetch_since(&self, timestamp_ms: i64) -> Result<Vec<SensorReading>, TransportError> {
        self.fetch(&[("timestamp", timestamp_ms)]).await
    }

    async fn fetch(&self, query: &[(&str, i64)]) -> Result<Vec<SensorReading>, TransportError> {
        let response = self.http.get(self.endpoint()).query(query).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    fn endpoint(&self) -> String {
        format!("{}/sensors", self.base_url)
    }
}
