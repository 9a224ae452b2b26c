//! Sensor Routes

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{ApiError, AppState};
use storage::{NewReading, SensorReading};

/// Query parameters for the readings endpoint
#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    /// Return only rows strictly newer than this timestamp (epoch ms)
    pub timestamp: Option<i64>,
}

/// Ingest payload, using the device wire field names
#[derive(Debug, Deserialize)]
pub struct RecordPayload {
    pub lumen: Option<f64>,
    /// Temperature
    pub suhu: Option<f64>,
    /// Humidity
    pub kelembapan: Option<f64>,
}

impl RecordPayload {
    /// All three measurements must be present; zero is a valid value.
    fn into_reading(self) -> Option<NewReading> {
        Some(NewReading {
            lumen: self.lumen?,
            temperature: self.suhu?,
            humidity: self.kelembapan?,
        })
    }
}

/// Get sensor readings
///
/// Without `timestamp`: the most recent readings, newest first, capped at the
/// retention window. With `timestamp`: everything strictly newer, oldest
/// first, unlimited. The two shapes are selected solely by parameter presence.
pub async fn get_readings(
    State(state): State<AppState>,
    Query(params): Query<ReadingsQuery>,
) -> Result<Json<Vec<SensorReading>>, ApiError> {
    let rows = match params.timestamp {
        Some(since) => state.repository.since(since).await,
        None => state.repository.latest().await,
    }
    .map_err(ApiError::Fetch)?;

    Ok(Json(rows))
}

/// Record a sensor reading
pub async fn record_reading(
    State(state): State<AppState>,
    Json(payload): Json<RecordPayload>,
) -> Result<Json<Value>, ApiError> {
    let reading = payload.into_reading().ok_or(ApiError::MissingFields)?;
    state.repository.insert(reading).await.map_err(ApiError::Save)?;

    Ok(Json(json!({ "message": "Data saved successfully" })))
}
