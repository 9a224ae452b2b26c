//! In-Memory Reading Feed

use crate::WindowStats;
use serde::Deserialize;

/// A sensor reading as served by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorReading {
    pub id: i64,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub lumen: f64,
    pub temperature: f64,
    pub humidity: f64,
}

/// One of the three measured quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Lumen,
    Temperature,
    Humidity,
}

impl Metric {
    /// Extract this metric's value from a reading
    pub fn value(&self, reading: &SensorReading) -> f64 {
        match self {
            Metric::Lumen => reading.lumen,
            Metric::Temperature => reading.temperature,
            Metric::Humidity => reading.humidity,
        }
    }
}

/// Direction of change between the two most recent readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// The window of readings held by the client
///
/// Canonical order is ascending by timestamp: the initial batch arrives
/// newest first and is reversed before storing, incremental batches arrive
/// oldest first and append as-is. Also carries the single fetch error state
/// shown by the presentation layer.
#[derive(Debug, Default)]
pub struct SensorFeed {
    readings: Vec<SensorReading>,
    last_error: Option<String>,
}

impl SensorFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the window with the initial batch (served newest first)
    pub fn replace_initial(&mut self, mut batch: Vec<SensorReading>) {
        batch.reverse();
        self.readings = batch;
        self.last_error = None;
    }

    /// Append an incremental batch (served oldest first)
    pub fn append_newer(&mut self, batch: Vec<SensorReading>) {
        self.readings.extend(batch);
        self.last_error = None;
    }

    /// Record a fetch failure; cleared by the next successful fetch
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The most recent reading held
    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.last()
    }

    /// Timestamp of the most recent reading, the cursor for incremental polls
    pub fn last_timestamp(&self) -> Option<i64> {
        self.readings.last().map(|r| r.timestamp)
    }

    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Direction of change for a metric between the two latest readings
    pub fn trend(&self, metric: Metric) -> Trend {
        let n = self.readings.len();
        if n < 2 {
            return Trend::Stable;
        }

        let previous = metric.value(&self.readings[n - 2]);
        let current = metric.value(&self.readings[n - 1]);
        if current > previous {
            Trend::Up
        } else if current < previous {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    /// Aggregate statistics for a metric over the held window
    pub fn stats(&self, metric: Metric) -> Option<WindowStats> {
        let values: Vec<f64> = self.readings.iter().map(|r| metric.value(r)).collect();
        WindowStats::compute(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(id: i64, timestamp: i64, temperature: f64) -> SensorReading {
        SensorReading {
            id,
            timestamp,
            lumen: 100.0,
            temperature,
            humidity: 50.0,
        }
    }

    #[test]
    fn test_initial_batch_is_stored_ascending() {
        let mut feed = SensorFeed::new();
        feed.replace_initial(vec![
            reading(3, 3_000, 24.0),
            reading(2, 2_000, 23.0),
            reading(1, 1_000, 22.0),
        ]);

        let timestamps: Vec<i64> = feed.readings().iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![1_000, 2_000, 3_000]);
        assert_eq!(feed.latest().unwrap().id, 3);
        assert_eq!(feed.last_timestamp(), Some(3_000));
    }

    #[test]
    fn test_incremental_batches_append_in_order() {
        let mut feed = SensorFeed::new();
        feed.replace_initial(vec![reading(2, 2_000, 23.0), reading(1, 1_000, 22.0)]);
        feed.append_newer(vec![reading(3, 3_000, 24.0), reading(4, 4_000, 25.0)]);

        let timestamps: Vec<i64> = feed.readings().iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![1_000, 2_000, 3_000, 4_000]);
        assert_eq!(feed.last_timestamp(), Some(4_000));
    }

    #[test]
    fn test_trend_follows_last_two_readings() {
        let mut feed = SensorFeed::new();
        assert_eq!(feed.trend(Metric::Temperature), Trend::Stable);

        feed.append_newer(vec![reading(1, 1_000, 22.0)]);
        assert_eq!(feed.trend(Metric::Temperature), Trend::Stable);

        feed.append_newer(vec![reading(2, 2_000, 24.0)]);
        assert_eq!(feed.trend(Metric::Temperature), Trend::Up);

        feed.append_newer(vec![reading(3, 3_000, 21.0)]);
        assert_eq!(feed.trend(Metric::Temperature), Trend::Down);

        feed.append_newer(vec![reading(4, 4_000, 21.0)]);
        assert_eq!(feed.trend(Metric::Temperature), Trend::Stable);
    }

    #[test]
    fn test_stats_over_window() {
        let mut feed = SensorFeed::new();
        assert!(feed.stats(Metric::Temperature).is_none());

        feed.append_newer(vec![
            reading(1, 1_000, 22.0),
            reading(2, 2_000, 24.0),
            reading(3, 3_000, 26.0),
        ]);

        let stats = feed.stats(Metric::Temperature).unwrap();
        assert!((stats.mean - 24.0).abs() < 1e-9);
        assert_eq!(stats.min, 22.0);
        assert_eq!(stats.max, 26.0);
    }

    #[test]
    fn test_successful_fetch_clears_error_state() {
        let mut feed = SensorFeed::new();
        feed.record_error("connection refused");
        assert_eq!(feed.last_error(), Some("connection refused"));

        feed.replace_initial(vec![reading(1, 1_000, 22.0)]);
        assert!(feed.last_error().is_none());
    }
}
