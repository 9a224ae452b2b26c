//! Dashboard Polling Client
//!
//! Fetches the initial reading window from the telemetry API, then
//! incrementally appends rows newer than the last one held.

mod client;
mod feed;
mod poller;
mod stats;

pub use client::{ApiClient, TransportError};
pub use feed::{Metric, SensorFeed, SensorReading, Trend};
pub use poller::{Poller, PollerConfig, DEFAULT_INTERVAL};
pub use stats::WindowStats;
