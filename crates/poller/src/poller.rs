//! Poll Loop

use crate::{ApiClient, SensorFeed};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Default delay between polls
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for the poll loop
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Base URL of the telemetry API
    pub base_url: String,
    /// Delay between polls, measured after the previous fetch resolves
    pub interval: Duration,
}

impl PollerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Drives the fetch protocol against the sensors endpoint
///
/// One cooperative task with a single timer: the next delay starts only after
/// the previous fetch resolves, so ticks never overlap. A fetch failure is
/// recorded on the feed and does not stop the loop.
#[derive(Clone)]
pub struct Poller {
    client: ApiClient,
    feed: Arc<RwLock<SensorFeed>>,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl Poller {
    pub fn new(config: PollerConfig) -> Self {
        Self {
            client: ApiClient::new(config.base_url),
            feed: Arc::new(RwLock::new(SensorFeed::new())),
            interval: config.interval,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared handle to the feed, read by the presentation layer
    pub fn feed(&self) -> Arc<RwLock<SensorFeed>> {
        self.feed.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Stop the loop after the current tick
    pub fn shutdown(&self) {
        info!("Stopping poll loop");
        self.running.store(false, Ordering::Relaxed);
    }

    /// Run until [`shutdown`](Self::shutdown)
    ///
    /// While the feed is empty the tick fetches the full window; afterwards
    /// it fetches only rows newer than the last one held.
    pub async fn run(&self) {
        info!("Starting poll loop, interval {:?}", self.interval);
        self.running.store(true, Ordering::Relaxed);

        while self.running.load(Ordering::Relaxed) {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }

        info!("Poll loop stopped");
    }

    async fn tick(&self) {
        let cursor = self.feed.read().await.last_timestamp();

        match cursor {
            None => match self.client.fetch_latest().await {
                Ok(batch) => {
                    debug!("Initial fetch returned {} reading(s)", batch.len());
                    self.feed.write().await.replace_initial(batch);
                }
                Err(e) => {
                    warn!("Initial fetch failed: {}", e);
                    self.feed.write().await.record_error(e.to_string());
                }
            },
            Some(timestamp) => match self.client.fetch_since(timestamp).await {
                Ok(batch) => {
                    if !batch.is_empty() {
                        debug!("Incremental fetch returned {} reading(s)", batch.len());
                    }
                    self.feed.write().await.append_newer(batch);
                }
                Err(e) => {
                    warn!("Incremental fetch failed: {}", e);
                    self.feed.write().await.record_error(e.to_string());
                }
            },
        }
    }
}
