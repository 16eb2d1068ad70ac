//! Configuration for the location resource.

use std::time::Duration;

use super::scheduler::DEFAULT_REFRESH_INTERVAL;
use super::source::DEFAULT_SOURCE_URL;

/// Default HTTP timeout for one fetch (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default capacity of the change event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// Configuration for a [`LocationResource`](super::LocationResource).
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResourceConfig {
    /// Endpoint returning `{"latitude": .., "longitude": ..}`.
    pub source_url: String,

    /// Timeout for one HTTP request.
    pub request_timeout: Duration,

    /// How often to refresh. Also the delay before the first refresh.
    pub refresh_interval: Duration,

    /// Buffered change events per subscriber before it starts lagging.
    pub event_capacity: usize,

    /// Latitude served before the first successful refresh.
    pub initial_latitude: f64,

    /// Longitude served before the first successful refresh.
    pub initial_longitude: f64,
}

impl LocationResourceConfig {
    /// Create a config from file settings.
    pub fn from_config(source_url: String, timeout_secs: u64, interval_secs: u64) -> Self {
        Self {
            source_url,
            request_timeout: Duration::from_secs(timeout_secs),
            refresh_interval: Duration::from_secs(interval_secs),
            ..Default::default()
        }
    }
}

impl Default for LocationResourceConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            initial_latitude: 0.0,
            initial_longitude: 0.0,
        }
    }
}
