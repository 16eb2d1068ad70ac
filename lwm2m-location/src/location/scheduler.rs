//! Refresh scheduler - periodic background refresh of the location state.
//!
//! The [`RefreshScheduler`] owns one tokio task that, on a fixed cadence,
//! fetches latitude and longitude from a [`LocationSource`] and hands the
//! assembled reading to the [`ChangeNotifier`].
//!
//! # Design
//!
//! Follows the daemon pattern used for other pollers in this crate:
//! - `start()` spawns an async task driven by `tokio::time::interval`
//! - A `CancellationToken` stops the loop
//! - Failures are logged with a consecutive-failure count and never end the task
//!
//! # Cycle
//!
//! 1. Fetch latitude
//! 2. Fetch longitude
//! 3. Build one [`PositionSnapshot`]: fetched fields take the new value,
//!    failed fields keep the stored one; stamp it with the clock
//! 4. Apply it through the notifier (one commit, at most one event)
//!
//! Cycles run sequentially inside the task and late ticks are skipped, so
//! two cycles never overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::clock::Clock;
use super::error::FetchError;
use super::notifier::ChangeNotifier;
use super::source::{LocationField, LocationSource};
use super::state::{ChangeEvent, PositionSnapshot};

/// Default refresh interval (2 seconds).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// Smallest interval the scheduler accepts.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Largest interval the scheduler accepts (one day).
pub const MAX_REFRESH_INTERVAL: Duration = Duration::from_secs(86_400);

/// Everything a refresh cycle needs, moved into the background task.
pub struct RefreshTask<S: LocationSource> {
    /// Where coordinates come from.
    source: S,

    /// Commits changes and signals observers.
    notifier: ChangeNotifier,

    /// Stamps each reading.
    clock: Arc<dyn Clock>,

    /// Fetch failures since the last successful fetch.
    consecutive_failures: u32,
}

impl<S: LocationSource + 'static> RefreshTask<S> {
    /// Create a refresh task.
    pub fn new(source: S, notifier: ChangeNotifier, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            notifier,
            clock,
            consecutive_failures: 0,
        }
    }

    /// Run one refresh cycle.
    ///
    /// Returns `None` if cancellation was observed before a fetch started,
    /// otherwise the change event produced by the cycle (if any).
    async fn run_cycle(&mut self, cancellation: &CancellationToken) -> Option<Option<ChangeEvent>> {
        let latitude = self.fetch_field(LocationField::Latitude, cancellation).await?;
        let longitude = self.fetch_field(LocationField::Longitude, cancellation).await?;

        if latitude.is_none() && longitude.is_none() {
            return Some(None);
        }

        let previous = self.notifier.current();
        let candidate = PositionSnapshot::new(
            latitude.unwrap_or(previous.latitude),
            longitude.unwrap_or(previous.longitude),
            self.clock.now(),
        );

        Some(self.notifier.apply(&candidate))
    }

    /// Fetch one field unless cancelled first.
    ///
    /// Outer `None` means cancelled; inner `None` means the fetch failed.
    async fn fetch_field(
        &mut self,
        field: LocationField,
        cancellation: &CancellationToken,
    ) -> Option<Option<f64>> {
        if cancellation.is_cancelled() {
            return None;
        }

        let result = tokio::select! {
            biased;
            _ = cancellation.cancelled() => return None,
            result = self.source.fetch(field) => result,
        };

        Some(self.record(field, result))
    }

    /// Track failures and turn a fetch result into an optional value.
    fn record(&mut self, field: LocationField, result: Result<f64, FetchError>) -> Option<f64> {
        match result {
            Ok(value) => {
                self.consecutive_failures = 0;
                Some(value)
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                tracing::warn!(
                    field = %field,
                    error = %e,
                    consecutive_failures = self.consecutive_failures,
                    "Location fetch failed, keeping cached value"
                );
                None
            }
        }
    }

    /// Run the refresh loop until cancelled.
    async fn run(mut self, interval: Duration, cancellation: CancellationToken) {
        tracing::info!(
            interval_ms = interval.as_millis() as u64,
            "Location refresh started"
        );

        // First tick after one full interval, not immediately.
        let start = tokio::time::Instant::now() + interval;
        let mut ticker = tokio::time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => break,
                _ = ticker.tick() => {
                    if self.run_cycle(&cancellation).await.is_none() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Location refresh stopped");
    }
}

/// Handle to the background refresh task.
///
/// Dropping the handle stops the task.
pub struct RefreshScheduler {
    cancellation: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Start refreshing every `interval`, first tick after one interval.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S: LocationSource + 'static>(task: RefreshTask<S>, interval: Duration) -> Self {
        let interval = clamp_interval(interval);
        let cancellation = CancellationToken::new();
        let handle = tokio::spawn(task.run(interval, cancellation.clone()));

        Self {
            cancellation,
            handle: Some(handle),
        }
    }

    /// Stop the task permanently.
    ///
    /// Cancellation is checked before every fetch, so once the task has
    /// observed it no further fetch begins. A fetch whose first poll is
    /// already under way on another worker when `stop()` is called may
    /// still start; it is abandoned at its next await point.
    pub fn stop(&self) {
        self.cancellation.cancel();
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Location refresh task ended abnormally");
            }
        }
    }

    /// Check whether the background task is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

/// Keep the interval within `MIN_REFRESH_INTERVAL..=MAX_REFRESH_INTERVAL`.
fn clamp_interval(interval: Duration) -> Duration {
    if interval < MIN_REFRESH_INTERVAL {
        tracing::warn!(
            requested_ms = interval.as_millis() as u64,
            "Refresh interval too small, using minimum"
        );
        MIN_REFRESH_INTERVAL
    } else if interval > MAX_REFRESH_INTERVAL {
        tracing::warn!(
            requested_secs = interval.as_secs(),
            max_secs = MAX_REFRESH_INTERVAL.as_secs(),
            "Refresh interval too large, using maximum"
        );
        MAX_REFRESH_INTERVAL
    } else {
        interval
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
