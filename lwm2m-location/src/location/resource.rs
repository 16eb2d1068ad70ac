//! The location resource instance held by the protocol layer.
//!
//! [`LocationResource`] wires the store, dispatcher, notifier and scheduler
//! together. Construction seeds the state and starts the refresh task;
//! stopping (explicitly or by dropping the resource) ends it.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::clock::{Clock, SystemClock};
use super::config::LocationResourceConfig;
use super::dispatcher::ReadDispatcher;
use super::error::{ReadError, ResourceError};
use super::http::ReqwestClient;
use super::notifier::ChangeNotifier;
use super::provider::{ResourceChangeBroadcaster, ResourceProvider};
use super::scheduler::{RefreshScheduler, RefreshTask};
use super::source::{HttpLocationSource, LocationSource};
use super::state::{ChangeEvent, ResourceId, ResourceState, ResourceValue};
use super::store::StateStore;

/// Observable location resource backed by a periodically refreshed cache.
pub struct LocationResource {
    /// Cached state shared with the refresh task.
    store: Arc<StateStore>,

    /// Serves reads from the store.
    dispatcher: ReadDispatcher,

    /// Change event channel; subscribers are created from it.
    events_tx: broadcast::Sender<ChangeEvent>,

    /// Background refresh task.
    scheduler: RefreshScheduler,
}

impl LocationResource {
    /// Start a resource that polls the configured HTTP endpoint.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &LocationResourceConfig) -> Result<Self, ResourceError> {
        let http = ReqwestClient::with_timeout(config.request_timeout)?;
        let source = HttpLocationSource::new(http, config.source_url.clone());

        tracing::info!(
            url = %config.source_url,
            interval_ms = config.refresh_interval.as_millis() as u64,
            "Starting location resource"
        );

        Ok(Self::with_source(source, Arc::new(SystemClock), config))
    }

    /// Start a resource with a custom source and clock.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_source<S: LocationSource + 'static>(
        source: S,
        clock: Arc<dyn Clock>,
        config: &LocationResourceConfig,
    ) -> Self {
        let initial = ResourceState::initial(
            config.initial_latitude,
            config.initial_longitude,
            clock.now(),
        );
        let store = Arc::new(StateStore::new(initial));
        let (events_tx, _) = broadcast::channel(config.event_capacity.max(1));

        let notifier = ChangeNotifier::new(Arc::clone(&store), events_tx.clone());
        let task = RefreshTask::new(source, notifier, clock);
        let scheduler = RefreshScheduler::start(task, config.refresh_interval);

        Self {
            dispatcher: ReadDispatcher::new(Arc::clone(&store)),
            store,
            events_tx,
            scheduler,
        }
    }

    /// Get a consistent copy of the current state.
    pub fn state(&self) -> ResourceState {
        self.store.read()
    }

    /// Read a supported resource without going through the numeric id.
    pub fn read(&self, resource: ResourceId) -> ResourceValue {
        self.dispatcher.read(resource)
    }

    /// Stop refreshing. Reads keep serving the last committed state.
    pub fn stop(&self) {
        self.scheduler.stop();
    }

    /// Stop refreshing and wait for the background task to end.
    pub async fn shutdown(&mut self) {
        self.scheduler.shutdown().await;
    }

    /// Check whether the background refresh is still running.
    pub fn is_refreshing(&self) -> bool {
        self.scheduler.is_running()
    }
}

impl ResourceProvider for LocationResource {
    fn read_resource(&self, id: u16) -> Result<ResourceValue, ReadError> {
        self.dispatcher.read_resource(id)
    }

    fn available_resource_ids(&self) -> Vec<u16> {
        self.dispatcher
            .available_resource_ids()
            .iter()
            .map(|r| r.id())
            .collect()
    }
}

impl ResourceChangeBroadcaster for LocationResource {
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::error::FetchError;
    use crate::location::source::LocationField;
    use std::time::Duration;

    /// Source that always fails, as if the endpoint were down.
    struct UnreachableSource;

    impl LocationSource for UnreachableSource {
        async fn fetch(&self, _field: LocationField) -> Result<f64, FetchError> {
            Err(FetchError::Http("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_initial_state_served_before_refresh() {
        let config = LocationResourceConfig {
            initial_latitude: 43.6,
            initial_longitude: 1.4,
            ..Default::default()
        };
        let mut resource =
            LocationResource::with_source(UnreachableSource, Arc::new(SystemClock), &config);

        assert_eq!(resource.read_resource(0), Ok(ResourceValue::Float(43.6)));
        assert_eq!(resource.read_resource(1), Ok(ResourceValue::Float(1.4)));
        assert_eq!(resource.state().scale_factor, 1.0);
        assert!(resource.is_refreshing());

        resource.shutdown().await;
        assert!(!resource.is_refreshing());
    }

    #[tokio::test]
    async fn test_available_resource_ids() {
        let resource = LocationResource::with_source(
            UnreachableSource,
            Arc::new(SystemClock),
            &LocationResourceConfig::default(),
        );

        assert_eq!(resource.available_resource_ids(), vec![0, 1, 5]);
    }

    #[tokio::test]
    async fn test_unsupported_read() {
        let resource = LocationResource::with_source(
            UnreachableSource,
            Arc::new(SystemClock),
            &LocationResourceConfig::default(),
        );
        let before = resource.state();

        assert_eq!(resource.read_resource(99), Err(ReadError::Unsupported(99)));
        assert_eq!(resource.state(), before);
    }

    #[tokio::test]
    async fn test_start_with_http_source() {
        let config = LocationResourceConfig {
            source_url: "http://127.0.0.1:9/get-location".to_string(),
            refresh_interval: Duration::from_secs(60),
            ..Default::default()
        };

        let resource = LocationResource::start(&config).expect("resource should start");
        assert!(resource.is_refreshing());
        resource.stop();
    }
}
