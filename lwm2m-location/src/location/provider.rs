//! Provider traits and shared wrapper for the location resource.
//!
//! This module defines the interface the protocol layer uses:
//!
//! - [`ResourceProvider`] - Read API (pull)
//! - [`ResourceChangeBroadcaster`] - Change notification API (push)
//! - [`SharedLocationResource`] - Thread-safe wrapper combining both

use std::sync::Arc;

use tokio::sync::broadcast;

use super::error::ReadError;
use super::resource::LocationResource;
use super::state::{ChangeEvent, ResourceState, ResourceValue};

/// Trait for reading resources (pull API).
///
/// Reads are answered synchronously from cached state.
pub trait ResourceProvider: Send + Sync {
    /// Read one resource by numeric identifier.
    fn read_resource(&self, id: u16) -> Result<ResourceValue, ReadError>;

    /// Identifiers of the resources this object serves.
    fn available_resource_ids(&self) -> Vec<u16>;
}

/// Trait for subscribing to resource changes (push API).
///
/// One [`ChangeEvent`] is published per committed change.
pub trait ResourceChangeBroadcaster: Send + Sync {
    /// Subscribe to change events.
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}

/// Shared location resource - cloneable handle for the protocol layer.
///
/// # Usage
///
/// ```ignore
/// let resource = LocationResource::start(&LocationResourceConfig::default())?;
/// let shared = SharedLocationResource::new(resource);
///
/// // Serve a read
/// let latitude = shared.read_resource(0)?;
///
/// // Forward changes to observers
/// let mut rx = shared.subscribe();
/// while let Ok(event) = rx.recv().await {
///     // notify observers of event.resource_ids()
/// }
/// ```
#[derive(Clone)]
pub struct SharedLocationResource {
    inner: Arc<LocationResource>,
}

impl SharedLocationResource {
    /// Wrap a resource for sharing.
    pub fn new(resource: LocationResource) -> Self {
        Self {
            inner: Arc::new(resource),
        }
    }

    /// Get a consistent copy of the current state.
    pub fn state(&self) -> ResourceState {
        self.inner.state()
    }

    /// Stop refreshing.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Check whether the background refresh is still running.
    pub fn is_refreshing(&self) -> bool {
        self.inner.is_refreshing()
    }
}

impl ResourceProvider for SharedLocationResource {
    fn read_resource(&self, id: u16) -> Result<ResourceValue, ReadError> {
        self.inner.read_resource(id)
    }

    fn available_resource_ids(&self) -> Vec<u16> {
        self.inner.available_resource_ids()
    }
}

impl ResourceChangeBroadcaster for SharedLocationResource {
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.inner.subscribe()
    }
}
