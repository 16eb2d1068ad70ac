//! Location resource (LwM2M object 6).
//!
//! This module mirrors a remote sensor's position (latitude, longitude and
//! the time of the last change) so that a device-management client can
//! answer reads synchronously and notify observers when the position moves,
//! without ever putting network I/O on the read path.
//!
//! # Architecture
//!
//! ```text
//! RefreshScheduler (tokio interval, every 2s by default)
//!     │
//!     ├── LocationSource::fetch(latitude)   ─┐ one HTTP GET each,
//!     ├── LocationSource::fetch(longitude)  ─┘ failures keep the cached field
//!     │
//!     └── ChangeNotifier::apply(snapshot)
//!             │
//!             ├── StateStore::commit(lat, lon, timestamp)   (only on change)
//!             └── broadcast::Sender<ChangeEvent>            (only on change)
//!
//! protocol layer ── ReadDispatcher::read_resource(id) ── StateStore::read()
//! ```
//!
//! The scheduler is the only writer. Reads copy the whole state under a
//! lock, so latitude, longitude and timestamp always come from the same
//! commit.
//!
//! # Usage
//!
//! ```ignore
//! use lwm2m_location::location::{
//!     LocationResource, LocationResourceConfig, ResourceChangeBroadcaster, ResourceProvider,
//! };
//!
//! let resource = LocationResource::start(&LocationResourceConfig::default())?;
//!
//! // Answer a read
//! let latitude = resource.read_resource(0)?;
//!
//! // Forward change events to observers
//! let mut rx = resource.subscribe();
//! while let Ok(event) = rx.recv().await {
//!     println!("changed: {:?}", event.resource_ids());
//! }
//! ```
//!
//! # Components
//!
//! - [`state`] - Core types: `ResourceId`, `ResourceState`, `PositionSnapshot`, `ChangeEvent`
//! - [`store`] - `StateStore`, the lock-guarded state cell
//! - [`source`] - `LocationSource` trait and `HttpLocationSource`
//! - [`http`] - `AsyncHttpClient` trait and `ReqwestClient`
//! - [`notifier`] - `detect_change` and `ChangeNotifier`
//! - [`scheduler`] - `RefreshScheduler` background task
//! - [`dispatcher`] - `ReadDispatcher` for resource reads
//! - [`resource`] - `LocationResource` tying it all together
//! - [`provider`] - `ResourceProvider` / `ResourceChangeBroadcaster` traits

mod clock;
mod config;
mod dispatcher;
mod error;
mod http;
mod notifier;
mod provider;
mod resource;
mod scheduler;
mod source;
mod state;
mod store;

pub use clock::{Clock, SystemClock};
pub use config::{LocationResourceConfig, DEFAULT_EVENT_CAPACITY, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use dispatcher::ReadDispatcher;
pub use error::{FetchError, ReadError, ResourceError};
pub use http::{AsyncHttpClient, ReqwestClient};
pub use notifier::{detect_change, ChangeNotifier};
pub use provider::{ResourceChangeBroadcaster, ResourceProvider, SharedLocationResource};
pub use resource::LocationResource;
pub use scheduler::{
    RefreshScheduler, RefreshTask, DEFAULT_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL,
};
pub use source::{HttpLocationSource, LocationField, LocationSource, DEFAULT_SOURCE_URL};
pub use state::{
    ChangeEvent, PositionSnapshot, ResourceId, ResourceState, ResourceValue, DEFAULT_SCALE_FACTOR,
};
pub use store::StateStore;
