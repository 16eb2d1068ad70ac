//! lwm2m-location - LwM2M Location object backed by a remote position source
//!
//! This library keeps a cached copy of a sensor's position, refreshes it from
//! an HTTP endpoint in the background, serves synchronous reads of the
//! Location object's resources and publishes change events for observers.
//!
//! # High-Level API
//!
//! ```ignore
//! use lwm2m_location::config::ConfigFile;
//! use lwm2m_location::location::{LocationResource, ResourceProvider};
//!
//! let config = ConfigFile::load()?;
//! let resource = LocationResource::start(&config.resource_config())?;
//!
//! let latitude = resource.read_resource(0)?;
//! ```

pub mod config;
pub mod location;
pub mod logging;

/// Version of the library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
