//! CLI command implementations.
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`run`] - Serve the location resource until interrupted

pub mod config;
pub mod run;
