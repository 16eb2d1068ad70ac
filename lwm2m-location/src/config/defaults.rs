//! Default values for all configuration settings.
//!
//! Contains the `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;
use crate::location::DEFAULT_SOURCE_URL;

/// Name of the config directory under the home directory.
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".lwm2m-location";

/// Name of the config file inside the config directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.ini";

/// Default HTTP timeout for one fetch, in seconds.
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 10;

/// Largest accepted fetch timeout, in seconds.
pub const MAX_SOURCE_TIMEOUT_SECS: u64 = 3_600;

/// Default refresh period, in seconds.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 2;

/// Largest accepted refresh period, in seconds (one day).
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 86_400;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logs/lwm2m-location.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            source: SourceSettings {
                url: DEFAULT_SOURCE_URL.to_string(),
                timeout: DEFAULT_SOURCE_TIMEOUT_SECS,
            },
            refresh: RefreshSettings {
                interval: DEFAULT_REFRESH_INTERVAL_SECS,
            },
            logging: LoggingSettings {
                file: PathBuf::from(DEFAULT_LOG_FILE),
            },
        }
    }
}
