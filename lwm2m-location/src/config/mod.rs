//! Configuration file support.
//!
//! User settings live in `~/.lwm2m-location/config.ini`:
//!
//! ```ini
//! [source]
//! url = http://127.0.0.1:5000/get-location
//! timeout = 10
//!
//! [refresh]
//! interval = 2
//!
//! [logging]
//! file = logs/lwm2m-location.log
//! ```
//!
//! # Example
//!
//! ```ignore
//! use lwm2m_location::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let resource_config = config.resource_config();
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_CONFIG_DIR_NAME, DEFAULT_CONFIG_FILE_NAME, DEFAULT_LOG_FILE,
    DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_SOURCE_TIMEOUT_SECS, MAX_REFRESH_INTERVAL_SECS,
    MAX_SOURCE_TIMEOUT_SECS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, RefreshSettings, SourceSettings};
