//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

use crate::location::LocationResourceConfig;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Location source settings
    pub source: SourceSettings,
    /// Refresh settings
    pub refresh: RefreshSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    /// Endpoint returning the sensor position as JSON
    pub url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// `[refresh]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSettings {
    /// Refresh period in seconds
    pub interval: u64,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl ConfigFile {
    /// Build the resource configuration described by these settings.
    pub fn resource_config(&self) -> LocationResourceConfig {
        LocationResourceConfig::from_config(
            self.source.url.clone(),
            self.source.timeout,
            self.refresh.interval,
        )
    }
}
