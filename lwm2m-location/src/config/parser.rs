//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::{MAX_REFRESH_INTERVAL_SECS, MAX_SOURCE_TIMEOUT_SECS};
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = section.get("url") {
            config.source.url = parse_url("source", "url", v)?;
        }
        if let Some(v) = section.get("timeout") {
            config.source.timeout = parse_secs("source", "timeout", v, MAX_SOURCE_TIMEOUT_SECS)?;
        }
    }

    // [refresh] section
    if let Some(section) = ini.section(Some("refresh")) {
        if let Some(v) = section.get("interval") {
            config.refresh.interval =
                parse_secs("refresh", "interval", v, MAX_REFRESH_INTERVAL_SECS)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_url(section: &str, key: &str, value: &str) -> Result<String, ConfigFileError> {
    let v = value.trim();
    if v.starts_with("http://") || v.starts_with("https://") {
        Ok(v.to_string())
    } else {
        Err(invalid(
            section,
            key,
            value,
            "must be an http:// or https:// URL",
        ))
    }
}

/// Parse a whole number of seconds in `1..=max`.
fn parse_secs(section: &str, key: &str, value: &str, max: u64) -> Result<u64, ConfigFileError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if (1..=max).contains(&secs) => Ok(secs),
        _ => Err(invalid(
            section,
            key,
            value,
            &format!("must be between 1 and {} seconds", max),
        )),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
