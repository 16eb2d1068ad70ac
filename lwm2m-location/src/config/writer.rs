//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[source]
; HTTP endpoint returning the sensor position as JSON:
;   {{"latitude": 48.8566, "longitude": 2.3522}}
url = {}
; Timeout for one request, in seconds
timeout = {}

[refresh]
; How often the position is fetched, in seconds
interval = {}

[logging]
; Log file (cleared at every start)
file = {}
"#,
        config.source.url,
        config.source.timeout,
        config.refresh.interval,
        path_to_string(&config.logging.file),
    )
}

/// Render a path, collapsing the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::super::settings::ConfigFile;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_contains_sections() {
        let content = to_config_string(&ConfigFile::default());

        assert!(content.contains("[source]"));
        assert!(content.contains("url = http://127.0.0.1:5000/get-location"));
        assert!(content.contains("timeout = 10"));
        assert!(content.contains("[refresh]"));
        assert!(content.contains("interval = 2"));
        assert!(content.contains("file = logs/lwm2m-location.log"));
    }

    #[test]
    fn test_save_and_reload_preserves_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.source.url = "https://tracker.local/get-location".to_string();
        config.refresh.interval = 7;
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }
}
