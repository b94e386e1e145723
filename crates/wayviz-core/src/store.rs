//! Persistence of the options blob.
//!
//! The configuration is stored as a JSON object under the fixed
//! [`OPTIONS_KEY`] key, e.g. `{"options": {"wallFrequency": 0.1, ...}}`.
//! Loading never fails: an absent file, malformed JSON, or missing fields
//! all fall back to the documented defaults, and malformed data is logged
//! rather than surfaced.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::warn;

use crate::config::Config;

/// Key the options object is stored under.
pub const OPTIONS_KEY: &str = "options";

/// File-backed configuration store.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the persisted configuration, falling back to defaults.
    pub fn load(&self) -> Config {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return Config::default(),
        };
        let value: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!("ignoring malformed options file {:?}: {err}", self.path);
                return Config::default();
            }
        };
        match value.get(OPTIONS_KEY) {
            Some(options) => match serde_json::from_value(options.clone()) {
                Ok(config) => config,
                Err(err) => {
                    warn!("ignoring malformed options object: {err}");
                    Config::default()
                }
            },
            None => Config::default(),
        }
    }

    /// Persist the configuration (the five persisted fields only).
    pub fn save(&self, config: &Config) -> io::Result<()> {
        let blob = serde_json::json!({ OPTIONS_KEY: config });
        let text = serde_json::to_string_pretty(&blob).map_err(io::Error::other)?;
        fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> ConfigStore {
        let mut path = std::env::temp_dir();
        path.push(format!("wayviz-{}-{name}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        ConfigStore::new(path)
    }

    #[test]
    fn absent_file_yields_defaults() {
        let store = temp_store("absent");
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let store = temp_store("malformed");
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), Config::default());
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn round_trips_persisted_fields() {
        let store = temp_store("roundtrip");
        let config = Config {
            wall_frequency: 0.3,
            grid_size: 16,
            diagonal: true,
            closest: true,
            show_search_info: true,
            rate: 5,
            show_trace: false,
        };
        store.save(&config).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.wall_frequency, 0.3);
        assert_eq!(loaded.grid_size, 16);
        assert!(loaded.diagonal);
        assert!(loaded.closest);
        assert!(loaded.show_search_info);
        // Session-only fields come back as defaults.
        assert_eq!(loaded.rate, 1);
        assert!(loaded.show_trace);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn blob_is_keyed() {
        let store = temp_store("keyed");
        store.save(&Config::default()).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get(OPTIONS_KEY).is_some());
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn partial_blob_fills_missing_fields() {
        let store = temp_store("partial");
        fs::write(store.path(), r#"{"options": {"gridSize": 24}}"#).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.grid_size, 24);
        assert_eq!(loaded.wall_frequency, 0.1);
        fs::remove_file(store.path()).unwrap();
    }
}
