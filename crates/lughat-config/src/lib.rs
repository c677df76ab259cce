use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::browse::BrowseConfig;
use self::import::ImportConfig;
use self::log::LogConfig;
use self::store::StoreConfig;

pub mod browse;
pub mod import;
pub mod log;
pub mod store;

pub use self::log::LogFormat;

fn default_event_capacity() -> usize {
    64
}

fn default_view_capacity() -> usize {
    256
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browse: BrowseConfig,
    pub import: ImportConfig,
    pub store: StoreConfig,
    pub log: LogConfig,

    /// Capacity of the presentation -> app channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    /// Capacity of the app -> presentation channel (snapshot bursts)
    #[serde(default = "default_view_capacity")]
    pub view_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browse: BrowseConfig::default(),
            import: ImportConfig::default(),
            store: StoreConfig::default(),
            log: LogConfig::default(),
            event_capacity: default_event_capacity(),
            view_capacity: default_view_capacity(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let event_capacity = env::var("EVENT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_event_capacity);

        Config {
            browse: BrowseConfig::new(),
            import: ImportConfig::new(),
            store: StoreConfig::new(),
            log: LogConfig::new(),

            event_capacity,
            view_capacity: default_view_capacity(),
        }
    }

    /// Load a JSON config file; absent keys take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}
