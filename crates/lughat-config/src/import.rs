use std::env;

use serde::{Deserialize, Serialize};

fn default_max_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_require_csv_extension() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ImportConfig {
    /// Files larger than this are refused before reading
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_require_csv_extension")]
    pub require_csv_extension: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            require_csv_extension: default_require_csv_extension(),
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        let max_bytes = env::var("IMPORT_MAX_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_bytes);

        Self {
            max_bytes,
            ..Self::default()
        }
    }
}
