use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding an array of language documents to start from
    pub seed_path: Option<String>,
}

impl StoreConfig {
    pub fn new() -> Self {
        let seed_path = env::var("LUGHAT_SEED").ok().filter(|p| !p.trim().is_empty());

        Self { seed_path }
    }
}
