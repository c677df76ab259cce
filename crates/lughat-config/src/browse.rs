use std::env;

use serde::{Deserialize, Serialize};

fn default_dictionary_page_size() -> usize {
    24
}

fn default_language_page_size() -> usize {
    12
}

fn default_page_radius() -> usize {
    2
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BrowseConfig {
    /// Initial words per page on the dictionary page
    #[serde(default = "default_dictionary_page_size")]
    pub dictionary_page_size: usize,
    /// Initial languages per page on the language listing
    #[serde(default = "default_language_page_size")]
    pub language_page_size: usize,
    /// Page numbers shown on each side of the current page
    #[serde(default = "default_page_radius")]
    pub page_radius: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            dictionary_page_size: default_dictionary_page_size(),
            language_page_size: default_language_page_size(),
            page_radius: default_page_radius(),
        }
    }
}

impl BrowseConfig {
    pub fn new() -> Self {
        let dictionary_page_size = env::var("DICTIONARY_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_dictionary_page_size);

        let language_page_size = env::var("LANGUAGE_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_language_page_size);

        Self {
            dictionary_page_size,
            language_page_size,
            page_radius: default_page_radius(),
        }
    }
}
