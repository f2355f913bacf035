//! Content surface configuration types.

use serde::{Deserialize, Serialize};

/// Addresses and identity used by tab surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Address loaded into new or unrestored tabs.
    pub start_page: String,
    /// Search engine prefix; the escaped query is appended.
    pub search_url: String,
    /// Optional user agent override for every tab surface.
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            start_page: "mosaic://localhost/start.html".into(),
            search_url: "https://www.google.com/search?q=".into(),
            user_agent: None,
        }
    }
}
