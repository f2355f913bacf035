//! Main window configuration types.

use serde::{Deserialize, Serialize};

/// Main window defaults and chrome geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial width for windows without saved bounds.
    pub width: u32,
    /// Initial height for windows without saved bounds.
    pub height: u32,
    /// Height of the header strip in pixels (valid range: 32-200).
    pub header_height: u32,
    /// Window background colour shown behind content while loading.
    pub background: String,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            header_height: 80,
            background: "#000000".into(),
            title: "Mosaic".into(),
        }
    }
}
