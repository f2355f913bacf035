//! Mosaic configuration system.
//!
//! Two layers: `config.toml` for process configuration (window defaults,
//! browser addresses, timings, logging), and the JSON state file that
//! carries user settings alongside the saved session. All sections use
//! `serde(default)` so partial files work out of the box.

pub mod atomic;
pub mod schema;
pub mod settings;
pub mod state;
pub mod toml_loader;
pub mod validation;

// Re-export core types for convenience
pub use schema::{MosaicConfig, CONFIG_SCHEMA_VERSION};
pub use settings::{HotkeyConfig, Settings};
pub use state::{PageRecord, StateSnapshot, WindowSnapshot};

use mosaic_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default path when `None`.
///
/// A missing file is created with commented defaults. Validation problems
/// are logged and the parsed values are kept.
pub fn load_config(path: Option<&Path>) -> Result<MosaicConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_or_create(path),
        None => toml_loader::load_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[window]\nwidth = 1500\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.window.width, 1500);
    }
}
