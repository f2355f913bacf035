//! Configuration schema types for Mosaic.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod browser;
mod system;
mod timing;
mod window;

pub use browser::*;
pub use system::*;
pub use timing::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Mosaic, read from `config.toml`.
///
/// User settings edited in the settings overlay (default tab count,
/// layout preset, hotkeys) live in the state file instead; see
/// [`crate::settings::Settings`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MosaicConfig {
    pub window: WindowConfig,
    pub browser: BrowserConfig,
    pub timing: TimingConfig,
    pub logging: LoggingConfig,
}
