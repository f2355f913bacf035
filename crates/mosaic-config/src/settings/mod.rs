//! User settings edited through the settings overlay and persisted in the
//! state file.

mod hotkeys;

pub use hotkeys::*;

use mosaic_common::types::MAX_TABS;
use mosaic_tiling::LayoutPreset;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Tab count given to newly added pages.
    pub default_tabs: usize,
    pub layout_preset: LayoutPreset,
    pub hotkeys: HotkeyConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_tabs: 4,
            layout_preset: LayoutPreset::Auto,
            hotkeys: HotkeyConfig::default(),
        }
    }
}

impl Settings {
    /// `default_tabs` clamped into the valid tab range.
    pub fn effective_default_tabs(&self) -> usize {
        self.default_tabs.clamp(1, MAX_TABS)
    }

    /// Apply load-time repairs.
    pub fn migrate(&mut self) {
        self.hotkeys.migrate();
    }

    /// Build the settings to store after the overlay submitted `incoming`,
    /// resolving hotkey conflicts against the current bindings.
    pub fn accept_update(&self, mut incoming: Settings) -> Settings {
        incoming.hotkeys.normalize_against(&self.hotkeys);
        incoming
    }

    /// Like [`Settings::accept_update`], with hotkeys compared by the key
    /// `canonical` maps each accelerator to.
    pub fn accept_update_by(
        &self,
        mut incoming: Settings,
        canonical: impl Fn(&str) -> String,
    ) -> Settings {
        incoming.hotkeys.normalize_by(&self.hotkeys, canonical);
        incoming
    }
}
