//! Debounce, throttle and backstop timings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Overlay/layout sync after a move or resize burst.
    pub resize_debounce_ms: u64,
    /// Wait after maximize/unmaximize before re-syncing geometry.
    pub settle_delay_ms: u64,
    /// Deferred layout after tab count changes.
    pub layout_delay_ms: u64,
    /// Trailing window that coalesces state-file writes.
    pub save_debounce_ms: u64,
    /// Unconditional periodic save (valid range: 1-3600).
    pub autosave_interval_secs: u64,
    /// Minimum gap between two cycle-tabs activations.
    pub cycle_throttle_ms: u64,
    /// Hide the initial loader after this long even if tabs are still loading.
    pub loader_timeout_ms: u64,
    /// Duration of the active-tab border highlight.
    pub highlight_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 16,
            settle_delay_ms: 150,
            layout_delay_ms: 50,
            save_debounce_ms: 1000,
            autosave_interval_secs: 10,
            cycle_throttle_ms: 120,
            loader_timeout_ms: 2000,
            highlight_ms: 650,
        }
    }
}

impl TimingConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn layout_delay(&self) -> Duration {
        Duration::from_millis(self.layout_delay_ms)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    pub fn cycle_throttle(&self) -> Duration {
        Duration::from_millis(self.cycle_throttle_ms)
    }

    pub fn loader_timeout(&self) -> Duration {
        Duration::from_millis(self.loader_timeout_ms)
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}
