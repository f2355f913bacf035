//! Hotkey registry: maps key combinations to shortcut actions.

mod key_combo;
mod registry;

pub use key_combo::KeyCombo;
pub use registry::HotkeyRegistry;
