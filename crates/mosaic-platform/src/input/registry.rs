use std::collections::HashMap;

use mosaic_common::{Action, HotkeyAction};
use mosaic_config::HotkeyConfig;
use tracing::{debug, warn};

use crate::keymap::parse_keybind;

use super::key_combo::KeyCombo;

/// Maps key combinations to shortcut actions.
///
/// Built from the user's [`HotkeyConfig`] and rebuilt whenever settings are
/// saved. Escape is bound permanently and cannot be reassigned. While
/// suspended (application unfocused, or the settings overlay capturing a
/// new binding) nothing matches.
pub struct HotkeyRegistry {
    bindings: HashMap<KeyCombo, HotkeyAction>,
    escape: KeyCombo,
    suspended: bool,
}

impl HotkeyRegistry {
    /// Build the registry from the hotkey table.
    ///
    /// Unbound slots are skipped; unparseable accelerators are logged and
    /// skipped. If two slots resolve to the same combo the earlier one wins.
    pub fn from_config(config: &HotkeyConfig) -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
            escape: KeyCombo::plain("Escape"),
            suspended: false,
        };
        registry.rebind(config);
        registry
    }

    /// Replace every binding, keeping the suspended state.
    pub fn rebind(&mut self, config: &HotkeyConfig) {
        self.bindings.clear();
        for (action, accelerator) in config.bound() {
            let combo = match parse_keybind(accelerator) {
                Ok(kb) => KeyCombo::from_keybind(&kb),
                Err(e) => {
                    warn!(hotkey = action.name(), "invalid accelerator {accelerator:?}: {e}");
                    continue;
                }
            };
            if combo == self.escape {
                warn!(hotkey = action.name(), "Escape is reserved, binding ignored");
                continue;
            }
            if let Some(existing) = self.bindings.get(&combo) {
                warn!(
                    hotkey = action.name(),
                    existing = existing.name(),
                    "accelerator {accelerator:?} already bound"
                );
                continue;
            }
            debug!(hotkey = action.name(), accelerator, "hotkey registered");
            self.bindings.insert(combo, action);
        }
    }

    /// Look up the action for a key combination.
    pub fn lookup(&self, combo: &KeyCombo) -> Option<Action> {
        if self.suspended {
            return None;
        }
        if *combo == self.escape {
            return Some(Action::Escape);
        }
        self.bindings.get(combo).map(|a| a.to_action())
    }

    /// The combo bound to `action`, if any.
    pub fn combo_for(&self, action: HotkeyAction) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find_map(|(combo, a)| (*a == action).then_some(combo))
    }

    pub fn suspend(&mut self) {
        if !self.suspended {
            debug!("hotkeys suspended");
        }
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        if self.suspended {
            debug!("hotkeys resumed");
        }
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Number of rebindable bindings (Escape not counted).
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
