use crate::keymap::{parse_keybind, KeyBind, Modifier};
use crate::winit_keys::normalize_winit_key;

pub(super) const MOD_CTRL: u8 = 0b0001;
pub(super) const MOD_ALT: u8 = 0b0010;
pub(super) const MOD_SHIFT: u8 = 0b0100;
pub(super) const MOD_SUPER: u8 = 0b1000;

/// A canonical key representation for HashMap lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// Bitmask: Ctrl=1, Alt=2, Shift=4, Super=8.
    pub mods: u8,
    /// Normalized key name (e.g. "T", "Tab", "F11", "Left").
    pub key: String,
}

impl KeyCombo {
    /// Build from a parsed [`KeyBind`].
    pub fn from_keybind(kb: &KeyBind) -> Self {
        let mods = kb.modifiers.iter().fold(0u8, |acc, m| {
            acc | match m {
                Modifier::Ctrl => MOD_CTRL,
                Modifier::Alt => MOD_ALT,
                Modifier::Shift => MOD_SHIFT,
                Modifier::Super => MOD_SUPER,
            }
        });
        Self {
            mods,
            key: kb.key.clone(),
        }
    }

    /// Build from modifier state and a raw key name as reported by winit or
    /// a DOM `KeyboardEvent.key` (the two use the same names).
    pub fn from_parts(ctrl: bool, alt: bool, shift: bool, super_key: bool, raw_key: &str) -> Self {
        let mut mods = 0u8;
        if ctrl {
            mods |= MOD_CTRL;
        }
        if alt {
            mods |= MOD_ALT;
        }
        if shift {
            mods |= MOD_SHIFT;
        }
        if super_key {
            mods |= MOD_SUPER;
        }
        Self {
            mods,
            key: normalize_winit_key(raw_key),
        }
    }

    /// Bare key with no modifiers.
    pub fn plain(key: &str) -> Self {
        Self::from_parts(false, false, false, false, key)
    }

    /// A string naming the key an accelerator resolves to on this
    /// platform. Spellings of the same key (`Ctrl+T`, `CmdOrCtrl+t`)
    /// give equal strings. Unparsable accelerators map to themselves.
    pub fn canonical_accelerator(accelerator: &str) -> String {
        match parse_keybind(accelerator) {
            Ok(kb) => {
                let combo = Self::from_keybind(&kb);
                format!("{:04b}+{}", combo.mods, combo.key)
            }
            Err(_) => accelerator.trim().to_string(),
        }
    }
}
