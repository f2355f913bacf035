use mosaic_common::PlatformError;

use super::types::{KeyBind, Modifier};

/// Accelerator key aliases and the canonical name each maps to.
/// Canonical names match what [`crate::normalize_winit_key`] produces.
const KEY_ALIASES: &[(&[&str], &str)] = &[
    (&["period"], "."),
    (&["comma"], ","),
    (&["slash"], "/"),
    (&["backslash"], "\\"),
    (&["plus"], "+"),
    (&["space"], "Space"),
    (&["enter", "return"], "Enter"),
    (&["escape", "esc"], "Escape"),
    (&["tab"], "Tab"),
    (&["backspace"], "Backspace"),
    (&["delete", "del"], "Delete"),
    (&["up", "arrowup"], "Up"),
    (&["down", "arrowdown"], "Down"),
    (&["left", "arrowleft"], "Left"),
    (&["right", "arrowright"], "Right"),
    (&["home"], "Home"),
    (&["end"], "End"),
    (&["pageup"], "PageUp"),
    (&["pagedown"], "PageDown"),
];

/// Parse an Electron-style accelerator (`"CommandOrControl+Shift+Tab"`,
/// `"Alt+Left"`, `"F11"`) into a [`KeyBind`].
///
/// `CommandOrControl` and its short forms resolve to Super on macOS and
/// Ctrl elsewhere. The final token is always the key, even when it names a
/// modifier.
pub fn parse_keybind(s: &str) -> Result<KeyBind, PlatformError> {
    let tokens: Vec<&str> = s.split('+').map(str::trim).collect();
    let Some((last, leading)) = tokens.split_last() else {
        return Err(PlatformError::AcceleratorError("empty accelerator".into()));
    };
    if leading.is_empty() && last.is_empty() {
        return Err(PlatformError::AcceleratorError("empty accelerator".into()));
    }

    let mut modifiers: Vec<Modifier> = Vec::with_capacity(leading.len());
    for token in leading {
        let modifier = normalize_modifier(token).ok_or_else(|| {
            PlatformError::AcceleratorError(format!("unrecognized modifier {token:?} in {s:?}"))
        })?;
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
    }

    if last.is_empty() {
        return Err(PlatformError::AcceleratorError(format!(
            "{s:?} has no key component"
        )));
    }

    Ok(KeyBind {
        modifiers,
        key: normalize_key_name(last),
    })
}

pub(super) fn normalize_modifier(token: &str) -> Option<Modifier> {
    let primary = if cfg!(target_os = "macos") {
        Modifier::Super
    } else {
        Modifier::Ctrl
    };
    let modifier = match token.to_ascii_lowercase().as_str() {
        "commandorcontrol" | "cmdorctrl" | "cmd" | "command" => primary,
        "ctrl" | "control" => Modifier::Ctrl,
        "alt" | "option" | "opt" => Modifier::Alt,
        "shift" => Modifier::Shift,
        "super" | "win" | "meta" => Modifier::Super,
        _ => return None,
    };
    Some(modifier)
}

pub(super) fn normalize_key_name(token: &str) -> String {
    let lower = token.to_ascii_lowercase();
    if let Some((_, canonical)) = KEY_ALIASES
        .iter()
        .find(|(aliases, _)| aliases.contains(&lower.as_str()))
    {
        return (*canonical).to_string();
    }
    if token.chars().count() == 1 {
        return token.to_uppercase();
    }
    // F-keys and other names: first letter upper, rest lower.
    let mut chars = lower.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
