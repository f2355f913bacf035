//! Key name normalization for keyboard events.
//!
//! Winit's logical key names and DOM `KeyboardEvent.key` values share the
//! same vocabulary, so both go through [`normalize_winit_key`] before
//! lookup in the [`HotkeyRegistry`](crate::input::HotkeyRegistry).

/// Convert a reported key name to the form produced by
/// [`parse_keybind`](crate::keymap::parse_keybind).
pub fn normalize_winit_key(key: &str) -> String {
    let named = match key {
        "ArrowUp" => "Up",
        "ArrowDown" => "Down",
        "ArrowLeft" => "Left",
        "ArrowRight" => "Right",
        " " | "Spacebar" => "Space",
        "Esc" => "Escape",
        "Del" => "Delete",
        "Return" => "Enter",
        _ if key.chars().count() == 1 => return key.to_uppercase(),
        // F-keys and the remaining named keys already match.
        _ => key,
    };
    named.to_string()
}
