mod action_enum;
mod dispatch;
mod hotkey;
mod wire;

pub use action_enum::*;
pub use hotkey::HotkeyAction;
