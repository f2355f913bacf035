//! Accelerator string parsing.

mod parse;
mod types;

pub use parse::parse_keybind;
pub use types::{KeyBind, Modifier};
