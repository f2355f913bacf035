mod core;
pub mod zoom;

pub use self::core::*;
