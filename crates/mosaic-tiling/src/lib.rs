pub mod layout;

pub use layout::geometry;
pub use layout::{compute_bounds, LayoutEngine, LayoutPreset};
