mod calculation;
pub mod geometry;
mod types;

pub use calculation::{auto_grid, compute_bounds};
pub use types::*;
