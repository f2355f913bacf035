//! Persisted session state (the JSON state file).

mod snapshot;
mod store;

pub use snapshot::*;
pub use store::{default_state_path, load_snapshot, save_snapshot};

#[cfg(test)]
mod tests;
