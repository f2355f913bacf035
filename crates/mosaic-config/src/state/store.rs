//! Reading and writing the state file.

use std::path::{Path, PathBuf};

use mosaic_common::ConfigError;
use tracing::{debug, info, warn};

use super::StateSnapshot;
use crate::atomic::write_atomic;

const STATE_FILE_NAME: &str = "app-state.json";

/// `<data dir>/mosaic/app-state.json`.
pub fn default_state_path() -> Result<PathBuf, ConfigError> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine data directory".into()))?;
    Ok(data_dir.join("mosaic").join(STATE_FILE_NAME))
}

/// Read a snapshot. A missing or corrupt file yields `None` and the caller
/// starts from defaults.
pub fn load_snapshot(path: &Path) -> Option<StateSnapshot> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no saved state, starting fresh");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read saved state");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(snapshot) => {
            debug!(path = %path.display(), "loaded saved state");
            Some(snapshot)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "saved state is corrupt, ignoring");
            None
        }
    }
}

/// Write a snapshot atomically as pretty-printed JSON.
pub fn save_snapshot(path: &Path, snapshot: &StateSnapshot) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| ConfigError::WriteError(format!("failed to serialize state: {e}")))?;
    write_atomic(path, &json)?;
    debug!(path = %path.display(), windows = snapshot.windows.len(), "state saved");
    Ok(())
}
