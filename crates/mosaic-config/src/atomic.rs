//! Crash-safe file replacement shared by the config and state writers.

use std::path::Path;

use mosaic_common::ConfigError;

/// Write `contents` to `path`, creating parent directories as needed.
///
/// Writes to a sibling `.tmp` file first, then renames it over `path`.
/// If the rename fails the file is written directly.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::WriteError(format!(
                "failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, contents).map_err(|e| {
        ConfigError::WriteError(format!("failed to write {}: {e}", tmp_path.display()))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        let _ = std::fs::remove_file(&tmp_path);
        std::fs::write(path, contents).map_err(|e2| {
            ConfigError::WriteError(format!("failed to write {}: {e2}", path.display()))
        })?;
    }

    Ok(())
}
