use std::path::PathBuf;

use mosaic_common::PlatformError;

pub(super) const APP_NAME: &str = "mosaic";

/// Platform configuration directory for Mosaic.
///
/// - macOS: `~/Library/Application Support/mosaic`
/// - Linux: `$XDG_CONFIG_HOME/mosaic` (defaults to `~/.config/mosaic`)
/// - Windows: `%APPDATA%\mosaic`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Platform data directory for Mosaic. Holds the state file and the
/// per-page browsing partitions.
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Root of all page partitions: `data_dir()/partitions`.
pub fn partitions_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("partitions"))
}

/// Storage directory of one browsing partition.
///
/// Session ids look like `persist:page_3`; characters that are not safe in
/// a file name are replaced with `_`.
pub fn partition_dir(session_id: &str) -> Result<PathBuf, PlatformError> {
    let name = sanitize_partition(session_id);
    if name.is_empty() {
        return Err(PlatformError::PathError(format!(
            "invalid session id {session_id:?}"
        )));
    }
    Ok(partitions_dir()?.join(name))
}

pub(super) fn sanitize_partition(session_id: &str) -> String {
    session_id
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}
