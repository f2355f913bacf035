use std::fs;
use std::path::Path;

use mosaic_common::PlatformError;

use super::resolve::{config_dir, data_dir, partitions_dir};

fn create(path: &Path) -> Result<(), PlatformError> {
    fs::create_dir_all(path)
        .map_err(|e| PlatformError::PathError(format!("{}: {e}", path.display())))
}

/// Create the config, data and partition directories.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    create(&config_dir()?)?;
    create(&data_dir()?)?;
    create(&partitions_dir()?)?;
    Ok(())
}

/// Delete a partition's on-disk storage. Missing directories are not an
/// error.
pub fn remove_partition(dir: &Path) -> Result<(), PlatformError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PlatformError::PathError(format!("{}: {e}", dir.display()))),
    }
}
