//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use mosaic_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_mosaic_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[window]
header_height = 96

[browser]
start_page = "https://example.org/"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.header_height, 96);
    assert_eq!(config.browser.start_page, "https://example.org/");
    // Defaults preserved
    assert_eq!(config.window.width, 1200);
    assert_eq!(config.timing.save_debounce_ms, 1000);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn out_of_range_values_are_kept_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window]\nheader_height = 5\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.header_height, 5);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mosaic").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.header_height, 80);
    assert_eq!(config.browser.start_page, "mosaic://localhost/start.html");
}

#[test]
fn load_or_create_writes_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.timing.cycle_throttle_ms, 120);
}

#[test]
fn default_config_path_ends_with_mosaic() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("mosaic/config.toml"));
    }
}
