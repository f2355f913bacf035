//! Full configuration validation.
//!
//! Validates numeric ranges and addresses. Each section has its own
//! validator; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod helpers;
mod sections;


use crate::schema::MosaicConfig;
use mosaic_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MosaicConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_window(&mut errors, config);
    sections::validate_browser(&mut errors, config);
    sections::validate_timing(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
