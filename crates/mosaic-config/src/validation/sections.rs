//! Per-section validators.

use super::helpers::{validate_address, validate_range};
use crate::schema::MosaicConfig;

pub(super) fn validate_window(errors: &mut Vec<String>, config: &MosaicConfig) {
    let w = &config.window;
    validate_range(errors, "window.width", w.width, 320, 16384);
    validate_range(errors, "window.height", w.height, 240, 16384);
    validate_range(errors, "window.header_height", w.header_height, 32, 200);
}

pub(super) fn validate_browser(errors: &mut Vec<String>, config: &MosaicConfig) {
    let b = &config.browser;
    validate_address(errors, "browser.start_page", &b.start_page);
    validate_address(errors, "browser.search_url", &b.search_url);
}

pub(super) fn validate_timing(errors: &mut Vec<String>, config: &MosaicConfig) {
    let t = &config.timing;
    validate_range(errors, "timing.resize_debounce_ms", t.resize_debounce_ms, 0, 1000);
    validate_range(errors, "timing.settle_delay_ms", t.settle_delay_ms, 0, 5000);
    validate_range(errors, "timing.save_debounce_ms", t.save_debounce_ms, 0, 60_000);
    validate_range(
        errors,
        "timing.autosave_interval_secs",
        t.autosave_interval_secs,
        1,
        3600,
    );
    validate_range(errors, "timing.loader_timeout_ms", t.loader_timeout_ms, 0, 60_000);
}
