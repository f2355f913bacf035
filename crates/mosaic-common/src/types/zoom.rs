//! Global zoom level arithmetic (percent, 50..=200 in steps of 10).

pub const MIN_ZOOM: u32 = 50;
pub const MAX_ZOOM: u32 = 200;
pub const ZOOM_STEP: u32 = 10;
pub const DEFAULT_ZOOM: u32 = 100;

/// Clamp an arbitrary percentage into the supported range.
pub fn clamp_zoom(level: u32) -> u32 {
    level.clamp(MIN_ZOOM, MAX_ZOOM)
}

pub fn zoom_in(level: u32) -> u32 {
    clamp_zoom(level.saturating_add(ZOOM_STEP))
}

pub fn zoom_out(level: u32) -> u32 {
    clamp_zoom(level.saturating_sub(ZOOM_STEP))
}

/// Zoom factor handed to a content surface (`1.0` == 100%).
pub fn zoom_factor(level: u32) -> f64 {
    f64::from(level) / 100.0
}
