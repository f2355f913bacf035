//! Hit testing and overlay placement.

use mosaic_common::types::Rect;

/// Index of the first rectangle containing `(x, y)`, edges inclusive.
///
/// Adjacent tabs share an edge, so a click exactly on the seam resolves
/// to the earlier tab.
pub fn hit_test(rects: &[Rect], x: f64, y: f64) -> Option<usize> {
    rects.iter().position(|r| r.contains(x, y))
}

/// Translate a window-content rectangle into screen coordinates given the
/// screen position of the window's content origin.
pub fn to_screen(rect: Rect, origin: (f64, f64)) -> Rect {
    rect.offset(origin.0, origin.1)
}

/// Screen bounds of a full-content overlay (popup, delete-mode, settings,
/// or the hidden search box): the window's whole content rectangle.
pub fn overlay_bounds(origin: (f64, f64), width: f64, height: f64) -> Rect {
    Rect::new(origin.0, origin.1, width.max(0.0), height.max(0.0))
}

/// Screen bounds of the search overlay: pinned over the target tab while
/// open, over the whole content area otherwise.
pub fn search_overlay_bounds(
    origin: (f64, f64),
    width: f64,
    height: f64,
    target_tab: Option<Rect>,
) -> Rect {
    match target_tab {
        Some(tab) if !tab.is_empty() => to_screen(tab, origin),
        _ => overlay_bounds(origin, width, height),
    }
}
