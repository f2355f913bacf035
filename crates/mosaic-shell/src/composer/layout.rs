//! Tab geometry, overlay pinning, and window geometry transitions.

use mosaic_common::{PageId, Rect, WindowId};
use mosaic_tiling::geometry::{overlay_bounds, search_overlay_bounds};

use crate::backend::{Backend, OverlayKind};
use crate::messages::ChromeMessage;
use crate::scheduler::Task;

use super::Shell;

impl<B: Backend> Shell<B> {
    /// Visible tab rectangles of the current page in window-content
    /// coordinates.
    pub(super) fn tab_rects(&self, window: WindowId) -> Vec<Rect> {
        let Some(state) = self.windows.get(&window) else {
            return Vec::new();
        };
        let Some((width, height)) = self.backend.content_size(window) else {
            return Vec::new();
        };
        let count = state.tab_count(state.current_page);
        self.engine
            .tab_bounds(width, height, count, state.fullscreen)
    }

    /// Rectangle of `slot` of `page` if that page is showing.
    pub(super) fn slot_rect(&self, window: WindowId, page: PageId, slot: usize) -> Option<Rect> {
        let state = self.windows.get(&window)?;
        if state.current_page != page {
            return None;
        }
        self.tab_rects(window).get(slot).copied()
    }

    /// Apply header and tab bounds, then re-pin overlays.
    pub(super) fn layout(&mut self, window: WindowId) {
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        let Some((width, _)) = self.backend.content_size(window) else {
            return;
        };
        let header = state.header;
        let header_rect = self.engine.header_bounds(width, state.fullscreen);
        let rects = self.tab_rects(window);
        let slots: Vec<_> = state
            .current_pool()
            .map(|pool| pool.slots().to_vec())
            .unwrap_or_default();

        self.backend.set_bounds(header, header_rect);
        for (slot, surface) in slots.into_iter().enumerate() {
            let bounds = rects.get(slot).copied().unwrap_or(Rect::ZERO);
            self.backend.set_bounds(surface, bounds);
        }
        tracing::trace!(window_id = window.0, tabs = rects.len(), "layout applied");

        self.sync_overlays(window);
    }

    /// Pin the overlay windows to the main window's content area. The
    /// search box follows its target tab while open.
    pub(super) fn sync_overlays(&mut self, window: WindowId) {
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        let (Some(origin), Some((width, height))) = (
            self.backend.content_origin(window),
            self.backend.content_size(window),
        ) else {
            return;
        };

        let target = state
            .search
            .and_then(|t| self.slot_rect(window, t.page, t.slot));
        let full = overlay_bounds(origin, width, height);
        let search = search_overlay_bounds(origin, width, height, target);

        for kind in OverlayKind::ALL {
            let bounds = if kind == OverlayKind::SearchBox {
                search
            } else {
                full
            };
            self.backend.set_overlay_bounds(window, kind, bounds);
        }
    }

    // =========================================================================
    // Window geometry events
    // =========================================================================

    /// The window was resized. Layout follows once the burst settles.
    pub fn on_resized(&mut self, window: WindowId) {
        if !self.windows.contains_key(&window) {
            return;
        }
        let now = self.backend.now();
        self.scheduler
            .debounce(Task::Layout(window), now, self.config.timing.resize_debounce());
    }

    /// The window was moved. Only the overlays need to follow.
    pub fn on_moved(&mut self, window: WindowId) {
        if !self.windows.contains_key(&window) {
            return;
        }
        let now = self.backend.now();
        self.scheduler.debounce(
            Task::OverlaySync(window),
            now,
            self.config.timing.resize_debounce(),
        );
    }

    pub fn on_maximize_changed(&mut self, window: WindowId, maximized: bool) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        if state.maximized == maximized {
            return;
        }
        state.maximized = maximized;
        self.post_header(window, ChromeMessage::UpdateMaximize(maximized));
        let now = self.backend.now();
        self.scheduler
            .debounce(Task::Layout(window), now, self.config.timing.settle_delay());
    }

    /// Enter or leave fullscreen: the header is parked above the window
    /// while fullscreen and the tabs take its height.
    pub fn on_fullscreen_changed(&mut self, window: WindowId, fullscreen: bool) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        if state.fullscreen == fullscreen {
            return;
        }
        state.fullscreen = fullscreen;
        tracing::debug!(window_id = window.0, fullscreen, "fullscreen changed");
        self.post_header(window, ChromeMessage::ToggleHeader(!fullscreen));
        self.cleanup_search(window);
        self.layout(window);
    }

    pub(super) fn toggle_maximize(&mut self, window: WindowId) {
        if !self.windows.contains_key(&window) {
            return;
        }
        let maximized = !self.backend.is_maximized(window);
        self.backend.set_maximized(window, maximized);
        self.on_maximize_changed(window, maximized);
    }

    pub(super) fn toggle_fullscreen(&mut self, window: WindowId) {
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        let fullscreen = !state.fullscreen;
        self.backend.set_fullscreen(window, fullscreen);
        self.on_fullscreen_changed(window, fullscreen);
    }

    /// Re-run layout after a delay (tab count or page changes).
    pub(super) fn schedule_layout(&mut self, window: WindowId) {
        let now = self.backend.now();
        self.scheduler
            .debounce(Task::Layout(window), now, self.config.timing.layout_delay());
    }
}
