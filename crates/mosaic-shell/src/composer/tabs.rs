//! Active tab tracking, tab count changes and delete mode.

use mosaic_common::types::MAX_TABS;
use mosaic_common::{PageId, Rect, ShellError, WindowId};

use crate::backend::{Backend, OverlayKind};
use crate::bridge::highlight_script;
use crate::messages::ChromeMessage;
use crate::scheduler::Task;

use super::Shell;

impl<B: Backend> Shell<B> {
    /// Make `slot` the active tab of `page`. No-op if it already is.
    pub fn activate_tab(&mut self, window: WindowId, page: PageId, slot: usize) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        if slot >= state.tab_count(page) || state.active_tab(page) == Some(slot) {
            return;
        }
        state.active_tab.insert(page, slot);
        let surface = state.pool(page).and_then(|p| p.get(slot));
        let showing = state.current_page == page;
        tracing::debug!(window_id = window.0, page_id = page.0, slot, "tab activated");

        if !showing {
            return;
        }
        self.post_header(window, ChromeMessage::UpdateTabState(true));
        self.backend.focus_window(window);
        if let Some(surface) = surface {
            self.backend.focus_surface(surface);
            let script = highlight_script(self.config.timing.highlight_ms);
            self.backend.eval_script(surface, &script);
        }
    }

    /// A content bridge reported a click. Only counts for the page the
    /// window is showing.
    pub(super) fn tab_clicked(&mut self, window: WindowId, page: PageId, slot: usize) {
        let showing = self
            .windows
            .get(&window)
            .is_some_and(|s| s.current_page == page);
        if showing {
            self.activate_tab(window, page, slot);
        }
    }

    /// Grow the current page by one tab.
    pub fn add_tab(&mut self, window: WindowId, activate: bool) -> Result<(), ShellError> {
        let state = self
            .windows
            .get_mut(&window)
            .ok_or(ShellError::UnknownWindow(window))?;
        let page = state.current_page;
        let count = state.tab_count(page);
        if count >= MAX_TABS {
            return Err(ShellError::CapacityExceeded { max: MAX_TABS });
        }
        state.set_tab_count(page, count + 1);
        let surface = state.pool(page).and_then(|p| p.get(count));

        if let Some(surface) = surface {
            let start = self.config.browser.start_page.clone();
            self.load_address(surface, &start);
        }
        if activate {
            self.activate_tab(window, page, count);
        }
        tracing::debug!(window_id = window.0, page_id = page.0, tabs = count + 1, "tab added");

        self.refresh_header(window);
        self.schedule_layout(window);
        self.request_save();
        Ok(())
    }

    /// Advance the active tab, throttled.
    pub(super) fn cycle_tabs(&mut self, window: WindowId) {
        let now = self.backend.now();
        if !self
            .scheduler
            .throttle(Task::CycleTabs, now, self.config.timing.cycle_throttle())
        {
            return;
        }
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        let page = state.current_page;
        let count = state.tab_count(page);
        let next = match state.active_tab(page) {
            Some(active) => (active + 1) % count,
            None => 0,
        };
        self.activate_tab(window, page, next);
    }

    // =========================================================================
    // Delete mode
    // =========================================================================

    pub(super) fn enter_delete_mode(&mut self, window: WindowId) {
        self.cleanup_search(window);
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        state.delete_mode = true;
        let rects = self.tab_rects(window);

        self.sync_overlays(window);
        self.backend
            .set_overlay_interactive(window, OverlayKind::DeleteMode, true);
        self.show_overlay(window, OverlayKind::DeleteMode, true);
        self.post_overlay(
            window,
            OverlayKind::DeleteMode,
            ChromeMessage::ActivateDeleteMode(rects),
        );
    }

    pub(super) fn cancel_delete_mode(&mut self, window: WindowId) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        if !state.delete_mode {
            return;
        }
        state.delete_mode = false;
        self.post_overlay(
            window,
            OverlayKind::DeleteMode,
            ChromeMessage::DeactivateDeleteMode,
        );
        self.backend
            .set_overlay_interactive(window, OverlayKind::DeleteMode, false);
        self.hide_overlay(window, OverlayKind::DeleteMode);
        self.backend.focus_window(window);
    }

    /// Delete tab `index` of the current page by shifting later tabs left.
    ///
    /// The only tab of a page is never deleted; a close prompt is shown
    /// instead.
    pub fn delete_specific_tab(&mut self, window: WindowId, index: i64) -> Result<(), ShellError> {
        self.cancel_delete_mode(window);
        let state = self
            .windows
            .get(&window)
            .ok_or(ShellError::UnknownWindow(window))?;
        let page = state.current_page;
        let count = state.tab_count(page);
        let index = usize::try_from(index)
            .ok()
            .filter(|i| *i < count)
            .ok_or(ShellError::InvalidTabIndex {
                index: index.max(0) as usize,
                count,
            })?;

        let visible: Vec<_> = state
            .pool(page)
            .map(|p| p.visible(count).to_vec())
            .unwrap_or_default();
        if count == 1 {
            self.show_confirm_popup(window, page);
            return Ok(());
        }

        for i in index..count - 1 {
            let (Some(to), Some(from)) = (visible.get(i), visible.get(i + 1)) else {
                continue;
            };
            if let Some(url) = self.backend.current_url(*from) {
                self.load_address(*to, &url);
            }
        }
        if let Some(last) = visible.last() {
            self.backend.set_bounds(*last, Rect::ZERO);
        }

        if let Some(state) = self.windows.get_mut(&window) {
            state.set_tab_count(page, count - 1);
            if let Some(active) = state.active_tab.get_mut(&page) {
                if *active > index {
                    *active -= 1;
                }
                *active = (*active).min(count - 2);
            }
            if state.search.is_some_and(|t| t.page == page) {
                self.cleanup_search(window);
            }
        }
        tracing::debug!(window_id = window.0, page_id = page.0, index, "tab deleted");

        self.layout(window);
        self.refresh_header(window);
        self.request_save();
        Ok(())
    }
}
