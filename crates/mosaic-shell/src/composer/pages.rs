//! Page switching, creation, deletion and ordering.

use mosaic_common::{PageId, ShellError, WindowId};

use crate::backend::{Backend, OverlayKind};
use crate::messages::{ChromeMessage, HeaderState, PageEntry};

use super::Shell;

impl<B: Backend> Shell<B> {
    /// Page list as seen by `window` (with its tab counts).
    pub(super) fn page_entries(&self, window: WindowId) -> Vec<PageEntry> {
        let Some(state) = self.windows.get(&window) else {
            return Vec::new();
        };
        self.pages
            .iter()
            .map(|page| PageEntry::new(page, state.tab_count(page.id)))
            .collect()
    }

    pub(super) fn header_state(&self, window: WindowId) -> Option<HeaderState> {
        let state = self.windows.get(&window)?;
        Some(HeaderState {
            pages: self.page_entries(window),
            current_page: state.current_page,
            zoom_level: self.zoom,
            is_maximized: state.maximized,
        })
    }

    /// Push the full header state and tab state to one window.
    pub(super) fn refresh_header(&mut self, window: WindowId) {
        let Some(header) = self.header_state(window) else {
            return;
        };
        let has_active = self
            .windows
            .get(&window)
            .and_then(|s| s.active_tab(s.current_page))
            .is_some();
        self.post_header(window, ChromeMessage::UpdateState(header));
        self.post_header(window, ChromeMessage::UpdateTabState(has_active));
    }

    pub(super) fn refresh_all_headers(&mut self) {
        for window in self.window_ids() {
            self.refresh_header(window);
        }
    }

    /// Swap the attached surfaces of `window` to `page`: detach the old
    /// page, attach the new one, re-raise the header. No guards.
    pub(super) fn attach_page(&mut self, window: WindowId, page: PageId) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        let previous = state.current_page;
        state.current_page = page;
        let header = state.header;
        let old: Vec<_> = if previous != page {
            state
                .pool(previous)
                .map(|p| p.slots().to_vec())
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        let new: Vec<_> = state
            .pool(page)
            .map(|p| p.slots().to_vec())
            .unwrap_or_default();

        for surface in old {
            self.backend.detach(window, surface);
        }
        for surface in new {
            self.backend.attach(window, surface);
        }
        self.backend.detach(window, header);
        self.backend.attach(window, header);
    }

    /// Show `page` in `window`. No-op for the current or an unknown page.
    pub fn switch_page(&mut self, window: WindowId, page: PageId) {
        self.cleanup_search(window);
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        if state.current_page == page || !self.pages.contains(page) {
            return;
        }

        self.attach_page(window, page);
        let mut has_active = false;
        if let Some(state) = self.windows.get_mut(&window) {
            let count = state.tab_count(page);
            // A missing entry counts as out of range.
            let active = state.active_tab.entry(page).or_insert(0);
            if *active >= count {
                *active = 0;
            }
            has_active = count > 0;
        }
        tracing::debug!(window_id = window.0, page_id = page.0, "page switched");

        self.post_header(window, ChromeMessage::UpdateTabState(has_active));
        self.post_header(window, ChromeMessage::UpdateCurrentPage(page));
        self.schedule_layout(window);
        self.request_save();

        self.backend.focus_window(window);
        let active = self.windows.get(&window).and_then(|s| s.active_surface());
        if let Some(surface) = active {
            self.backend.focus_surface(surface);
        }
    }

    pub(super) fn cycle_pages(&mut self, window: WindowId) {
        let Some(current) = self.windows.get(&window).map(|s| s.current_page) else {
            return;
        };
        if let Some(next) = self.pages.next_after(current) {
            self.switch_page(window, next);
        }
    }

    /// Create a page with surfaces in every window. The new page is not
    /// switched to.
    pub fn add_page(&mut self) -> PageId {
        let page = self.pages.allocate().id;
        let count = self.settings.effective_default_tabs();
        let start = self.config.browser.start_page.clone();

        for window in self.window_ids() {
            if let Err(e) = self.ensure_surfaces(window, page) {
                tracing::warn!(window_id = window.0, page_id = page.0, error = %e, "failed to create tab surfaces");
                continue;
            }
            let visible: Vec<_> = match self.windows.get_mut(&window) {
                Some(state) => {
                    state.set_tab_count(page, count);
                    state.active_tab.remove(&page);
                    state
                        .pool(page)
                        .map(|p| p.visible(count).to_vec())
                        .unwrap_or_default()
                }
                None => continue,
            };
            for surface in visible {
                self.load_address(surface, &start);
            }
        }

        for window in self.window_ids() {
            let entries = self.page_entries(window);
            self.post_header(window, ChromeMessage::UpdatePages(entries));
        }
        self.request_save();
        tracing::info!(page_id = page.0, tabs = count, "page added");
        page
    }

    /// Delete `page` everywhere. The last page is refused.
    pub fn delete_page(&mut self, page: PageId) -> Result<(), ShellError> {
        let record = self.pages.remove(page)?;
        self.destroy_page_surfaces(page);
        self.backend.clear_partition(&record.session_id);

        let first = self.pages.first().ok_or(ShellError::LastPage(page))?;
        for window in self.window_ids() {
            let on_deleted = self
                .windows
                .get(&window)
                .is_some_and(|s| s.current_page == page);
            if on_deleted {
                self.cleanup_search(window);
                self.attach_page(window, first);
                self.schedule_layout(window);
            }
        }
        self.refresh_all_headers();
        self.request_save();
        tracing::info!(page_id = page.0, "page deleted");
        Ok(())
    }

    /// Confirmation prompt for deleting `page`: a close-app prompt when it
    /// is the only page.
    pub(super) fn show_confirm_popup(&mut self, window: WindowId, page: PageId) {
        let message = if self.pages.len() == 1 {
            ChromeMessage::ShowConfirmClose(page)
        } else {
            ChromeMessage::ShowConfirm(page)
        };
        self.show_popup(window, message, true);
    }

    pub(super) fn delete_page_from_popup(&mut self, window: WindowId, page: PageId) -> Result<(), ShellError> {
        self.delete_page(page)?;
        self.hide_overlay(window, OverlayKind::Popup);
        Ok(())
    }

    /// Remove `page` even if it is the last one, save, and quit.
    pub(super) fn confirm_close_app(&mut self, page: PageId) {
        if self.pages.contains(page) {
            self.destroy_page_surfaces(page);
            if let Some(record) = self.pages.discard(page) {
                self.backend.clear_partition(&record.session_id);
            }
        }
        self.save_now();
        tracing::info!(page_id = page.0, "closing application");
        self.backend.quit();
    }

    pub(super) fn rename_page(&mut self, page: PageId, name: &str) {
        if !self.pages.rename(page, name) {
            return;
        }
        self.refresh_all_headers();
        self.request_save();
    }

    pub(super) fn reorder_pages(&mut self, source: PageId, target: PageId) {
        if self.pages.reorder(source, target) {
            self.refresh_all_headers();
            self.request_save();
        }
    }

    pub(super) fn reorder_pages_to_index(&mut self, source: PageId, index: i64) {
        if self.pages.reorder_to_index(source, index) {
            self.refresh_all_headers();
            self.request_save();
        }
    }
}
