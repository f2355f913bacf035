//! Snapshot production and state-file writes.

use std::collections::BTreeMap;

use mosaic_config::state::save_snapshot;
use mosaic_config::{StateSnapshot, WindowSnapshot};

use crate::backend::Backend;
use crate::scheduler::Task;

use super::Shell;

impl<B: Backend> Shell<B> {
    /// Everything needed to rebuild the current session.
    pub fn snapshot(&self) -> StateSnapshot {
        let start = &self.config.browser.start_page;
        let windows = self
            .windows
            .values()
            .map(|state| {
                let mut page_tabs = BTreeMap::new();
                let mut tab_urls = BTreeMap::new();
                for page in self.pages.iter() {
                    let count = state.tab_count(page.id);
                    page_tabs.insert(page.id, count);
                    let urls = state
                        .pool(page.id)
                        .map(|pool| {
                            pool.visible(count)
                                .iter()
                                .map(|s| {
                                    self.backend
                                        .current_url(*s)
                                        .unwrap_or_else(|| start.clone())
                                })
                                .collect()
                        })
                        .unwrap_or_default();
                    tab_urls.insert(page.id, urls);
                }
                WindowSnapshot {
                    bounds: self.backend.outer_bounds(state.id),
                    is_maximized: state.maximized,
                    is_full_screen: state.fullscreen,
                    current_page: Some(state.current_page),
                    page_tabs,
                    tab_urls,
                }
            })
            .collect();

        StateSnapshot {
            pages: self.pages.iter().cloned().collect(),
            next_page_id: Some(self.pages.next_id()),
            deleted_page_numbers: self.pages.freed().to_vec(),
            global_zoom_level: self.zoom,
            settings: Some(self.settings.clone()),
            windows,
        }
    }

    /// Write the state file now. Skipped with no open windows.
    pub fn save_now(&mut self) {
        self.scheduler.cancel(Task::Save);
        if self.windows.is_empty() {
            tracing::debug!("no open windows, save skipped");
            return;
        }
        let Some(path) = self.state_path.clone() else {
            return;
        };
        if let Err(e) = save_snapshot(&path, &self.snapshot()) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save state");
        }
    }

    /// Coalesce a save into the trailing debounce window.
    pub fn request_save(&mut self) {
        let now = self.backend.now();
        self.scheduler
            .debounce(Task::Save, now, self.config.timing.save_debounce());
    }
}
