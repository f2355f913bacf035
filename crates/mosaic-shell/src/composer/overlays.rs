//! Popup, search box and settings overlays, plus focus handling.

use std::collections::BTreeSet;
use std::time::Duration;

use mosaic_common::{ClickPoint, WindowId};
use mosaic_config::Settings;
use mosaic_platform::KeyCombo;
use mosaic_tiling::geometry::hit_test;

use crate::backend::{Backend, OverlayKind, OverlayLevel};
use crate::bridge::SEARCH_HIGHLIGHT_CSS;
use crate::messages::ChromeMessage;
use crate::scheduler::Task;
use crate::search::resolve_query;
use crate::window::SearchTarget;

use super::Shell;

impl<B: Backend> Shell<B> {
    pub(super) fn show_overlay(&mut self, window: WindowId, kind: OverlayKind, focus: bool) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        state.set_overlay_visible(kind, true);
        self.backend.show_overlay(window, kind, focus);
    }

    pub(super) fn hide_overlay(&mut self, window: WindowId, kind: OverlayKind) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        state.set_overlay_visible(kind, false);
        self.backend.hide_overlay(window, kind);
    }

    /// Show the popup overlay with `message`.
    pub(super) fn show_popup(&mut self, window: WindowId, message: ChromeMessage, interactive: bool) {
        if !self.windows.contains_key(&window) {
            return;
        }
        self.sync_overlays(window);
        self.backend
            .set_overlay_interactive(window, OverlayKind::Popup, interactive);
        self.show_overlay(window, OverlayKind::Popup, interactive);
        self.post_overlay(window, OverlayKind::Popup, message);
    }

    /// The popup page asks to take or release the pointer. Releasing also
    /// hides it and hands focus back to the main window.
    pub(super) fn set_popup_interactive(&mut self, window: WindowId, interactive: bool) {
        if !self.windows.contains_key(&window) {
            return;
        }
        self.backend
            .set_overlay_interactive(window, OverlayKind::Popup, interactive);
        if !interactive {
            self.hide_overlay(window, OverlayKind::Popup);
            self.backend.focus_window(window);
        }
    }

    // =========================================================================
    // Initial loader
    // =========================================================================

    /// Cover a new window until the current page's tabs finished loading,
    /// with a timed backstop.
    pub(super) fn show_initial_loader(&mut self, window: WindowId) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        let pending: BTreeSet<_> = state.visible_tabs().iter().copied().collect();
        state.loader = Some(pending);
        self.show_popup(window, ChromeMessage::ShowInitialLoader, false);
        let now = self.backend.now();
        self.scheduler.schedule_once(
            Task::HideLoader(window),
            now,
            self.config.timing.loader_timeout(),
        );
    }

    pub(super) fn hide_initial_loader(&mut self, window: WindowId) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        if state.loader.take().is_none() {
            return;
        }
        self.scheduler.cancel(Task::HideLoader(window));
        self.post_overlay(window, OverlayKind::Popup, ChromeMessage::HideInitialLoader);
        self.hide_overlay(window, OverlayKind::Popup);
        tracing::debug!(window_id = window.0, "initial loader hidden");
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Open the search box over the active tab (or the first tab).
    pub(super) fn open_search(&mut self, window: WindowId) {
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        if state.delete_mode {
            return;
        }
        let page = state.current_page;
        let slot = state.active_tab(page).unwrap_or(0);
        let surface = state.pool(page).and_then(|p| p.get(slot));
        let fullscreen = state.fullscreen;
        let previous_css = state.search.and_then(|t| t.css);
        let Some(surface) = surface else {
            return;
        };

        if let Some(old) = self.windows.get(&window).and_then(|s| s.search_surface()) {
            if let Some(key) = previous_css {
                self.backend.remove_css(old, key);
            }
        }
        let css = self.backend.insert_css(surface, SEARCH_HIGHLIGHT_CSS);
        if let Some(state) = self.windows.get_mut(&window) {
            state.search = Some(SearchTarget { page, slot, css });
        }

        let bounds = self.slot_rect(window, page, slot).unwrap_or_default();
        let current_url = self.backend.current_url(surface).unwrap_or_default();
        let level = if fullscreen {
            OverlayLevel::ScreenSaver
        } else {
            OverlayLevel::Floating
        };

        self.sync_overlays(window);
        self.backend
            .set_overlay_level(window, OverlayKind::SearchBox, level);
        self.backend
            .set_overlay_interactive(window, OverlayKind::SearchBox, true);
        self.show_overlay(window, OverlayKind::SearchBox, true);
        self.post_overlay(
            window,
            OverlayKind::SearchBox,
            ChromeMessage::ActivateSearch {
                bounds,
                current_url,
            },
        );
        tracing::debug!(window_id = window.0, page_id = page.0, slot, "search opened");
    }

    /// Load the resolved query into the search target (or the active tab).
    /// The search box stays open.
    pub(super) fn perform_search(&mut self, window: WindowId, query: &str) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        let target = state.search_surface().or_else(|| state.active_surface());
        let css = state.search.as_mut().and_then(|t| t.css.take());
        let Some(surface) = target else {
            return;
        };
        if let Some(key) = css {
            self.backend.remove_css(surface, key);
        }
        let Some(url) = resolve_query(query, &self.config.browser.search_url) else {
            return;
        };
        tracing::debug!(window_id = window.0, url = %url, "search");
        self.load_address(surface, &url);
    }

    /// Hide the search box and forget its target without moving focus.
    pub(super) fn cleanup_search(&mut self, window: WindowId) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        let target_surface = state.search_surface();
        let Some(target) = state.search.take() else {
            if state.overlay_visible(OverlayKind::SearchBox) {
                self.hide_overlay(window, OverlayKind::SearchBox);
            }
            return;
        };
        if let (Some(surface), Some(key)) = (target_surface, target.css) {
            self.backend.remove_css(surface, key);
        }
        self.hide_overlay(window, OverlayKind::SearchBox);
        self.backend
            .set_overlay_level(window, OverlayKind::SearchBox, OverlayLevel::Normal);
        self.backend
            .set_overlay_interactive(window, OverlayKind::SearchBox, false);
        self.sync_overlays(window);
    }

    /// Close the search box. A click that dismissed it is re-read as a tab
    /// selection.
    pub(super) fn close_search(&mut self, window: WindowId, click: Option<ClickPoint>) {
        let target = self.windows.get(&window).and_then(|s| s.search);
        self.cleanup_search(window);

        if let Some(click) = click {
            let rects = self.tab_rects(window);
            let page = self.windows.get(&window).map(|s| s.current_page);
            if let (Some(slot), Some(page)) = (hit_test(&rects, click.x, click.y), page) {
                let same = target.is_some_and(|t| t.page == page && t.slot == slot);
                if !same {
                    self.activate_tab(window, page, slot);
                }
            }
        }
        self.backend.focus_window(window);
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub(super) fn open_settings(&mut self, window: WindowId) {
        if !self.windows.contains_key(&window) {
            return;
        }
        self.cleanup_search(window);
        self.sync_overlays(window);
        self.backend
            .set_overlay_interactive(window, OverlayKind::Settings, true);
        self.show_overlay(window, OverlayKind::Settings, true);
        let settings = self.settings.clone();
        self.post_overlay(window, OverlayKind::Settings, ChromeMessage::SettingsData(settings));
    }

    /// Store settings submitted by the settings overlay. Conflicting
    /// hotkeys are cleared, bindings and layout are applied everywhere.
    pub(super) fn save_settings(&mut self, window: WindowId, payload: serde_json::Value) {
        let incoming: Settings = match serde_json::from_value(payload) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "rejected malformed settings");
                return;
            }
        };
        let mut stored = self
            .settings
            .accept_update_by(incoming, KeyCombo::canonical_accelerator);
        stored.migrate();
        self.apply_settings(stored);
        self.refresh_hotkey_state();
        tracing::info!(
            preset = self.settings.layout_preset.id(),
            default_tabs = self.settings.default_tabs,
            "settings saved"
        );

        for id in self.window_ids() {
            self.layout(id);
        }
        let settings = self.settings.clone();
        self.post_overlay(window, OverlayKind::Settings, ChromeMessage::SettingsData(settings));
        self.request_save();
    }

    pub(super) fn close_settings(&mut self, window: WindowId) {
        if !self.windows.contains_key(&window) {
            return;
        }
        self.backend
            .set_overlay_interactive(window, OverlayKind::Settings, false);
        self.hide_overlay(window, OverlayKind::Settings);
        self.backend.focus_window(window);
    }

    /// Fixed Escape binding: leave delete mode, else close the search box.
    pub(super) fn escape(&mut self, window: WindowId) {
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        if state.delete_mode {
            self.cancel_delete_mode(window);
        } else if state.search.is_some() || state.overlay_visible(OverlayKind::SearchBox) {
            self.close_search(window, None);
        }
    }

    // =========================================================================
    // Focus and hotkeys
    // =========================================================================

    /// A main window gained or lost OS focus.
    ///
    /// Losing focus is judged on the next tick, once the platform has
    /// settled who holds focus now.
    pub fn on_focus_changed(&mut self, window: WindowId, focused: bool) {
        if !self.windows.contains_key(&window) {
            return;
        }
        if focused {
            self.app_focused = true;
            self.refresh_hotkey_state();
        } else {
            let now = self.backend.now();
            self.scheduler
                .debounce(Task::FocusCheck(window), now, Duration::ZERO);
        }
    }

    pub(super) fn check_focus(&mut self, window: WindowId) {
        match self.backend.focus_owner() {
            None => {
                self.app_focused = false;
                self.refresh_hotkey_state();
                for id in self.window_ids() {
                    self.cleanup_search(id);
                }
            }
            Some(owner) if owner.window == window && owner.overlay == Some(OverlayKind::SearchBox) => {}
            Some(_) => {
                self.app_focused = true;
                self.refresh_hotkey_state();
                self.cleanup_search(window);
            }
        }
    }

    /// Binding capture in the settings overlay.
    pub(super) fn set_capture_suspended(&mut self, suspended: bool) {
        self.capture_suspended = suspended;
        self.refresh_hotkey_state();
    }

    pub(super) fn refresh_hotkey_state(&mut self) {
        if self.app_focused && !self.capture_suspended {
            self.hotkeys.resume();
        } else {
            self.hotkeys.suspend();
        }
    }
}
