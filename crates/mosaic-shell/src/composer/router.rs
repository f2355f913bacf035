//! Action routing: chrome IPC, content bridges and hotkeys all end up in
//! [`Shell::dispatch`].

use mosaic_common::types::zoom::{clamp_zoom, zoom_factor, zoom_in, zoom_out};
use mosaic_common::types::MAX_TABS;
use mosaic_common::{Action, ShellError, SurfaceId, WindowId};
use mosaic_platform::KeyCombo;
use serde::Deserialize;
use serde_json::Value;

use crate::backend::{Backend, OverlayKind, SurfaceRole};
use crate::messages::ChromeMessage;

use super::Shell;

/// Who sent an IPC message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcSource {
    /// A header or tab surface.
    Surface(SurfaceId),
    /// One of a window's overlays.
    Overlay(WindowId, OverlayKind),
}

/// Keydown forwarded by a tab's content bridge.
#[derive(Debug, Deserialize)]
struct BridgeKey {
    key: String,
    #[serde(default)]
    ctrl: bool,
    #[serde(default)]
    alt: bool,
    #[serde(default)]
    shift: bool,
    #[serde(default)]
    meta: bool,
}

/// Tab content may only report clicks, request navigation and forward
/// keys.
fn allowed_from_tab(kind: &str) -> bool {
    matches!(kind, "tab-clicked" | "navigate-to" | "keydown")
}

impl<B: Backend> Shell<B> {
    /// Handle a `{kind, payload}` message from a chrome page or content
    /// bridge.
    pub fn handle_ipc(&mut self, source: IpcSource, kind: &str, payload: &Value) {
        let window = match source {
            IpcSource::Surface(surface) => match self.surfaces.get(&surface) {
                Some(&(window, SurfaceRole::Tab { page, slot })) => {
                    if !allowed_from_tab(kind) {
                        tracing::warn!(surface = surface.0, kind, "rejected IPC from tab content");
                        return;
                    }
                    // The click names the sender's own slot, whatever the
                    // page claims.
                    if kind == "tab-clicked" {
                        self.tab_clicked(window, page, slot);
                        return;
                    }
                    window
                }
                Some((window, SurfaceRole::Header)) => *window,
                None => {
                    tracing::debug!(surface = surface.0, kind, "IPC from unknown surface");
                    return;
                }
            },
            IpcSource::Overlay(window, _) => window,
        };

        if kind == "keydown" {
            match serde_json::from_value::<BridgeKey>(payload.clone()) {
                Ok(k) => {
                    let combo = KeyCombo::from_parts(k.ctrl, k.alt, k.shift, k.meta, &k.key);
                    self.handle_key(window, &combo);
                }
                Err(e) => tracing::debug!(error = %e, "malformed keydown"),
            }
            return;
        }

        match Action::from_ipc(kind, payload) {
            Some(action) => self.dispatch(window, action),
            None => tracing::warn!(kind, "unknown or malformed IPC message"),
        }
    }

    /// Look up a key press in the hotkey table. Returns true if it was
    /// bound.
    pub fn handle_key(&mut self, window: WindowId, combo: &KeyCombo) -> bool {
        match self.hotkeys.lookup(combo) {
            Some(action) => {
                tracing::debug!(window_id = window.0, action = action.label(), "hotkey");
                self.dispatch(window, action);
                true
            }
            None => false,
        }
    }

    /// Run one action on behalf of `window`.
    pub fn dispatch(&mut self, window: WindowId, action: Action) {
        let label = action.label();
        let result = match action {
            Action::CloseWindow => {
                self.close_window(window);
                Ok(())
            }
            Action::MinimizeWindow => {
                self.backend.minimize(window);
                Ok(())
            }
            Action::ToggleMaximize => {
                self.toggle_maximize(window);
                Ok(())
            }
            Action::ToggleFullscreen => {
                self.toggle_fullscreen(window);
                Ok(())
            }
            Action::NewWindow => self.open_window(None).map(|_| ()),
            Action::ZoomIn => {
                self.set_zoom(zoom_in(self.zoom));
                Ok(())
            }
            Action::ZoomOut => {
                self.set_zoom(zoom_out(self.zoom));
                Ok(())
            }

            Action::AddPage => {
                self.add_page();
                Ok(())
            }
            Action::SwitchPage(page) => {
                self.switch_page(window, page);
                Ok(())
            }
            Action::CyclePages => {
                self.cycle_pages(window);
                Ok(())
            }
            Action::RenamePage { page, name } => {
                self.rename_page(page, &name);
                Ok(())
            }
            Action::ReorderPages { source, target } => {
                self.reorder_pages(source, target);
                Ok(())
            }
            Action::ReorderPagesToIndex { source, index } => {
                self.reorder_pages_to_index(source, index);
                Ok(())
            }
            Action::ShowConfirmPopup(page) => {
                self.show_confirm_popup(window, page);
                Ok(())
            }
            Action::DeletePageFromPopup(page) => self.delete_page_from_popup(window, page),
            Action::ConfirmCloseApp(page) => {
                self.confirm_close_app(page);
                Ok(())
            }

            Action::AddTab { activate } => self.add_tab(window, activate),
            Action::EnterDeleteMode => {
                self.enter_delete_mode(window);
                Ok(())
            }
            Action::DeleteSpecificTab(index) => self.delete_specific_tab(window, index),
            Action::CancelDeleteMode => {
                self.cancel_delete_mode(window);
                Ok(())
            }
            Action::CycleTabs => {
                self.cycle_tabs(window);
                Ok(())
            }
            Action::TabClicked { page, tab } => {
                self.tab_clicked(window, page, tab);
                Ok(())
            }

            Action::OpenSearch => {
                self.open_search(window);
                Ok(())
            }
            Action::PerformSearch(query) => {
                self.perform_search(window, &query);
                Ok(())
            }
            Action::CloseSearch(click) => {
                self.close_search(window, click);
                Ok(())
            }
            Action::NavigateBack => {
                self.navigate_history(window, false);
                Ok(())
            }
            Action::NavigateForward => {
                self.navigate_history(window, true);
                Ok(())
            }
            Action::NavigateTo(url) => {
                self.navigate_to(window, &url);
                Ok(())
            }

            Action::OpenSettings => {
                self.open_settings(window);
                Ok(())
            }
            Action::SaveSettings(payload) => {
                self.save_settings(window, payload);
                Ok(())
            }
            Action::CloseSettings => {
                self.close_settings(window);
                Ok(())
            }
            Action::SuspendHotkeys => {
                self.set_capture_suspended(true);
                Ok(())
            }
            Action::ResumeHotkeys => {
                self.set_capture_suspended(false);
                Ok(())
            }
            Action::SetPopupInteractive(enable) => {
                self.set_popup_interactive(window, enable);
                Ok(())
            }
            Action::Escape => {
                self.escape(window);
                Ok(())
            }
            Action::None => Ok(()),
        };

        if let Err(e) = result {
            self.report(window, label, e);
        }
    }

    /// Errors the user caused get a popup; the rest are logged.
    fn report(&mut self, window: WindowId, action: &str, error: ShellError) {
        match error {
            ShellError::CapacityExceeded { .. } => {
                tracing::info!(window_id = window.0, action, "tab limit reached");
                let message = format!("Maximum {MAX_TABS} tabs allowed!");
                self.show_popup(window, ChromeMessage::ShowError(message), false);
            }
            ShellError::LastPage(page) => {
                self.show_popup(window, ChromeMessage::ShowConfirmClose(page), true);
            }
            other => {
                tracing::debug!(window_id = window.0, action, error = %other, "action failed");
            }
        }
    }

    /// Set the process-wide zoom and apply it to every tab surface.
    pub fn set_zoom(&mut self, level: u32) {
        let level = clamp_zoom(level);
        self.zoom = level;
        let factor = zoom_factor(level);
        let surfaces: Vec<_> = self
            .windows
            .values()
            .flat_map(|s| s.pools.values().flat_map(|p| p.slots().to_vec()))
            .collect();
        for surface in surfaces {
            self.backend.set_zoom(surface, factor);
        }
        for window in self.window_ids() {
            self.post_header(window, ChromeMessage::UpdateZoom(level));
        }
        self.request_save();
    }

    /// Back/forward on the search target, else the active tab.
    fn navigate_history(&mut self, window: WindowId, forward: bool) {
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        let Some(surface) = state.search_surface().or_else(|| state.active_surface()) else {
            return;
        };
        if forward && self.backend.can_go_forward(surface) {
            self.backend.go_forward(surface);
        } else if !forward && self.backend.can_go_back(surface) {
            self.backend.go_back(surface);
        }
    }

    /// Load `url` into the active tab of `window`.
    fn navigate_to(&mut self, window: WindowId, url: &str) {
        let Some(surface) = self.windows.get(&window).and_then(|s| s.active_surface()) else {
            return;
        };
        self.load_address(surface, url);
    }
}
