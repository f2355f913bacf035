//! Overlay windows and message delivery to chrome pages.

use mosaic_common::{Rect, SurfaceId, WindowId};
use mosaic_shell::{ChromeMessage, ChromeTarget, OverlayKind, OverlayLevel};
use mosaic_webview::ipc::js_dispatch_message;
use mosaic_webview::{PageLoadState, WebViewEvent};
use tracing::debug;
use winit::dpi::{LogicalPosition, LogicalSize};

use super::windows::window_level;
use super::WinitBackend;

impl WinitBackend {
    // =========================================================================
    // Overlays
    // =========================================================================

    pub(super) fn place_overlay(&mut self, window: WindowId, kind: OverlayKind, bounds: Rect) {
        let Some(overlay) = self.overlay_mut(window, kind) else {
            return;
        };
        overlay.bounds = bounds;
        let surface = overlay.surface;
        if let Some(w) = &overlay.window {
            w.set_outer_position(LogicalPosition::new(bounds.x, bounds.y));
            let _ = w.request_inner_size(LogicalSize::new(
                bounds.width.max(1.0),
                bounds.height.max(1.0),
            ));
        }
        // The chrome page fills its overlay.
        self.place(surface, Rect::new(0.0, 0.0, bounds.width, bounds.height));
    }

    pub(super) fn show(&mut self, window: WindowId, kind: OverlayKind, focus: bool) {
        let Some(overlay) = self.overlay_mut(window, kind) else {
            return;
        };
        overlay.visible = true;
        let surface = overlay.surface;
        if let Some(w) = &overlay.window {
            w.set_visible(true);
            if focus {
                w.focus_window();
            }
        }
        if focus {
            self.focus_view(surface);
        }
    }

    pub(super) fn hide(&mut self, window: WindowId, kind: OverlayKind) {
        let Some(overlay) = self.overlay_mut(window, kind) else {
            return;
        };
        overlay.visible = false;
        if let Some(w) = &overlay.window {
            w.set_visible(false);
        }
    }

    pub(super) fn set_interactive(&mut self, window: WindowId, kind: OverlayKind, interactive: bool) {
        let Some(overlay) = self.overlay_mut(window, kind) else {
            return;
        };
        overlay.interactive = interactive;
        if let Some(w) = &overlay.window {
            if let Err(e) = w.set_cursor_hittest(interactive) {
                debug!(window_id = window.0, overlay = ?kind, error = %e, "cursor hit-test not supported");
            }
        }
    }

    pub(super) fn set_level(&mut self, window: WindowId, kind: OverlayKind, level: OverlayLevel) {
        let Some(overlay) = self.overlay_mut(window, kind) else {
            return;
        };
        overlay.level = level;
        if let Some(w) = &overlay.window {
            w.set_window_level(window_level(level));
        }
    }

    // =========================================================================
    // Chrome messages
    // =========================================================================

    fn chrome_surface(&self, window: WindowId, target: ChromeTarget) -> Option<SurfaceId> {
        match target {
            ChromeTarget::Header => self.windows.get(&window)?.header,
            ChromeTarget::Overlay(kind) => Some(self.overlay(window, kind)?.surface),
        }
    }

    /// Deliver `message` now if the page has loaded, otherwise once it has.
    pub(super) fn deliver(&mut self, window: WindowId, target: ChromeTarget, message: &ChromeMessage) {
        let Some(surface) = self.chrome_surface(window, target) else {
            return;
        };
        let data = message
            .to_json()
            .get("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        let script = js_dispatch_message(message.channel(), &data);

        let ready = match self.surfaces.get_mut(&surface).and_then(|m| m.chrome.as_mut()) {
            Some(queue) if queue.ready => true,
            Some(queue) => {
                queue.queued.push(script.clone());
                false
            }
            None => return,
        };
        if ready {
            self.run_script(surface, &script);
        }
    }

    /// Track chrome page loads. Messages queued before a page finished
    /// loading are flushed to it.
    pub fn observe(&mut self, event: &WebViewEvent) {
        let WebViewEvent::PageLoad { surface, state, .. } = event else {
            return;
        };
        let Some(queue) = self
            .surfaces
            .get_mut(surface)
            .and_then(|m| m.chrome.as_mut())
        else {
            return;
        };
        match state {
            PageLoadState::Started => queue.ready = false,
            PageLoadState::Finished => {
                queue.ready = true;
                let queued = std::mem::take(&mut queue.queued);
                if !queued.is_empty() {
                    debug!(surface = surface.0, count = queued.len(), "flushing chrome messages");
                }
                for script in queued {
                    self.run_script(*surface, &script);
                }
            }
        }
    }
}
