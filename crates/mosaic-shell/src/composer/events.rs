//! Surface lifecycle callbacks.

use mosaic_common::types::zoom::zoom_factor;
use mosaic_common::SurfaceId;

use crate::backend::{Backend, SurfaceEvent, SurfaceRole};
use crate::bridge::{error_page_url, is_local_url, tab_bridge_script};

use super::Shell;

/// Error code reported when a navigation is superseded by a newer one.
const ERR_ABORTED: i32 = -3;

impl<B: Backend> Shell<B> {
    /// React to a load event from `surface`.
    pub fn on_surface_event(&mut self, surface: SurfaceId, event: SurfaceEvent) {
        let Some((window, role)) = self.surfaces.get(&surface).copied() else {
            return;
        };

        let (page, slot) = match role {
            SurfaceRole::Header => {
                if matches!(event, SurfaceEvent::LoadFinished { .. }) {
                    self.refresh_header(window);
                }
                return;
            }
            SurfaceRole::Tab { page, slot } => (page, slot),
        };

        match event {
            SurfaceEvent::LoadFailed {
                code,
                description,
                url,
                main_frame,
            } => {
                if !main_frame || code == ERR_ABORTED || is_local_url(&url) {
                    tracing::debug!(surface = surface.0, code, url = %url, "load failure ignored");
                    return;
                }
                tracing::warn!(surface = surface.0, code, url = %url, error = %description, "load failed");
                let error_url = error_page_url(code, &description, &url);
                self.load_address(surface, &error_url);
            }
            SurfaceEvent::LoadStarted { .. } | SurfaceEvent::Navigated { .. } => {
                self.backend.set_zoom(surface, zoom_factor(self.zoom));
            }
            SurfaceEvent::DomReady => {
                self.backend.set_zoom(surface, zoom_factor(self.zoom));
                self.backend
                    .eval_script(surface, &tab_bridge_script(page, slot));
            }
            SurfaceEvent::LoadFinished { .. } => {
                self.backend.set_zoom(surface, zoom_factor(self.zoom));
                self.backend
                    .eval_script(surface, &tab_bridge_script(page, slot));

                let done = match self.windows.get_mut(&window).and_then(|s| s.loader.as_mut()) {
                    Some(pending) => {
                        pending.remove(&surface);
                        pending.is_empty()
                    }
                    None => false,
                };
                if done {
                    self.hide_initial_loader(window);
                }
            }
        }
    }
}
