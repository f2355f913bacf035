//! Content surfaces: one wry webview per shell surface.

use std::sync::Arc;

use mosaic_common::{Rect, ShellError, SurfaceId, WindowId};
use mosaic_shell::{CssKey, SurfaceRole, SurfaceSpec};
use mosaic_webview::WebViewConfig;
use tracing::{debug, warn};
use winit::window::Window;

use super::{ChromeQueue, SurfaceModel, WinitBackend};

impl WinitBackend {
    pub(super) fn record_surface(
        &mut self,
        window: WindowId,
        surface: SurfaceId,
        spec: &SurfaceSpec,
    ) -> Result<(), ShellError> {
        if !self.windows.contains_key(&window) {
            return Err(ShellError::UnknownWindow(window));
        }
        let (config, chrome, visible) = match spec.role {
            SurfaceRole::Header => {
                let url = spec.url.clone().unwrap_or_else(|| "about:blank".to_string());
                (WebViewConfig::chrome(url), Some(ChromeQueue::default()), true)
            }
            SurfaceRole::Tab { .. } => {
                let mut config = WebViewConfig {
                    url: spec.url.clone(),
                    partition: spec.partition.clone(),
                    user_agent: self.user_agent.clone(),
                    ..WebViewConfig::default()
                };
                if let Some(script) = &spec.init_script {
                    config = config.init_script(script.clone());
                }
                (config, None, false)
            }
        };
        if spec.role == SurfaceRole::Header {
            if let Some(main) = self.windows.get_mut(&window) {
                main.header = Some(surface);
            }
        }
        self.surfaces.insert(
            surface,
            SurfaceModel {
                window,
                overlay: None,
                config,
                bounds: Rect::ZERO,
                visible,
                zoom: 1.0,
                realized: false,
                chrome,
            },
        );

        let realized = self
            .windows
            .get(&window)
            .is_some_and(|main| main.window.is_some());
        if realized {
            self.realize_surface(surface)?;
        }
        Ok(())
    }

    /// Create the views of a freshly realized window.
    pub(super) fn realize_surfaces(&mut self, window: WindowId) {
        let mut pending: Vec<SurfaceId> = self
            .surfaces
            .iter()
            .filter(|(_, m)| m.window == window && !m.realized)
            .map(|(s, _)| *s)
            .collect();
        pending.sort();
        for surface in pending {
            if let Err(e) = self.realize_surface(surface) {
                warn!(surface = surface.0, error = %e, "failed to create view");
            }
        }
    }

    /// The window a surface's view is a child of.
    fn host(&self, model: &SurfaceModel) -> Option<Arc<Window>> {
        match model.overlay {
            Some(kind) => self.overlay(model.window, kind)?.window.clone(),
            None => self.main_window(model.window).cloned(),
        }
    }

    fn realize_surface(&mut self, surface: SurfaceId) -> Result<(), ShellError> {
        let Some(model) = self.surfaces.get(&surface) else {
            return Ok(());
        };
        let Some(host) = self.host(model) else {
            return Ok(());
        };
        let config = WebViewConfig {
            visible: model.visible,
            ..model.config.clone()
        };
        let (bounds, zoom) = (model.bounds, model.zoom);

        self.webviews
            .create(surface, host.as_ref(), bounds, config)
            .map_err(|e| ShellError::Backend(e.to_string()))?;
        if zoom != 1.0 {
            if let Some(handle) = self.webviews.get_mut(surface) {
                if let Err(e) = handle.set_zoom(zoom) {
                    debug!(surface = surface.0, error = %e, "zoom failed");
                }
            }
        }
        if let Some(model) = self.surfaces.get_mut(&surface) {
            model.realized = true;
        }
        Ok(())
    }

    pub(super) fn drop_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface).is_none() {
            return;
        }
        self.webviews.destroy(surface);
        self.css.retain(|_, (s, _)| *s != surface);
        for main in self.windows.values_mut() {
            if main.header == Some(surface) {
                main.header = None;
            }
        }
    }

    pub(super) fn set_visible(&mut self, surface: SurfaceId, visible: bool) {
        let Some(model) = self.surfaces.get_mut(&surface) else {
            return;
        };
        model.visible = visible;
        if let Some(handle) = self.webviews.get(surface) {
            if let Err(e) = handle.set_visible(visible) {
                debug!(surface = surface.0, error = %e, "set_visible failed");
            }
        }
    }

    pub(super) fn place(&mut self, surface: SurfaceId, bounds: Rect) {
        let Some(model) = self.surfaces.get_mut(&surface) else {
            return;
        };
        model.bounds = bounds;
        if let Some(handle) = self.webviews.get(surface) {
            if let Err(e) = handle.set_bounds(bounds) {
                debug!(surface = surface.0, error = %e, "set_bounds failed");
            }
        }
    }

    pub(super) fn navigate(&mut self, surface: SurfaceId, url: &str) {
        let Some(model) = self.surfaces.get_mut(&surface) else {
            return;
        };
        match self.webviews.get_mut(surface) {
            Some(handle) => {
                if let Err(e) = handle.load_url(url) {
                    warn!(surface = surface.0, url, error = %e, "load failed");
                }
            }
            None => model.config.url = Some(url.to_string()),
        }
    }

    pub(super) fn surface_url(&self, surface: SurfaceId) -> Option<String> {
        match self.webviews.get(surface) {
            Some(handle) => handle.current_url().map(str::to_string),
            None => self.surfaces.get(&surface)?.config.url.clone(),
        }
    }

    pub(super) fn apply_zoom(&mut self, surface: SurfaceId, factor: f64) {
        let Some(model) = self.surfaces.get_mut(&surface) else {
            return;
        };
        model.zoom = factor;
        if let Some(handle) = self.webviews.get_mut(surface) {
            if let Err(e) = handle.set_zoom(factor) {
                debug!(surface = surface.0, error = %e, "zoom failed");
            }
        }
    }

    pub(super) fn history_step(&mut self, surface: SurfaceId, back: bool) {
        let Some(handle) = self.webviews.get_mut(surface) else {
            return;
        };
        let result = if back {
            handle.go_back()
        } else {
            handle.go_forward()
        };
        if let Err(e) = result {
            warn!(surface = surface.0, error = %e, "history navigation failed");
        }
    }

    pub(super) fn run_script(&mut self, surface: SurfaceId, script: &str) {
        let Some(handle) = self.webviews.get(surface) else {
            debug!(surface = surface.0, "script dropped, no view");
            return;
        };
        if let Err(e) = handle.evaluate_script(script) {
            debug!(surface = surface.0, error = %e, "script failed");
        }
    }

    pub(super) fn add_css(&mut self, surface: SurfaceId, css: &str) -> Option<CssKey> {
        let handle = self.webviews.get_mut(surface)?;
        match handle.insert_css(css) {
            Ok(local) => {
                let key = CssKey(self.next_css);
                self.next_css += 1;
                self.css.insert(key, (surface, local));
                Some(key)
            }
            Err(e) => {
                debug!(surface = surface.0, error = %e, "insert_css failed");
                None
            }
        }
    }

    pub(super) fn drop_css(&mut self, surface: SurfaceId, key: CssKey) {
        let Some((owner, local)) = self.css.remove(&key) else {
            return;
        };
        if owner != surface {
            return;
        }
        if let Some(handle) = self.webviews.get(surface) {
            if let Err(e) = handle.remove_css(local) {
                debug!(surface = surface.0, error = %e, "remove_css failed");
            }
        }
    }

    pub(super) fn focus_view(&mut self, surface: SurfaceId) {
        if let Some(handle) = self.webviews.get(surface) {
            if let Err(e) = handle.focus() {
                debug!(surface = surface.0, error = %e, "focus failed");
            }
        }
    }

    pub(super) fn wipe_partition(&mut self, partition: &str) {
        if let Err(e) = self.webviews.clear_partition(partition) {
            warn!(partition, error = %e, "failed to clear partition");
        }
    }
}
