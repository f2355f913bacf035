//! Main windows, overlay windows, and their realization.

use std::sync::Arc;

use mosaic_common::{Rect, ShellError, WindowId};
use mosaic_shell::bridge::chrome_url;
use mosaic_shell::{FocusOwner, OverlayKind, OverlayLevel, WindowGeometry};
use mosaic_webview::WebViewConfig;
use tracing::{debug, error, info, warn};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes, WindowLevel};

use super::{ChromeQueue, MainWindow, Overlay, SurfaceModel, WindowTarget, WinitBackend};

const MIN_WIDTH: f64 = 480.0;
const MIN_HEIGHT: f64 = 320.0;

pub(super) fn window_level(level: OverlayLevel) -> WindowLevel {
    match level {
        OverlayLevel::Normal => WindowLevel::Normal,
        OverlayLevel::Floating | OverlayLevel::ScreenSaver => WindowLevel::AlwaysOnTop,
    }
}

/// Logical position and size of a window's content area.
fn content_rect(window: &Window) -> Option<Rect> {
    let scale = window.scale_factor();
    let origin = window.inner_position().ok()?.to_logical::<f64>(scale);
    let size = window.inner_size().to_logical::<f64>(scale);
    Some(Rect::new(origin.x, origin.y, size.width, size.height))
}

impl WinitBackend {
    // =========================================================================
    // Recording
    // =========================================================================

    pub(super) fn record_window(
        &mut self,
        id: WindowId,
        geometry: &WindowGeometry,
    ) -> Result<(), ShellError> {
        if self.windows.contains_key(&id) {
            return Err(ShellError::Backend(format!("{id} already exists")));
        }
        let mut overlays = Vec::with_capacity(OverlayKind::ALL.len());
        for kind in OverlayKind::ALL {
            let surface = self.alloc_overlay_surface();
            self.surfaces.insert(
                surface,
                SurfaceModel {
                    window: id,
                    overlay: Some(kind),
                    config: WebViewConfig::chrome(chrome_url(kind.page())),
                    bounds: Rect::ZERO,
                    visible: true,
                    zoom: 1.0,
                    realized: false,
                    chrome: Some(ChromeQueue::default()),
                },
            );
            overlays.push(Overlay {
                kind,
                window: None,
                surface,
                bounds: Rect::ZERO,
                visible: false,
                interactive: false,
                level: OverlayLevel::Floating,
            });
        }
        self.windows.insert(
            id,
            MainWindow {
                window: None,
                geometry: geometry.clone(),
                want_maximized: false,
                want_fullscreen: false,
                maximized: false,
                fullscreen: false,
                header: None,
                overlays,
            },
        );
        debug!(window_id = id.0, "window recorded");
        Ok(())
    }

    pub(super) fn drop_window(&mut self, id: WindowId) {
        let Some(main) = self.windows.remove(&id) else {
            return;
        };
        for overlay in &main.overlays {
            self.webviews.destroy(overlay.surface);
            self.surfaces.remove(&overlay.surface);
        }
        let owned: Vec<_> = self
            .surfaces
            .iter()
            .filter(|(_, m)| m.window == id)
            .map(|(s, _)| *s)
            .collect();
        for surface in owned {
            self.webviews.destroy(surface);
            self.surfaces.remove(&surface);
        }
        self.css.retain(|_, (surface, _)| self.surfaces.contains_key(surface));
        self.targets.retain(|_, target| target.window != id);
        // Dropping the Arc<Window>s closes the OS windows.
        debug!(window_id = id.0, "window dropped");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub(super) fn window_content(&self, id: WindowId) -> Option<Rect> {
        let main = self.windows.get(&id)?;
        match &main.window {
            Some(window) => content_rect(window),
            None => {
                let g = &main.geometry;
                Some(match g.bounds {
                    Some(b) => b,
                    None => Rect::new(0.0, 0.0, g.width, g.height),
                })
            }
        }
    }

    pub(super) fn window_outer(&self, id: WindowId) -> Option<Rect> {
        let main = self.windows.get(&id)?;
        let Some(window) = &main.window else {
            return main.geometry.bounds;
        };
        let scale = window.scale_factor();
        let position = window.outer_position().ok()?.to_logical::<f64>(scale);
        let size = window.outer_size().to_logical::<f64>(scale);
        Some(Rect::new(position.x, position.y, size.width, size.height))
    }

    pub(super) fn window_maximized(&self, id: WindowId) -> bool {
        match self.windows.get(&id) {
            Some(MainWindow {
                window: Some(w), ..
            }) => w.is_maximized(),
            Some(main) => main.want_maximized,
            None => false,
        }
    }

    pub(super) fn window_fullscreen(&self, id: WindowId) -> bool {
        match self.windows.get(&id) {
            Some(MainWindow {
                window: Some(w), ..
            }) => w.fullscreen().is_some(),
            Some(main) => main.want_fullscreen,
            None => false,
        }
    }

    pub(super) fn current_focus(&self) -> Option<FocusOwner> {
        let target = self.target(self.focused?)?;
        Some(FocusOwner {
            window: target.window,
            overlay: target.overlay,
        })
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub(super) fn apply_maximized(&mut self, id: WindowId, maximized: bool) {
        let Some(main) = self.windows.get_mut(&id) else {
            return;
        };
        main.want_maximized = maximized;
        main.maximized = maximized;
        if let Some(window) = &main.window {
            window.set_maximized(maximized);
        }
    }

    pub(super) fn apply_fullscreen(&mut self, id: WindowId, fullscreen: bool) {
        let Some(main) = self.windows.get_mut(&id) else {
            return;
        };
        main.want_fullscreen = fullscreen;
        main.fullscreen = fullscreen;
        if let Some(window) = &main.window {
            window.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
        }
    }

    pub(super) fn minimize_window(&mut self, id: WindowId) {
        if let Some(window) = self.main_window(id) {
            window.set_minimized(true);
        }
    }

    pub(super) fn focus_main(&mut self, id: WindowId) {
        if let Some(window) = self.main_window(id) {
            window.focus_window();
        }
        let header = self.windows.get(&id).and_then(|m| m.header);
        if let Some(handle) = header.and_then(|s| self.webviews.get(s)) {
            if let Err(e) = handle.focus_parent() {
                debug!(window_id = id.0, error = %e, "focus_parent failed");
            }
        }
    }

    /// Compare the live maximize/fullscreen state with what the shell was
    /// last told. Returns the changes to report.
    pub fn poll_window_state(&mut self, id: WindowId) -> (Option<bool>, Option<bool>) {
        let Some(main) = self.windows.get_mut(&id) else {
            return (None, None);
        };
        let Some(window) = &main.window else {
            return (None, None);
        };
        let maximized = window.is_maximized();
        let fullscreen = window.fullscreen().is_some();
        let max_change = (maximized != main.maximized).then_some(maximized);
        let full_change = (fullscreen != main.fullscreen).then_some(fullscreen);
        main.maximized = maximized;
        main.fullscreen = fullscreen;
        (max_change, full_change)
    }

    // =========================================================================
    // Realization
    // =========================================================================

    /// Build every recorded window that does not exist yet, with its
    /// overlays and views.
    pub fn realize(&mut self, event_loop: &ActiveEventLoop) {
        let pending: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|(_, main)| main.window.is_none())
            .map(|(id, _)| *id)
            .collect();
        for id in pending {
            if let Err(e) = self.realize_window(event_loop, id) {
                error!(window_id = id.0, error = %e, "failed to create window");
            }
        }
    }

    fn realize_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        id: WindowId,
    ) -> Result<(), winit::error::OsError> {
        let Some(main) = self.windows.get(&id) else {
            return Ok(());
        };
        let g = &main.geometry;
        let (width, height) = match g.bounds {
            Some(b) => (b.width, b.height),
            None => (g.width, g.height),
        };
        let mut attrs = WindowAttributes::default()
            .with_title(g.title.clone())
            .with_inner_size(LogicalSize::new(width, height))
            .with_min_inner_size(LogicalSize::new(MIN_WIDTH, MIN_HEIGHT))
            .with_maximized(main.want_maximized);
        if let Some(b) = g.bounds {
            attrs = attrs.with_position(LogicalPosition::new(b.x, b.y));
        }
        if main.want_fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = Arc::new(event_loop.create_window(attrs)?);
        self.targets.insert(
            window.id(),
            WindowTarget {
                window: id,
                overlay: None,
            },
        );

        let mut overlay_windows = Vec::new();
        if let Some(main) = self.windows.get(&id) {
            for overlay in &main.overlays {
                let attrs = WindowAttributes::default()
                    .with_title(format!("{} {:?}", main.geometry.title, overlay.kind))
                    .with_decorations(false)
                    .with_transparent(true)
                    .with_resizable(false)
                    .with_visible(overlay.visible)
                    .with_window_level(window_level(overlay.level))
                    .with_inner_size(LogicalSize::new(
                        overlay.bounds.width.max(1.0),
                        overlay.bounds.height.max(1.0),
                    ))
                    .with_position(LogicalPosition::new(overlay.bounds.x, overlay.bounds.y));
                match event_loop.create_window(attrs) {
                    Ok(w) => {
                        let w = Arc::new(w);
                        if let Err(e) = w.set_cursor_hittest(overlay.interactive) {
                            debug!(error = %e, "cursor hit-test not supported");
                        }
                        overlay_windows.push((overlay.kind, w));
                    }
                    Err(e) => warn!(window_id = id.0, overlay = ?overlay.kind, error = %e, "failed to create overlay"),
                }
            }
        }

        for (kind, w) in overlay_windows {
            self.targets.insert(
                w.id(),
                WindowTarget {
                    window: id,
                    overlay: Some(kind),
                },
            );
            if let Some(overlay) = self.overlay_mut(id, kind) {
                overlay.window = Some(w);
            }
        }
        if let Some(main) = self.windows.get_mut(&id) {
            main.maximized = window.is_maximized();
            main.fullscreen = window.fullscreen().is_some();
            main.window = Some(window);
        }

        self.realize_surfaces(id);
        info!(window_id = id.0, "window created");
        Ok(())
    }
}
