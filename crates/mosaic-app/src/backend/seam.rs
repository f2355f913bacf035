use std::time::Instant;

use mosaic_common::{Rect, ShellError, SurfaceId, WindowId};
use mosaic_shell::{
    Backend, ChromeMessage, ChromeTarget, CssKey, FocusOwner, OverlayKind, OverlayLevel,
    SurfaceSpec, WindowGeometry,
};

use super::WinitBackend;

impl Backend for WinitBackend {
    fn now(&self) -> Instant {
        Instant::now()
    }

    // -- Main windows --

    fn open_window(&mut self, window: WindowId, geometry: &WindowGeometry) -> Result<(), ShellError> {
        self.record_window(window, geometry)
    }

    fn close_window(&mut self, window: WindowId) {
        self.drop_window(window);
    }

    fn content_size(&self, window: WindowId) -> Option<(f64, f64)> {
        self.window_content(window).map(|r| (r.width, r.height))
    }

    fn content_origin(&self, window: WindowId) -> Option<(f64, f64)> {
        self.window_content(window).map(|r| (r.x, r.y))
    }

    fn outer_bounds(&self, window: WindowId) -> Option<Rect> {
        self.window_outer(window)
    }

    fn is_maximized(&self, window: WindowId) -> bool {
        self.window_maximized(window)
    }

    fn is_fullscreen(&self, window: WindowId) -> bool {
        self.window_fullscreen(window)
    }

    fn set_maximized(&mut self, window: WindowId, maximized: bool) {
        self.apply_maximized(window, maximized);
    }

    fn set_fullscreen(&mut self, window: WindowId, fullscreen: bool) {
        self.apply_fullscreen(window, fullscreen);
    }

    fn minimize(&mut self, window: WindowId) {
        self.minimize_window(window);
    }

    fn focus_window(&mut self, window: WindowId) {
        self.focus_main(window);
    }

    fn focus_owner(&self) -> Option<FocusOwner> {
        self.current_focus()
    }

    // -- Content surfaces --

    fn create_surface(
        &mut self,
        window: WindowId,
        surface: SurfaceId,
        spec: &SurfaceSpec,
    ) -> Result<(), ShellError> {
        self.record_surface(window, surface, spec)
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.drop_surface(surface);
    }

    fn attach(&mut self, _window: WindowId, surface: SurfaceId) {
        self.set_visible(surface, true);
    }

    fn detach(&mut self, _window: WindowId, surface: SurfaceId) {
        self.set_visible(surface, false);
    }

    fn set_bounds(&mut self, surface: SurfaceId, bounds: Rect) {
        self.place(surface, bounds);
    }

    fn load_url(&mut self, surface: SurfaceId, url: &str) {
        self.navigate(surface, url);
    }

    fn current_url(&self, surface: SurfaceId) -> Option<String> {
        self.surface_url(surface)
    }

    fn set_zoom(&mut self, surface: SurfaceId, factor: f64) {
        self.apply_zoom(surface, factor);
    }

    fn can_go_back(&self, surface: SurfaceId) -> bool {
        self.webviews.get(surface).is_some_and(|h| h.can_go_back())
    }

    fn can_go_forward(&self, surface: SurfaceId) -> bool {
        self.webviews.get(surface).is_some_and(|h| h.can_go_forward())
    }

    fn go_back(&mut self, surface: SurfaceId) {
        self.history_step(surface, true);
    }

    fn go_forward(&mut self, surface: SurfaceId) {
        self.history_step(surface, false);
    }

    fn eval_script(&mut self, surface: SurfaceId, script: &str) {
        self.run_script(surface, script);
    }

    fn insert_css(&mut self, surface: SurfaceId, css: &str) -> Option<CssKey> {
        self.add_css(surface, css)
    }

    fn remove_css(&mut self, surface: SurfaceId, key: CssKey) {
        self.drop_css(surface, key);
    }

    fn focus_surface(&mut self, surface: SurfaceId) {
        self.focus_view(surface);
    }

    fn clear_partition(&mut self, partition: &str) {
        self.wipe_partition(partition);
    }

    // -- Overlays --

    fn set_overlay_bounds(&mut self, window: WindowId, overlay: OverlayKind, bounds: Rect) {
        self.place_overlay(window, overlay, bounds);
    }

    fn show_overlay(&mut self, window: WindowId, overlay: OverlayKind, focus: bool) {
        self.show(window, overlay, focus);
    }

    fn hide_overlay(&mut self, window: WindowId, overlay: OverlayKind) {
        self.hide(window, overlay);
    }

    fn set_overlay_interactive(&mut self, window: WindowId, overlay: OverlayKind, interactive: bool) {
        self.set_interactive(window, overlay, interactive);
    }

    fn set_overlay_level(&mut self, window: WindowId, overlay: OverlayKind, level: OverlayLevel) {
        self.set_level(window, overlay, level);
    }

    // -- Chrome --

    fn post(&mut self, window: WindowId, target: ChromeTarget, message: &ChromeMessage) {
        self.deliver(window, target, message);
    }

    fn quit(&mut self) {
        tracing::info!("quit requested");
        self.quit = true;
    }
}
