//! Recording [`Backend`] for unit tests.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use mosaic_common::{Rect, ShellError, SurfaceId, WindowId};

use crate::backend::{
    Backend, ChromeTarget, CssKey, FocusOwner, OverlayKind, OverlayLevel, SurfaceSpec,
    WindowGeometry,
};
use crate::messages::ChromeMessage;

#[derive(Debug, Clone)]
pub struct FakeOverlay {
    pub bounds: Rect,
    pub visible: bool,
    pub interactive: bool,
    pub level: OverlayLevel,
}

impl Default for FakeOverlay {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            visible: false,
            interactive: false,
            level: OverlayLevel::Normal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub geometry: WindowGeometry,
    pub size: (f64, f64),
    pub origin: (f64, f64),
    pub maximized: bool,
    pub fullscreen: bool,
    pub minimized: bool,
    /// Attached surfaces, bottom to top.
    pub stack: Vec<SurfaceId>,
    pub overlays: HashMap<OverlayKind, FakeOverlay>,
}

#[derive(Debug, Clone)]
pub struct FakeSurface {
    pub window: WindowId,
    pub spec: SurfaceSpec,
    pub bounds: Rect,
    pub zoom: f64,
    pub history: Vec<String>,
    pub position: usize,
    pub css: Vec<(CssKey, String)>,
    pub scripts: Vec<String>,
}

impl FakeSurface {
    pub fn url(&self) -> Option<&str> {
        self.history.get(self.position).map(String::as_str)
    }
}

pub struct FakeBackend {
    pub clock: Instant,
    pub windows: BTreeMap<WindowId, FakeWindow>,
    pub surfaces: HashMap<SurfaceId, FakeSurface>,
    pub destroyed: Vec<SurfaceId>,
    pub closed: Vec<WindowId>,
    pub posts: Vec<(WindowId, ChromeTarget, ChromeMessage)>,
    pub cleared: Vec<String>,
    pub focus: Option<FocusOwner>,
    pub focused_surface: Option<SurfaceId>,
    pub quit: bool,
    next_css: u64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            clock: Instant::now(),
            windows: BTreeMap::new(),
            surfaces: HashMap::new(),
            destroyed: Vec::new(),
            closed: Vec::new(),
            posts: Vec::new(),
            cleared: Vec::new(),
            focus: None,
            focused_surface: None,
            quit: false,
            next_css: 1,
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    pub fn surface(&self, id: SurfaceId) -> &FakeSurface {
        &self.surfaces[&id]
    }

    pub fn window(&self, id: WindowId) -> &FakeWindow {
        &self.windows[&id]
    }

    pub fn overlay(&self, window: WindowId, kind: OverlayKind) -> &FakeOverlay {
        &self.windows[&window].overlays[&kind]
    }

    /// Messages posted to `target` of `window`, oldest first.
    pub fn posted(&self, window: WindowId, target: ChromeTarget) -> Vec<&ChromeMessage> {
        self.posts
            .iter()
            .filter(|(w, t, _)| *w == window && *t == target)
            .map(|(_, _, m)| m)
            .collect()
    }

    pub fn clear_posts(&mut self) {
        self.posts.clear();
    }
}

impl Backend for FakeBackend {
    fn now(&self) -> Instant {
        self.clock
    }

    fn open_window(&mut self, window: WindowId, geometry: &WindowGeometry) -> Result<(), ShellError> {
        let overlays = OverlayKind::ALL
            .into_iter()
            .map(|k| (k, FakeOverlay::default()))
            .collect();
        self.windows.insert(
            window,
            FakeWindow {
                geometry: geometry.clone(),
                size: (geometry.width, geometry.height),
                origin: (100.0, 50.0),
                maximized: false,
                fullscreen: false,
                minimized: false,
                stack: Vec::new(),
                overlays,
            },
        );
        Ok(())
    }

    fn close_window(&mut self, window: WindowId) {
        self.windows.remove(&window);
        self.closed.push(window);
    }

    fn content_size(&self, window: WindowId) -> Option<(f64, f64)> {
        self.windows.get(&window).map(|w| w.size)
    }

    fn content_origin(&self, window: WindowId) -> Option<(f64, f64)> {
        self.windows.get(&window).map(|w| w.origin)
    }

    fn outer_bounds(&self, window: WindowId) -> Option<Rect> {
        self.windows
            .get(&window)
            .map(|w| Rect::new(w.origin.0, w.origin.1, w.size.0, w.size.1))
    }

    fn is_maximized(&self, window: WindowId) -> bool {
        self.windows.get(&window).is_some_and(|w| w.maximized)
    }

    fn is_fullscreen(&self, window: WindowId) -> bool {
        self.windows.get(&window).is_some_and(|w| w.fullscreen)
    }

    fn set_maximized(&mut self, window: WindowId, maximized: bool) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.maximized = maximized;
        }
    }

    fn set_fullscreen(&mut self, window: WindowId, fullscreen: bool) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.fullscreen = fullscreen;
        }
    }

    fn minimize(&mut self, window: WindowId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.minimized = true;
        }
    }

    fn focus_window(&mut self, window: WindowId) {
        if self.windows.contains_key(&window) {
            self.focus = Some(FocusOwner {
                window,
                overlay: None,
            });
        }
    }

    fn focus_owner(&self) -> Option<FocusOwner> {
        self.focus
    }

    fn create_surface(
        &mut self,
        window: WindowId,
        surface: SurfaceId,
        spec: &SurfaceSpec,
    ) -> Result<(), ShellError> {
        let history = spec.url.iter().cloned().collect();
        self.surfaces.insert(
            surface,
            FakeSurface {
                window,
                spec: spec.clone(),
                bounds: Rect::ZERO,
                zoom: 1.0,
                history,
                position: 0,
                css: Vec::new(),
                scripts: Vec::new(),
            },
        );
        Ok(())
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface).is_some() {
            self.destroyed.push(surface);
        }
        for w in self.windows.values_mut() {
            w.stack.retain(|s| *s != surface);
        }
    }

    fn attach(&mut self, window: WindowId, surface: SurfaceId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.stack.retain(|s| *s != surface);
            w.stack.push(surface);
        }
    }

    fn detach(&mut self, window: WindowId, surface: SurfaceId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.stack.retain(|s| *s != surface);
        }
    }

    fn set_bounds(&mut self, surface: SurfaceId, bounds: Rect) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.bounds = bounds;
        }
    }

    fn load_url(&mut self, surface: SurfaceId, url: &str) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            if !s.history.is_empty() {
                s.history.truncate(s.position + 1);
            }
            s.history.push(url.to_string());
            s.position = s.history.len() - 1;
        }
    }

    fn current_url(&self, surface: SurfaceId) -> Option<String> {
        self.surfaces
            .get(&surface)
            .and_then(|s| s.url().map(str::to_string))
    }

    fn set_zoom(&mut self, surface: SurfaceId, factor: f64) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.zoom = factor;
        }
    }

    fn can_go_back(&self, surface: SurfaceId) -> bool {
        self.surfaces.get(&surface).is_some_and(|s| s.position > 0)
    }

    fn can_go_forward(&self, surface: SurfaceId) -> bool {
        self.surfaces
            .get(&surface)
            .is_some_and(|s| s.position + 1 < s.history.len())
    }

    fn go_back(&mut self, surface: SurfaceId) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.position = s.position.saturating_sub(1);
        }
    }

    fn go_forward(&mut self, surface: SurfaceId) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            if s.position + 1 < s.history.len() {
                s.position += 1;
            }
        }
    }

    fn eval_script(&mut self, surface: SurfaceId, script: &str) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.scripts.push(script.to_string());
        }
    }

    fn insert_css(&mut self, surface: SurfaceId, css: &str) -> Option<CssKey> {
        let s = self.surfaces.get_mut(&surface)?;
        let key = CssKey(self.next_css);
        self.next_css += 1;
        s.css.push((key, css.to_string()));
        Some(key)
    }

    fn remove_css(&mut self, surface: SurfaceId, key: CssKey) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.css.retain(|(k, _)| *k != key);
        }
    }

    fn focus_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.contains_key(&surface) {
            self.focused_surface = Some(surface);
        }
    }

    fn clear_partition(&mut self, partition: &str) {
        self.cleared.push(partition.to_string());
    }

    fn set_overlay_bounds(&mut self, window: WindowId, overlay: OverlayKind, bounds: Rect) {
        if let Some(o) = self.overlay_mut(window, overlay) {
            o.bounds = bounds;
        }
    }

    fn show_overlay(&mut self, window: WindowId, overlay: OverlayKind, focus: bool) {
        if let Some(o) = self.overlay_mut(window, overlay) {
            o.visible = true;
        }
        if focus && self.windows.contains_key(&window) {
            self.focus = Some(FocusOwner {
                window,
                overlay: Some(overlay),
            });
        }
    }

    fn hide_overlay(&mut self, window: WindowId, overlay: OverlayKind) {
        if let Some(o) = self.overlay_mut(window, overlay) {
            o.visible = false;
        }
    }

    fn set_overlay_interactive(&mut self, window: WindowId, overlay: OverlayKind, interactive: bool) {
        if let Some(o) = self.overlay_mut(window, overlay) {
            o.interactive = interactive;
        }
    }

    fn set_overlay_level(&mut self, window: WindowId, overlay: OverlayKind, level: OverlayLevel) {
        if let Some(o) = self.overlay_mut(window, overlay) {
            o.level = level;
        }
    }

    fn post(&mut self, window: WindowId, target: ChromeTarget, message: &ChromeMessage) {
        if self.windows.contains_key(&window) {
            self.posts.push((window, target, message.clone()));
        }
    }

    fn quit(&mut self) {
        self.quit = true;
    }
}

impl FakeBackend {
    fn overlay_mut(&mut self, window: WindowId, kind: OverlayKind) -> Option<&mut FakeOverlay> {
        self.windows.get_mut(&window)?.overlays.get_mut(&kind)
    }
}
