//! The shell [`Backend`](mosaic_shell::Backend) on top of winit windows and
//! wry webviews.
//!
//! winit only creates windows from inside the event loop, while the shell
//! opens them from arbitrary call sites. `open_window` therefore records the
//! window and everything later done to it; [`WinitBackend::realize`] builds
//! the real windows and views on the next pass through the loop. Until then
//! queries answer from the recorded geometry.

mod chrome;
mod seam;
mod surfaces;
mod windows;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use mosaic_common::{Rect, SurfaceId, WindowId};
use mosaic_shell::{CssKey, OverlayKind, OverlayLevel, WindowGeometry};
use mosaic_webview::{WebViewConfig, WebViewRegistry};
use winit::window::Window;

/// Overlay surfaces are numbered apart from the shell's surfaces.
const OVERLAY_SURFACE_BASE: u64 = 1 << 48;

/// What a winit window is to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTarget {
    pub window: WindowId,
    pub overlay: Option<OverlayKind>,
}

/// A main window and its four overlays.
struct MainWindow {
    window: Option<Arc<Window>>,
    geometry: WindowGeometry,
    want_maximized: bool,
    want_fullscreen: bool,
    /// Last state reported to the shell.
    maximized: bool,
    fullscreen: bool,
    header: Option<SurfaceId>,
    overlays: Vec<Overlay>,
}

struct Overlay {
    kind: OverlayKind,
    window: Option<Arc<Window>>,
    surface: SurfaceId,
    /// Screen coordinates.
    bounds: Rect,
    visible: bool,
    interactive: bool,
    level: OverlayLevel,
}

/// Desired state of a webview, realized or not.
struct SurfaceModel {
    window: WindowId,
    overlay: Option<OverlayKind>,
    config: WebViewConfig,
    bounds: Rect,
    visible: bool,
    zoom: f64,
    realized: bool,
    /// Present on chrome pages, which only take messages once loaded.
    chrome: Option<ChromeQueue>,
}

#[derive(Default)]
struct ChromeQueue {
    ready: bool,
    queued: Vec<String>,
}

pub struct WinitBackend {
    webviews: WebViewRegistry,
    windows: BTreeMap<WindowId, MainWindow>,
    surfaces: HashMap<SurfaceId, SurfaceModel>,
    targets: HashMap<winit::window::WindowId, WindowTarget>,
    focused: Option<winit::window::WindowId>,
    css: HashMap<CssKey, (SurfaceId, u64)>,
    next_css: u64,
    next_overlay_surface: u64,
    user_agent: Option<String>,
    quit: bool,
}

impl WinitBackend {
    pub fn new(webviews: WebViewRegistry, user_agent: Option<String>) -> Self {
        Self {
            webviews,
            windows: BTreeMap::new(),
            surfaces: HashMap::new(),
            targets: HashMap::new(),
            focused: None,
            css: HashMap::new(),
            next_css: 1,
            next_overlay_surface: OVERLAY_SURFACE_BASE,
            user_agent,
            quit: false,
        }
    }

    /// Whether the shell asked the application to exit.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Map a winit window to the main window (and overlay) it belongs to.
    pub fn target(&self, id: winit::window::WindowId) -> Option<WindowTarget> {
        self.targets.get(&id).copied()
    }

    /// The overlay an overlay surface belongs to.
    pub fn overlay_of(&self, surface: SurfaceId) -> Option<(WindowId, OverlayKind)> {
        let model = self.surfaces.get(&surface)?;
        model.overlay.map(|kind| (model.window, kind))
    }

    pub fn webviews_mut(&mut self) -> &mut WebViewRegistry {
        &mut self.webviews
    }

    /// Record OS focus changes of any of our windows.
    pub fn set_focused(&mut self, id: winit::window::WindowId, focused: bool) {
        if focused {
            self.focused = Some(id);
        } else if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Destroy every view and window. Used during shutdown.
    pub fn destroy_all(&mut self) {
        self.webviews.destroy_all();
        self.surfaces.clear();
        self.css.clear();
        self.targets.clear();
        self.windows.clear();
    }

    fn alloc_overlay_surface(&mut self) -> SurfaceId {
        let id = SurfaceId(self.next_overlay_surface);
        self.next_overlay_surface += 1;
        id
    }

    fn main_window(&self, window: WindowId) -> Option<&Arc<Window>> {
        self.windows.get(&window)?.window.as_ref()
    }

    fn overlay(&self, window: WindowId, kind: OverlayKind) -> Option<&Overlay> {
        self.windows
            .get(&window)?
            .overlays
            .iter()
            .find(|o| o.kind == kind)
    }

    fn overlay_mut(&mut self, window: WindowId, kind: OverlayKind) -> Option<&mut Overlay> {
        self.windows
            .get_mut(&window)?
            .overlays
            .iter_mut()
            .find(|o| o.kind == kind)
    }
}
