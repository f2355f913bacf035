//! The seam between the shell core and the windowing / web engine.
//!
//! The shell never touches a real window. Everything it needs from the
//! platform goes through [`Backend`]; the application implements it on top
//! of winit and wry, and the unit tests use a recording fake.

use std::time::Instant;

use mosaic_common::{PageId, Rect, ShellError, SurfaceId, WindowId};

use crate::messages::ChromeMessage;

/// The four borderless overlay windows pinned to every main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlayKind {
    Popup,
    DeleteMode,
    SearchBox,
    Settings,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 4] = [
        OverlayKind::Popup,
        OverlayKind::DeleteMode,
        OverlayKind::SearchBox,
        OverlayKind::Settings,
    ];

    /// Chrome page loaded into the overlay.
    pub fn page(self) -> &'static str {
        match self {
            OverlayKind::Popup => "popup.html",
            OverlayKind::DeleteMode => "delete-mode.html",
            OverlayKind::SearchBox => "search-box.html",
            OverlayKind::Settings => "settings.html",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            OverlayKind::Popup => 0,
            OverlayKind::DeleteMode => 1,
            OverlayKind::SearchBox => 2,
            OverlayKind::Settings => 3,
        }
    }
}

/// Stacking level of an overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayLevel {
    /// Not kept above other windows.
    Normal,
    /// Above the parent window.
    Floating,
    /// Above fullscreen windows.
    ScreenSaver,
}

/// Receiver of a [`ChromeMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeTarget {
    Header,
    Overlay(OverlayKind),
}

/// What a surface is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    Header,
    Tab { page: PageId, slot: usize },
}

/// Creation parameters for a content surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpec {
    pub role: SurfaceRole,
    /// Storage partition; `None` for chrome surfaces.
    pub partition: Option<String>,
    /// Address loaded at creation. Tab slots start blank and are loaded
    /// when they become active.
    pub url: Option<String>,
    /// Script run at document start on every navigation.
    pub init_script: Option<String>,
}

/// Initial geometry of a main window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowGeometry {
    /// Saved outer bounds; `None` lets the platform place the window.
    pub bounds: Option<Rect>,
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub background: String,
}

/// Handle of a stylesheet inserted into a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CssKey(pub u64);

/// The window (and overlay, if any) currently holding OS focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOwner {
    pub window: WindowId,
    pub overlay: Option<OverlayKind>,
}

/// Lifecycle callbacks from a content surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    DomReady,
    LoadStarted { url: String },
    Navigated { url: String },
    LoadFinished { url: String },
    LoadFailed {
        code: i32,
        description: String,
        url: String,
        main_frame: bool,
    },
}

/// Platform services used by the shell.
///
/// Calls addressing a window, surface or overlay that no longer exists
/// must be silent no-ops.
pub trait Backend {
    /// Monotonic clock used by the scheduler.
    fn now(&self) -> Instant;

    // -- Main windows --

    fn open_window(&mut self, window: WindowId, geometry: &WindowGeometry)
        -> Result<(), ShellError>;
    fn close_window(&mut self, window: WindowId);
    /// Inner size of the window's content area.
    fn content_size(&self, window: WindowId) -> Option<(f64, f64)>;
    /// Screen position of the content area's top-left corner.
    fn content_origin(&self, window: WindowId) -> Option<(f64, f64)>;
    /// Outer bounds in screen coordinates, as persisted.
    fn outer_bounds(&self, window: WindowId) -> Option<Rect>;
    fn is_maximized(&self, window: WindowId) -> bool;
    fn is_fullscreen(&self, window: WindowId) -> bool;
    fn set_maximized(&mut self, window: WindowId, maximized: bool);
    fn set_fullscreen(&mut self, window: WindowId, fullscreen: bool);
    fn minimize(&mut self, window: WindowId);
    fn focus_window(&mut self, window: WindowId);
    fn focus_owner(&self) -> Option<FocusOwner>;

    // -- Content surfaces --

    fn create_surface(
        &mut self,
        window: WindowId,
        surface: SurfaceId,
        spec: &SurfaceSpec,
    ) -> Result<(), ShellError>;
    fn destroy_surface(&mut self, surface: SurfaceId);
    /// Add the surface on top of the window's surface stack.
    fn attach(&mut self, window: WindowId, surface: SurfaceId);
    fn detach(&mut self, window: WindowId, surface: SurfaceId);
    /// Bounds in window-content coordinates.
    fn set_bounds(&mut self, surface: SurfaceId, bounds: Rect);
    fn load_url(&mut self, surface: SurfaceId, url: &str);
    fn current_url(&self, surface: SurfaceId) -> Option<String>;
    fn set_zoom(&mut self, surface: SurfaceId, factor: f64);
    fn can_go_back(&self, surface: SurfaceId) -> bool;
    fn can_go_forward(&self, surface: SurfaceId) -> bool;
    fn go_back(&mut self, surface: SurfaceId);
    fn go_forward(&mut self, surface: SurfaceId);
    fn eval_script(&mut self, surface: SurfaceId, script: &str);
    fn insert_css(&mut self, surface: SurfaceId, css: &str) -> Option<CssKey>;
    fn remove_css(&mut self, surface: SurfaceId, key: CssKey);
    fn focus_surface(&mut self, surface: SurfaceId);
    /// Drop all storage and cache of a partition.
    fn clear_partition(&mut self, partition: &str);

    // -- Overlays --

    /// Bounds in screen coordinates.
    fn set_overlay_bounds(&mut self, window: WindowId, overlay: OverlayKind, bounds: Rect);
    fn show_overlay(&mut self, window: WindowId, overlay: OverlayKind, focus: bool);
    fn hide_overlay(&mut self, window: WindowId, overlay: OverlayKind);
    /// Whether the overlay receives pointer input or lets it fall through.
    fn set_overlay_interactive(&mut self, window: WindowId, overlay: OverlayKind, interactive: bool);
    fn set_overlay_level(&mut self, window: WindowId, overlay: OverlayKind, level: OverlayLevel);

    // -- Chrome --

    fn post(&mut self, window: WindowId, target: ChromeTarget, message: &ChromeMessage);
    fn quit(&mut self);
}
