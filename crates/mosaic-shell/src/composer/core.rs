//! Shell struct, constructor, window and surface lifecycle.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Instant;

use mosaic_common::types::zoom::{clamp_zoom, zoom_factor, DEFAULT_ZOOM};
use mosaic_common::types::{FALLBACK_TAB_COUNT, MAX_TABS};
use mosaic_common::{PageId, ShellError, SurfaceId, WindowId};
use mosaic_config::{MosaicConfig, Settings, StateSnapshot, WindowSnapshot};
use mosaic_platform::HotkeyRegistry;
use mosaic_tiling::LayoutEngine;

use crate::backend::{
    Backend, ChromeTarget, OverlayKind, OverlayLevel, SurfaceRole, SurfaceSpec, WindowGeometry,
};
use crate::bridge::{chrome_url, tab_bridge_script};
use crate::messages::ChromeMessage;
use crate::pages::PageRegistry;
use crate::scheduler::{Scheduler, Task};
use crate::window::{SurfacePool, WindowState};

/// Process-wide shell state: pages, settings, zoom, and every open window.
pub struct Shell<B: Backend> {
    pub(super) backend: B,
    pub(super) config: MosaicConfig,
    pub(super) state_path: Option<PathBuf>,

    // Process-wide state
    pub(super) pages: PageRegistry,
    pub(super) settings: Settings,
    pub(super) zoom: u32,
    pub(super) engine: LayoutEngine,
    pub(super) hotkeys: HotkeyRegistry,

    // Windows and the surfaces they own
    pub(super) windows: BTreeMap<WindowId, WindowState>,
    pub(super) surfaces: HashMap<SurfaceId, (WindowId, SurfaceRole)>,

    pub(super) scheduler: Scheduler,

    // Hotkeys are live only while the app is focused and no binding is
    // being captured.
    pub(super) app_focused: bool,
    pub(super) capture_suspended: bool,

    next_window: u32,
    next_surface: u64,
}

impl<B: Backend> Shell<B> {
    /// A shell with default pages and settings and no windows. Call
    /// [`Shell::start`] to open windows.
    pub fn new(backend: B, config: MosaicConfig, state_path: Option<PathBuf>) -> Self {
        let settings = Settings::default();
        let engine = LayoutEngine::new(
            settings.layout_preset,
            f64::from(config.window.header_height),
        );
        let hotkeys = HotkeyRegistry::from_config(&settings.hotkeys);
        Self {
            backend,
            config,
            state_path,
            pages: PageRegistry::default(),
            settings,
            zoom: DEFAULT_ZOOM,
            engine,
            hotkeys,
            windows: BTreeMap::new(),
            surfaces: HashMap::new(),
            scheduler: Scheduler::new(),
            app_focused: true,
            capture_suspended: false,
            next_window: 1,
            next_surface: 1,
        }
    }

    /// Adopt a saved snapshot (if any) and open its windows, or one default
    /// window.
    pub fn start(&mut self, snapshot: Option<StateSnapshot>) -> Result<(), ShellError> {
        let windows = match snapshot {
            Some(snapshot) => self.adopt(snapshot),
            None => Vec::new(),
        };

        if windows.is_empty() {
            self.open_window(None)?;
        } else {
            for saved in &windows {
                if let Err(e) = self.open_window(Some(saved)) {
                    tracing::warn!(error = %e, "failed to restore window");
                }
            }
            if self.windows.is_empty() {
                self.open_window(None)?;
            }
        }

        let now = self.backend.now();
        self.scheduler
            .debounce(Task::Autosave, now, self.config.timing.autosave_interval());
        tracing::info!(
            windows = self.windows.len(),
            pages = self.pages.len(),
            zoom = self.zoom,
            "shell started"
        );
        Ok(())
    }

    /// Take over process-wide state from a snapshot. Returns the saved
    /// windows to reopen.
    fn adopt(&mut self, snapshot: StateSnapshot) -> Vec<WindowSnapshot> {
        let StateSnapshot {
            pages,
            next_page_id,
            deleted_page_numbers,
            global_zoom_level,
            settings,
            windows,
        } = snapshot;

        if let Some(registry) = PageRegistry::restore(pages, next_page_id, deleted_page_numbers) {
            self.pages = registry;
        }
        if global_zoom_level != 0 {
            self.zoom = clamp_zoom(global_zoom_level);
        }
        if let Some(mut settings) = settings {
            settings.migrate();
            self.apply_settings(settings);
        }
        windows
    }

    pub(super) fn apply_settings(&mut self, settings: Settings) {
        self.engine.preset = settings.layout_preset;
        self.hotkeys.rebind(&settings.hotkeys);
        self.settings = settings;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn hotkeys(&self) -> &HotkeyRegistry {
        &self.hotkeys
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowState> {
        self.windows.get(&id)
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn surface_owner(&self, surface: SurfaceId) -> Option<(WindowId, SurfaceRole)> {
        self.surfaces.get(&surface).copied()
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Open a main window, restoring geometry and tabs from `saved`.
    pub fn open_window(&mut self, saved: Option<&WindowSnapshot>) -> Result<WindowId, ShellError> {
        let first = self
            .pages
            .first()
            .ok_or_else(|| ShellError::Backend("no pages to show".into()))?;
        let id = WindowId(self.next_window);
        self.next_window += 1;

        let geometry = WindowGeometry {
            bounds: saved.and_then(|s| s.bounds),
            width: f64::from(self.config.window.width),
            height: f64::from(self.config.window.height),
            title: self.config.window.title.clone(),
            background: self.config.window.background.clone(),
        };
        self.backend.open_window(id, &geometry)?;

        let header = self.alloc_surface();
        let header_spec = SurfaceSpec {
            role: SurfaceRole::Header,
            partition: None,
            url: Some(chrome_url("header.html")),
            init_script: None,
        };
        if let Err(e) = self.backend.create_surface(id, header, &header_spec) {
            self.backend.close_window(id);
            return Err(e);
        }
        self.surfaces.insert(header, (id, SurfaceRole::Header));

        let current = saved
            .and_then(|s| s.current_page)
            .filter(|p| self.pages.contains(*p))
            .unwrap_or(first);
        let mut state = WindowState::new(id, header, current);
        for page in self.pages.ids() {
            let count = saved
                .and_then(|s| s.page_tabs.get(&page).copied())
                .unwrap_or(FALLBACK_TAB_COUNT);
            state.set_tab_count(page, count);
        }
        self.windows.insert(id, state);

        for kind in OverlayKind::ALL {
            self.backend.set_overlay_interactive(id, kind, false);
            self.backend.set_overlay_level(id, kind, OverlayLevel::Floating);
        }

        for page in self.pages.ids() {
            if let Err(e) = self.ensure_surfaces(id, page) {
                tracing::warn!(window_id = id.0, page_id = page.0, error = %e, "failed to create tab surfaces");
            }
        }

        self.attach_page(id, current);
        self.load_initial_urls(id, saved);
        self.show_initial_loader(id);

        if let Some(saved) = saved {
            if saved.is_maximized {
                self.backend.set_maximized(id, true);
                self.on_maximize_changed(id, true);
            }
            if saved.is_full_screen {
                self.backend.set_fullscreen(id, true);
                self.on_fullscreen_changed(id, true);
            }
        }

        self.layout(id);
        self.request_save();
        tracing::info!(window_id = id.0, page_id = current.0, "window opened");
        Ok(id)
    }

    /// Load saved addresses (or the start page) into every visible slot.
    fn load_initial_urls(&mut self, window: WindowId, saved: Option<&WindowSnapshot>) {
        let Some(state) = self.windows.get(&window) else {
            return;
        };
        let mut loads = Vec::new();
        for (page, pool) in &state.pools {
            let urls = saved.and_then(|s| s.tab_urls.get(page));
            for (slot, surface) in pool.visible(state.tab_count(*page)).iter().enumerate() {
                let url = urls
                    .and_then(|u| u.get(slot))
                    .filter(|u| !u.is_empty())
                    .cloned()
                    .unwrap_or_else(|| self.config.browser.start_page.clone());
                loads.push((*surface, url));
            }
        }
        for (surface, url) in loads {
            self.load_address(surface, &url);
        }
    }

    /// Close a main window: persist, drop its pending work, destroy its
    /// surfaces. Closing the last window quits.
    pub fn close_window(&mut self, window: WindowId) {
        if !self.windows.contains_key(&window) {
            return;
        }
        self.save_now();
        self.scheduler.cancel_where(|task| task.window() == Some(window));

        if let Some(state) = self.windows.remove(&window) {
            for surface in state.all_surfaces() {
                self.surfaces.remove(&surface);
                self.backend.destroy_surface(surface);
            }
        }
        self.backend.close_window(window);
        tracing::info!(window_id = window.0, remaining = self.windows.len(), "window closed");

        if self.windows.is_empty() {
            self.backend.quit();
        }
    }

    // =========================================================================
    // Surfaces
    // =========================================================================

    fn alloc_surface(&mut self) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        id
    }

    /// Create the full slot pool of `page` in `window` if it does not exist.
    /// Existing pools are never shrunk or recreated.
    pub(super) fn ensure_surfaces(&mut self, window: WindowId, page: PageId) -> Result<(), ShellError> {
        let exists = self
            .windows
            .get(&window)
            .ok_or(ShellError::UnknownWindow(window))?
            .pools
            .contains_key(&page);
        if exists {
            return Ok(());
        }
        let record = self.pages.get(page).ok_or(ShellError::UnknownPage(page))?;
        let session_id = record.session_id.clone();

        let mut slots = Vec::with_capacity(MAX_TABS);
        for slot in 0..MAX_TABS {
            let surface = self.alloc_surface();
            let role = SurfaceRole::Tab { page, slot };
            let spec = SurfaceSpec {
                role,
                partition: Some(session_id.clone()),
                url: None,
                init_script: Some(tab_bridge_script(page, slot)),
            };
            if let Err(e) = self.backend.create_surface(window, surface, &spec) {
                for created in slots {
                    self.surfaces.remove(&created);
                    self.backend.destroy_surface(created);
                }
                return Err(e);
            }
            self.surfaces.insert(surface, (window, role));
            slots.push(surface);
        }

        tracing::debug!(window_id = window.0, page_id = page.0, "surface pool created");
        if let Some(state) = self.windows.get_mut(&window) {
            state
                .pools
                .insert(page, SurfacePool::new(page, session_id, slots));
        }
        Ok(())
    }

    /// Destroy every surface of `page` in every window.
    pub(super) fn destroy_page_surfaces(&mut self, page: PageId) {
        let mut doomed = Vec::new();
        for state in self.windows.values_mut() {
            if let Some(pool) = state.pools.remove(&page) {
                doomed.extend_from_slice(pool.slots());
            }
            state.tab_counts.remove(&page);
            state.active_tab.remove(&page);
        }
        for surface in doomed {
            self.surfaces.remove(&surface);
            self.backend.destroy_surface(surface);
        }
    }

    /// Apply zoom, then navigate.
    pub(super) fn load_address(&mut self, surface: SurfaceId, url: &str) {
        self.backend.set_zoom(surface, zoom_factor(self.zoom));
        self.backend.load_url(surface, url);
        tracing::debug!(surface = surface.0, url, "load");
    }

    // =========================================================================
    // Chrome messaging
    // =========================================================================

    pub(super) fn post_header(&mut self, window: WindowId, message: ChromeMessage) {
        self.backend.post(window, ChromeTarget::Header, &message);
    }

    pub(super) fn post_overlay(&mut self, window: WindowId, kind: OverlayKind, message: ChromeMessage) {
        self.backend.post(window, ChromeTarget::Overlay(kind), &message);
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Earliest time [`Shell::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Run every task whose deadline has passed.
    pub fn tick(&mut self) {
        let now = self.backend.now();
        for task in self.scheduler.due(now) {
            if let Some(window) = task.window() {
                if !self.windows.contains_key(&window) {
                    continue;
                }
            }
            match task {
                Task::Layout(window) => self.layout(window),
                Task::OverlaySync(window) => self.sync_overlays(window),
                Task::FocusCheck(window) => self.check_focus(window),
                Task::HideLoader(window) => self.hide_initial_loader(window),
                Task::Save => self.save_now(),
                Task::Autosave => {
                    self.save_now();
                    self.scheduler
                        .debounce(Task::Autosave, now, self.config.timing.autosave_interval());
                }
                Task::CycleTabs => {}
            }
        }
    }

    /// Final save before the process exits.
    pub fn shutdown(&mut self) {
        self.save_now();
        tracing::info!("shell shut down");
    }
}
