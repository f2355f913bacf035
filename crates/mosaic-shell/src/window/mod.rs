//! Per-window state record.

mod pool;

pub use pool::SurfacePool;

use std::collections::{BTreeMap, BTreeSet};

use mosaic_common::types::{FALLBACK_TAB_COUNT, MAX_TABS};
use mosaic_common::{PageId, SurfaceId, WindowId};

use crate::backend::{CssKey, OverlayKind};

/// Where an open search overlay is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTarget {
    pub page: PageId,
    pub slot: usize,
    /// Highlight stylesheet inserted into the target tab.
    pub css: Option<CssKey>,
}

/// Everything the shell tracks about one main window.
#[derive(Debug, Clone)]
pub struct WindowState {
    pub id: WindowId,
    pub header: SurfaceId,
    pub pools: BTreeMap<PageId, SurfacePool>,
    pub tab_counts: BTreeMap<PageId, usize>,
    pub active_tab: BTreeMap<PageId, usize>,
    pub current_page: PageId,
    pub delete_mode: bool,
    pub search: Option<SearchTarget>,
    pub fullscreen: bool,
    pub maximized: bool,
    /// Tabs still loading behind the initial loader.
    pub loader: Option<BTreeSet<SurfaceId>>,
    overlays_visible: [bool; 4],
}

impl WindowState {
    pub fn new(id: WindowId, header: SurfaceId, current_page: PageId) -> Self {
        Self {
            id,
            header,
            pools: BTreeMap::new(),
            tab_counts: BTreeMap::new(),
            active_tab: BTreeMap::new(),
            current_page,
            delete_mode: false,
            search: None,
            fullscreen: false,
            maximized: false,
            loader: None,
            overlays_visible: [false; 4],
        }
    }

    /// Tab count of `page` in this window. Pages without an entry show the
    /// fallback count.
    pub fn tab_count(&self, page: PageId) -> usize {
        self.tab_counts
            .get(&page)
            .copied()
            .unwrap_or(FALLBACK_TAB_COUNT)
            .clamp(1, MAX_TABS)
    }

    pub fn set_tab_count(&mut self, page: PageId, count: usize) {
        self.tab_counts.insert(page, count.clamp(1, MAX_TABS));
    }

    /// Active tab of `page`, if one is set and still visible.
    pub fn active_tab(&self, page: PageId) -> Option<usize> {
        self.active_tab
            .get(&page)
            .copied()
            .filter(|slot| *slot < self.tab_count(page))
    }

    pub fn pool(&self, page: PageId) -> Option<&SurfacePool> {
        self.pools.get(&page)
    }

    pub fn current_pool(&self) -> Option<&SurfacePool> {
        self.pools.get(&self.current_page)
    }

    /// Visible tab surfaces of the current page.
    pub fn visible_tabs(&self) -> &[SurfaceId] {
        match self.current_pool() {
            Some(pool) => pool.visible(self.tab_count(self.current_page)),
            None => &[],
        }
    }

    pub fn active_surface(&self) -> Option<SurfaceId> {
        let slot = self.active_tab(self.current_page)?;
        self.current_pool()?.get(slot)
    }

    /// The search target's surface while it is still visible.
    pub fn search_surface(&self) -> Option<SurfaceId> {
        let target = self.search?;
        if target.slot >= self.tab_count(target.page) {
            return None;
        }
        self.pools.get(&target.page)?.get(target.slot)
    }

    /// Every surface owned by this window, header first.
    pub fn all_surfaces(&self) -> Vec<SurfaceId> {
        let mut out = vec![self.header];
        for pool in self.pools.values() {
            out.extend_from_slice(pool.slots());
        }
        out
    }

    pub fn overlay_visible(&self, kind: OverlayKind) -> bool {
        self.overlays_visible[kind.index()]
    }

    pub fn set_overlay_visible(&mut self, kind: OverlayKind, visible: bool) {
        self.overlays_visible[kind.index()] = visible;
    }
}
