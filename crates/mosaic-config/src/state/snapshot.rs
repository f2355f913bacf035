//! Durable state document: pages, id counters, zoom, settings, windows.

use std::collections::BTreeMap;

use mosaic_common::types::{PageId, Rect};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// One page (isolated browsing session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: PageId,
    pub name: String,
    /// Storage partition the page's tabs are bound to.
    pub session_id: String,
}

impl PageRecord {
    /// A page with the default name and partition for `id`.
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            name: format!("Session {}", id.0),
            session_id: format!("persist:page_{}", id.0),
        }
    }
}

/// Saved geometry and per-page tab state of one main window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub bounds: Option<Rect>,
    pub is_maximized: bool,
    pub is_full_screen: bool,
    pub current_page: Option<PageId>,
    pub page_tabs: BTreeMap<PageId, usize>,
    pub tab_urls: BTreeMap<PageId, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateSnapshot {
    pub pages: Vec<PageRecord>,
    pub next_page_id: Option<u32>,
    pub deleted_page_numbers: Vec<u32>,
    /// Zoom percent; 0 means "not recorded".
    pub global_zoom_level: u32,
    pub settings: Option<Settings>,
    pub windows: Vec<WindowSnapshot>,
}
