//! Messages pushed from the shell to chrome surfaces.
//!
//! Serialized as `{"channel": "...", "data": ...}`; the chrome pages switch
//! on `channel`.

use mosaic_common::{PageId, Rect};
use mosaic_config::{PageRecord, Settings};
use serde::Serialize;

/// A page as shown in the header, with this window's tab count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    pub id: PageId,
    pub name: String,
    pub session_id: String,
    pub tabs: usize,
}

impl PageEntry {
    pub fn new(page: &PageRecord, tabs: usize) -> Self {
        Self {
            id: page.id,
            name: page.name.clone(),
            session_id: page.session_id.clone(),
            tabs,
        }
    }
}

/// Full header refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderState {
    pub pages: Vec<PageEntry>,
    pub current_page: PageId,
    pub zoom_level: u32,
    pub is_maximized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "channel", content = "data", rename_all = "kebab-case")]
pub enum ChromeMessage {
    UpdateState(HeaderState),
    UpdatePages(Vec<PageEntry>),
    UpdateCurrentPage(PageId),
    /// Whether the current page has a valid active tab.
    UpdateTabState(bool),
    UpdateZoom(u32),
    UpdateMaximize(bool),
    /// `false` while the window is fullscreen.
    ToggleHeader(bool),
    ShowError(String),
    /// Ask before deleting a page.
    ShowConfirm(PageId),
    /// Ask before quitting (the page is the last one).
    ShowConfirmClose(PageId),
    ShowInitialLoader,
    HideInitialLoader,
    /// Tab rectangles in window-content coordinates.
    ActivateDeleteMode(Vec<Rect>),
    DeactivateDeleteMode,
    #[serde(rename_all = "camelCase")]
    ActivateSearch { bounds: Rect, current_url: String },
    SettingsData(Settings),
}

impl ChromeMessage {
    /// Channel name, for logging.
    pub fn channel(&self) -> &'static str {
        match self {
            ChromeMessage::UpdateState(_) => "update-state",
            ChromeMessage::UpdatePages(_) => "update-pages",
            ChromeMessage::UpdateCurrentPage(_) => "update-current-page",
            ChromeMessage::UpdateTabState(_) => "update-tab-state",
            ChromeMessage::UpdateZoom(_) => "update-zoom",
            ChromeMessage::UpdateMaximize(_) => "update-maximize",
            ChromeMessage::ToggleHeader(_) => "toggle-header",
            ChromeMessage::ShowError(_) => "show-error",
            ChromeMessage::ShowConfirm(_) => "show-confirm",
            ChromeMessage::ShowConfirmClose(_) => "show-confirm-close",
            ChromeMessage::ShowInitialLoader => "show-initial-loader",
            ChromeMessage::HideInitialLoader => "hide-initial-loader",
            ChromeMessage::ActivateDeleteMode(_) => "activate-delete-mode",
            ChromeMessage::DeactivateDeleteMode => "deactivate-delete-mode",
            ChromeMessage::ActivateSearch { .. } => "activate-search",
            ChromeMessage::SettingsData(_) => "settings-data",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
