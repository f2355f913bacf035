//! Decoding of chrome IPC messages (`{ "kind": ..., "payload": ... }`)
//! into [`Action`]s.

use serde::Deserialize;
use serde_json::Value;

use super::Action;
use crate::types::{ClickPoint, PageId};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenamePayload {
    page_id: u32,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorderPayload {
    source_id: u32,
    target_id: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorderIndexPayload {
    source_id: u32,
    #[serde(default)]
    target_index: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TabClickPayload {
    page_id: u32,
    tab_index: usize,
}

fn page_id(payload: &Value) -> Option<PageId> {
    payload
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .map(PageId)
}

fn parse<T: for<'de> Deserialize<'de>>(payload: &Value) -> Option<T> {
    serde_json::from_value(payload.clone()).ok()
}

/// Loose numeric coercion: numbers and numeric strings, anything else is 0.
fn coerce_index(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

impl Action {
    /// Decode an inbound chrome message. Returns `None` for unknown kinds
    /// or payloads that do not fit the kind.
    pub fn from_ipc(kind: &str, payload: &Value) -> Option<Action> {
        let action = match kind {
            "close-window" => Action::CloseWindow,
            "minimize-window" => Action::MinimizeWindow,
            "maximize-window" => Action::ToggleMaximize,
            "toggle-fullscreen" => Action::ToggleFullscreen,
            "new-window" => Action::NewWindow,
            "zoom-in" => Action::ZoomIn,
            "zoom-out" => Action::ZoomOut,
            "add-page" => Action::AddPage,
            "switch-page" => Action::SwitchPage(page_id(payload)?),
            "rename-page" => {
                let p: RenamePayload = parse(payload)?;
                Action::RenamePage {
                    page: PageId(p.page_id),
                    name: p.name,
                }
            }
            "reorder-pages" => {
                let p: ReorderPayload = parse(payload)?;
                Action::ReorderPages {
                    source: PageId(p.source_id),
                    target: PageId(p.target_id),
                }
            }
            "reorder-pages-index" => {
                let p: ReorderIndexPayload = parse(payload)?;
                Action::ReorderPagesToIndex {
                    source: PageId(p.source_id),
                    index: coerce_index(&p.target_index),
                }
            }
            "show-confirm-popup" => Action::ShowConfirmPopup(page_id(payload)?),
            "delete-page-from-popup" => Action::DeletePageFromPopup(page_id(payload)?),
            "confirm-close-app" => Action::ConfirmCloseApp(page_id(payload)?),
            "add-tab" => Action::AddTab { activate: true },
            "delete-tab" => Action::EnterDeleteMode,
            "delete-specific-tab" => Action::DeleteSpecificTab(payload.as_i64()?),
            "cancel-delete-mode" => Action::CancelDeleteMode,
            "tab-clicked" => {
                let p: TabClickPayload = parse(payload)?;
                Action::TabClicked {
                    page: PageId(p.page_id),
                    tab: p.tab_index,
                }
            }
            "open-search" => Action::OpenSearch,
            "perform-search" => Action::PerformSearch(payload.as_str()?.to_string()),
            "close-search" => Action::CloseSearch(parse::<ClickPoint>(payload)),
            "navigate-back" | "navigate-back-header" => Action::NavigateBack,
            "navigate-forward" | "navigate-forward-header" => Action::NavigateForward,
            "navigate-to" => {
                let url = payload.as_str()?;
                if url.is_empty() {
                    return None;
                }
                Action::NavigateTo(url.to_string())
            }
            "open-settings" => Action::OpenSettings,
            "save-settings" => Action::SaveSettings(payload.clone()),
            "close-settings" => Action::CloseSettings,
            "suspend-hotkeys" => Action::SuspendHotkeys,
            "resume-hotkeys" => Action::ResumeHotkeys,
            "set-popup-mouse-events" => Action::SetPopupInteractive(payload.as_bool()?),
            _ => return None,
        };
        Some(action)
    }
}
