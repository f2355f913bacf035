use serde::{Deserialize, Serialize};

use crate::types::{ClickPoint, PageId};

/// Every user-triggerable action in the application.
///
/// Hotkeys, chrome surfaces (header, popup, delete-mode, search box,
/// settings) and content bridges all resolve to an `Action`. The shell
/// router matches on this enum to route to the page store and composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    // -- Window --
    CloseWindow,
    MinimizeWindow,
    ToggleMaximize,
    ToggleFullscreen,
    NewWindow,
    ZoomIn,
    ZoomOut,

    // -- Pages --
    AddPage,
    SwitchPage(PageId),
    CyclePages,
    RenamePage { page: PageId, name: String },
    ReorderPages { source: PageId, target: PageId },
    ReorderPagesToIndex { source: PageId, index: i64 },
    ShowConfirmPopup(PageId),
    DeletePageFromPopup(PageId),
    ConfirmCloseApp(PageId),

    // -- Tabs --
    AddTab { activate: bool },
    EnterDeleteMode,
    DeleteSpecificTab(i64),
    CancelDeleteMode,
    CycleTabs,
    TabClicked { page: PageId, tab: usize },

    // -- Navigation --
    OpenSearch,
    PerformSearch(String),
    CloseSearch(Option<ClickPoint>),
    NavigateBack,
    NavigateForward,
    NavigateTo(String),

    // -- Settings / overlays --
    OpenSettings,
    SaveSettings(serde_json::Value),
    CloseSettings,
    SuspendHotkeys,
    ResumeHotkeys,
    SetPopupInteractive(bool),
    Escape,

    // -- Noop --
    None,
}
