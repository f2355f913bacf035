use super::Action;

impl Action {
    /// Short stable name, used in logs and as the chrome message kind.
    pub fn label(&self) -> &'static str {
        match self {
            Action::CloseWindow => "close-window",
            Action::MinimizeWindow => "minimize-window",
            Action::ToggleMaximize => "maximize-window",
            Action::ToggleFullscreen => "toggle-fullscreen",
            Action::NewWindow => "new-window",
            Action::ZoomIn => "zoom-in",
            Action::ZoomOut => "zoom-out",
            Action::AddPage => "add-page",
            Action::SwitchPage(_) => "switch-page",
            Action::CyclePages => "cycle-pages",
            Action::RenamePage { .. } => "rename-page",
            Action::ReorderPages { .. } => "reorder-pages",
            Action::ReorderPagesToIndex { .. } => "reorder-pages-index",
            Action::ShowConfirmPopup(_) => "show-confirm-popup",
            Action::DeletePageFromPopup(_) => "delete-page-from-popup",
            Action::ConfirmCloseApp(_) => "confirm-close-app",
            Action::AddTab { .. } => "add-tab",
            Action::EnterDeleteMode => "delete-tab",
            Action::DeleteSpecificTab(_) => "delete-specific-tab",
            Action::CancelDeleteMode => "cancel-delete-mode",
            Action::CycleTabs => "cycle-tabs",
            Action::TabClicked { .. } => "tab-clicked",
            Action::OpenSearch => "open-search",
            Action::PerformSearch(_) => "perform-search",
            Action::CloseSearch(_) => "close-search",
            Action::NavigateBack => "navigate-back",
            Action::NavigateForward => "navigate-forward",
            Action::NavigateTo(_) => "navigate-to",
            Action::OpenSettings => "open-settings",
            Action::SaveSettings(_) => "save-settings",
            Action::CloseSettings => "close-settings",
            Action::SuspendHotkeys => "suspend-hotkeys",
            Action::ResumeHotkeys => "resume-hotkeys",
            Action::SetPopupInteractive(_) => "set-popup-mouse-events",
            Action::Escape => "escape",
            Action::None => "none",
        }
    }
}
