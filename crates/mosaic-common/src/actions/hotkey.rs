use serde::{Deserialize, Serialize};

use super::Action;

/// The rebindable shortcut slots, in their fixed enumeration order.
///
/// The order matters: when two slots end up sharing one accelerator and
/// neither (or both) was just edited, the earlier slot keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    Fullscreen,
    NewWindow,
    AddTab,
    DeleteTab,
    CycleTabs,
    CycleSessions,
    Back,
    Forward,
    Search,
    AddSession,
}

impl HotkeyAction {
    pub const ALL: [HotkeyAction; 10] = [
        HotkeyAction::Fullscreen,
        HotkeyAction::NewWindow,
        HotkeyAction::AddTab,
        HotkeyAction::DeleteTab,
        HotkeyAction::CycleTabs,
        HotkeyAction::CycleSessions,
        HotkeyAction::Back,
        HotkeyAction::Forward,
        HotkeyAction::Search,
        HotkeyAction::AddSession,
    ];

    /// Key used in the persisted `hotkeys` map.
    pub fn name(self) -> &'static str {
        match self {
            HotkeyAction::Fullscreen => "fullscreen",
            HotkeyAction::NewWindow => "new_window",
            HotkeyAction::AddTab => "add_tab",
            HotkeyAction::DeleteTab => "delete_tab",
            HotkeyAction::CycleTabs => "cycle_tabs",
            HotkeyAction::CycleSessions => "cycle_sessions",
            HotkeyAction::Back => "back",
            HotkeyAction::Forward => "forward",
            HotkeyAction::Search => "search",
            HotkeyAction::AddSession => "add_session",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Action fired when the shortcut triggers.
    pub fn to_action(self) -> Action {
        match self {
            HotkeyAction::Fullscreen => Action::ToggleFullscreen,
            HotkeyAction::NewWindow => Action::NewWindow,
            // Unlike the header button, the shortcut leaves focus where it is.
            HotkeyAction::AddTab => Action::AddTab { activate: false },
            HotkeyAction::DeleteTab => Action::EnterDeleteMode,
            HotkeyAction::CycleTabs => Action::CycleTabs,
            HotkeyAction::CycleSessions => Action::CyclePages,
            HotkeyAction::Back => Action::NavigateBack,
            HotkeyAction::Forward => Action::NavigateForward,
            HotkeyAction::Search => Action::OpenSearch,
            HotkeyAction::AddSession => Action::AddPage,
        }
    }
}
