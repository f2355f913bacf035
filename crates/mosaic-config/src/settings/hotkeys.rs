//! Rebindable shortcut table and its conflict rules.

use std::collections::{BTreeMap, HashSet};

use mosaic_common::HotkeyAction;
use serde::{Deserialize, Serialize};

pub const CYCLE_TABS_DEFAULT: &str = "CommandOrControl+Tab";
pub const CYCLE_SESSIONS_DEFAULT: &str = "CommandOrControl+Shift+Tab";

/// Accelerator per rebindable action. An empty string means unbound.
///
/// Format: Electron-style accelerators, e.g. `CommandOrControl+Shift+N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    pub fullscreen: String,
    pub new_window: String,
    pub add_tab: String,
    pub delete_tab: String,
    pub cycle_tabs: String,
    pub cycle_sessions: String,
    pub back: String,
    pub forward: String,
    pub search: String,
    pub add_session: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            fullscreen: "F11".into(),
            new_window: "CommandOrControl+N".into(),
            add_tab: "CommandOrControl+T".into(),
            delete_tab: "CommandOrControl+W".into(),
            cycle_tabs: CYCLE_TABS_DEFAULT.into(),
            cycle_sessions: CYCLE_SESSIONS_DEFAULT.into(),
            back: "Alt+Left".into(),
            forward: "Alt+Right".into(),
            search: "CommandOrControl+F".into(),
            add_session: "CommandOrControl+Shift+N".into(),
        }
    }
}

impl HotkeyConfig {
    pub fn get(&self, action: HotkeyAction) -> &str {
        match action {
            HotkeyAction::Fullscreen => &self.fullscreen,
            HotkeyAction::NewWindow => &self.new_window,
            HotkeyAction::AddTab => &self.add_tab,
            HotkeyAction::DeleteTab => &self.delete_tab,
            HotkeyAction::CycleTabs => &self.cycle_tabs,
            HotkeyAction::CycleSessions => &self.cycle_sessions,
            HotkeyAction::Back => &self.back,
            HotkeyAction::Forward => &self.forward,
            HotkeyAction::Search => &self.search,
            HotkeyAction::AddSession => &self.add_session,
        }
    }

    fn slot_mut(&mut self, action: HotkeyAction) -> &mut String {
        match action {
            HotkeyAction::Fullscreen => &mut self.fullscreen,
            HotkeyAction::NewWindow => &mut self.new_window,
            HotkeyAction::AddTab => &mut self.add_tab,
            HotkeyAction::DeleteTab => &mut self.delete_tab,
            HotkeyAction::CycleTabs => &mut self.cycle_tabs,
            HotkeyAction::CycleSessions => &mut self.cycle_sessions,
            HotkeyAction::Back => &mut self.back,
            HotkeyAction::Forward => &mut self.forward,
            HotkeyAction::Search => &mut self.search,
            HotkeyAction::AddSession => &mut self.add_session,
        }
    }

    pub fn set(&mut self, action: HotkeyAction, accelerator: impl Into<String>) {
        *self.slot_mut(action) = accelerator.into();
    }

    /// All slots as `(action, accelerator)` pairs in enumeration order,
    /// unbound slots included.
    pub fn all(&self) -> Vec<(HotkeyAction, &str)> {
        HotkeyAction::ALL
            .into_iter()
            .map(|a| (a, self.get(a)))
            .collect()
    }

    /// Bound slots only.
    pub fn bound(&self) -> impl Iterator<Item = (HotkeyAction, &str)> {
        self.all().into_iter().filter(|(_, acc)| !acc.is_empty())
    }

    /// Repair bindings written by older versions: `cycle_tabs` must not be
    /// empty, and `cycle_sessions` used to share `CommandOrControl+Tab`.
    pub fn migrate(&mut self) {
        if self.cycle_tabs.is_empty() {
            self.cycle_tabs = CYCLE_TABS_DEFAULT.into();
        }
        if self.cycle_sessions.is_empty() || self.cycle_sessions == CYCLE_TABS_DEFAULT {
            self.cycle_sessions = CYCLE_SESSIONS_DEFAULT.into();
        }
    }

    /// Resolve accelerators shared by several slots after a settings save,
    /// comparing the accelerator strings as written.
    pub fn normalize_against(&mut self, previous: &HotkeyConfig) {
        self.normalize_by(previous, |acc| acc.trim().to_string());
    }

    /// Resolve accelerators shared by several slots after a settings save.
    ///
    /// `canonical` maps an accelerator to the key it names, so spellings
    /// like `Ctrl+T` and `CommandOrControl+T` can count as the same key.
    /// For each shared key the winner is the first slot (in enumeration
    /// order) whose key differs from `previous`, or the first slot if none
    /// changed. Every other slot sharing it is cleared.
    pub fn normalize_by(&mut self, previous: &HotkeyConfig, canonical: impl Fn(&str) -> String) {
        let key_of = |acc: &str| (!acc.is_empty()).then(|| canonical(acc));
        let changed: HashSet<HotkeyAction> = HotkeyAction::ALL
            .into_iter()
            .filter(|&a| key_of(self.get(a)) != key_of(previous.get(a)))
            .collect();

        let mut by_key: BTreeMap<String, Vec<HotkeyAction>> = BTreeMap::new();
        for (action, acc) in self.bound() {
            by_key.entry(canonical(acc)).or_default().push(action);
        }

        for (key, actions) in by_key {
            if actions.len() < 2 {
                continue;
            }
            let winner = actions
                .iter()
                .copied()
                .find(|a| changed.contains(a))
                .unwrap_or(actions[0]);
            for loser in actions.into_iter().filter(|&a| a != winner) {
                tracing::debug!(
                    key = %key,
                    winner = winner.name(),
                    cleared = loser.name(),
                    "hotkey conflict resolved"
                );
                self.set(loser, "");
            }
        }
    }
}
