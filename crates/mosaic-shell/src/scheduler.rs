//! Debounce and throttle bookkeeping for the single-threaded event loop.
//!
//! The scheduler never runs anything itself. Owners push deadlines in,
//! poll [`Scheduler::due`] from the event loop, and execute what comes out.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use mosaic_common::WindowId;

/// Deferred work known to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Recompute tab bounds and re-pin overlays.
    Layout(WindowId),
    /// Re-pin overlays only (window moved).
    OverlaySync(WindowId),
    /// Inspect focus after a window or overlay lost it.
    FocusCheck(WindowId),
    /// Initial-loader backstop.
    HideLoader(WindowId),
    /// Coalesced state-file write.
    Save,
    /// Periodic state-file write.
    Autosave,
    /// Throttle key for the cycle-tabs shortcut.
    CycleTabs,
}

impl Task {
    /// The window this task is scoped to, if any.
    pub fn window(&self) -> Option<WindowId> {
        match *self {
            Task::Layout(w) | Task::OverlaySync(w) | Task::FocusCheck(w) | Task::HideLoader(w) => {
                Some(w)
            }
            Task::Save | Task::Autosave | Task::CycleTabs => None,
        }
    }
}

/// Keyed deadlines plus last-fire times for throttles.
#[derive(Debug)]
pub struct Scheduler<K = Task> {
    pending: HashMap<K, Instant>,
    last_fired: HashMap<K, Instant>,
}

impl<K: Copy + Eq + Hash> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            last_fired: HashMap::new(),
        }
    }

    /// Schedule `key` to run `delay` after `now`, replacing any earlier
    /// request for the same key (trailing debounce).
    pub fn debounce(&mut self, key: K, now: Instant, delay: Duration) {
        self.pending.insert(key, now + delay);
    }

    /// Schedule `key` unless it is already pending.
    pub fn schedule_once(&mut self, key: K, now: Instant, delay: Duration) {
        self.pending.entry(key).or_insert(now + delay);
    }

    /// Returns true and records the firing if at least `min_interval` has
    /// passed since the last time `key` was allowed through.
    pub fn throttle(&mut self, key: K, now: Instant, min_interval: Duration) -> bool {
        match self.last_fired.get(&key) {
            Some(last) if now.saturating_duration_since(*last) < min_interval => false,
            _ => {
                self.last_fired.insert(key, now);
                true
            }
        }
    }

    /// Remove and return every key whose deadline has passed, earliest
    /// first.
    pub fn due(&mut self, now: Instant) -> Vec<K> {
        let mut ready: Vec<(K, Instant)> = self
            .pending
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(k, at)| (*k, *at))
            .collect();
        ready.sort_by_key(|(_, at)| *at);
        for (key, _) in &ready {
            self.pending.remove(key);
        }
        ready.into_iter().map(|(k, _)| k).collect()
    }

    pub fn cancel(&mut self, key: K) {
        self.pending.remove(&key);
    }

    /// Drop every pending key matching `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) {
        self.pending.retain(|k, _| !pred(k));
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.contains_key(&key)
    }

    /// Earliest pending deadline, for the event loop's wake-up time.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }
}

impl<K: Copy + Eq + Hash> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
