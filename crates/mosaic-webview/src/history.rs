//! Per-surface navigation history.
//!
//! wry exposes neither the engine's back/forward list nor its current
//! entry, so each handle keeps its own record, fed by explicit loads and by
//! the page-load events of in-page navigation.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavHistory {
    entries: Vec<String>,
    position: usize,
    /// A load we started has not finished yet. Redirects seen during it
    /// replace the current entry instead of adding one.
    pending: bool,
}

impl NavHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    /// An explicit load. Forward entries are dropped.
    pub fn load(&mut self, url: &str) {
        self.push(url);
        self.pending = true;
    }

    /// Step back. Returns the URL the engine is about to show.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.position -= 1;
        self.pending = true;
        self.current()
    }

    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.position += 1;
        self.pending = true;
        self.current()
    }

    /// Record a URL reported by the engine.
    pub fn observe(&mut self, url: &str, finished: bool) {
        if self.current() == Some(url) {
            if finished {
                self.pending = false;
            }
            return;
        }
        if self.pending {
            match self.entries.get_mut(self.position) {
                Some(entry) => *entry = url.to_string(),
                None => self.push(url),
            }
        } else {
            self.push(url);
        }
        if finished {
            self.pending = false;
        }
    }

    fn push(&mut self, url: &str) {
        if self.current() == Some(url) {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.position + 1);
        }
        self.entries.push(url.to_string());
        self.position = self.entries.len() - 1;
    }
}
