//! Process-wide page list with id recycling.

use mosaic_common::{PageId, ShellError};
use mosaic_config::PageRecord;
use tracing::debug;

/// Ordered pages plus the id counters.
///
/// Freed ids are handed out again smallest-first before a new id is minted,
/// so repeated add/delete cycles never grow the id space.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRegistry {
    pages: Vec<PageRecord>,
    next_id: u32,
    freed: Vec<u32>,
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self {
            pages: vec![PageRecord::new(PageId(1))],
            next_id: 2,
            freed: Vec::new(),
        }
    }
}

impl PageRegistry {
    /// Adopt saved pages. Returns `None` for an empty list.
    ///
    /// A missing `next_id` defaults to `len + 1`; it is raised above every
    /// live id, and freed ids that are live again are dropped.
    pub fn restore(pages: Vec<PageRecord>, next_id: Option<u32>, freed: Vec<u32>) -> Option<Self> {
        if pages.is_empty() {
            return None;
        }
        let max_live = pages.iter().map(|p| p.id.0).max().unwrap_or(0);
        let next_id = next_id
            .unwrap_or(pages.len() as u32 + 1)
            .max(max_live + 1);
        let mut freed: Vec<u32> = freed
            .into_iter()
            .filter(|n| *n > 0 && !pages.iter().any(|p| p.id.0 == *n))
            .collect();
        freed.sort_unstable();
        freed.dedup();
        Some(Self {
            pages,
            next_id,
            freed,
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter()
    }

    pub fn ids(&self) -> Vec<PageId> {
        self.pages.iter().map(|p| p.id).collect()
    }

    pub fn get(&self, id: PageId) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PageId) -> bool {
        self.get(id).is_some()
    }

    pub fn first(&self) -> Option<PageId> {
        self.pages.first().map(|p| p.id)
    }

    pub fn index_of(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn freed(&self) -> &[u32] {
        &self.freed
    }

    /// The page after `id` in list order, wrapping around.
    pub fn next_after(&self, id: PageId) -> Option<PageId> {
        let idx = self.index_of(id)?;
        let next = (idx + 1) % self.pages.len();
        Some(self.pages[next].id)
    }

    /// Create a page with the smallest freed id, or a fresh one.
    pub fn allocate(&mut self) -> PageRecord {
        let number = match self.freed.iter().copied().min() {
            Some(min) => {
                self.freed.retain(|n| *n != min);
                min
            }
            None => {
                let n = self.next_id;
                self.next_id += 1;
                n
            }
        };
        let record = PageRecord::new(PageId(number));
        debug!(page_id = number, "page allocated");
        self.pages.push(record.clone());
        record
    }

    /// Delete a page, refusing to remove the last one.
    pub fn remove(&mut self, id: PageId) -> Result<PageRecord, ShellError> {
        if !self.contains(id) {
            return Err(ShellError::UnknownPage(id));
        }
        if self.pages.len() == 1 {
            return Err(ShellError::LastPage(id));
        }
        self.discard(id).ok_or(ShellError::UnknownPage(id))
    }

    /// Delete a page even if it is the last one (application shutdown).
    pub fn discard(&mut self, id: PageId) -> Option<PageRecord> {
        let idx = self.index_of(id)?;
        let record = self.pages.remove(idx);
        if !self.freed.contains(&id.0) {
            self.freed.push(id.0);
        }
        debug!(page_id = id.0, "page removed");
        Some(record)
    }

    /// Rename a page. Names are trimmed; an empty result is rejected.
    pub fn rename(&mut self, id: PageId, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.pages.iter_mut().find(|p| p.id == id) {
            Some(page) => {
                page.name = trimmed.to_string();
                true
            }
            None => false,
        }
    }

    /// Move `source` to the position currently held by `target`.
    pub fn reorder(&mut self, source: PageId, target: PageId) -> bool {
        let (Some(from), Some(to)) = (self.index_of(source), self.index_of(target)) else {
            return false;
        };
        if from == to {
            return false;
        }
        let moved = self.pages.remove(from);
        self.pages.insert(to, moved);
        true
    }

    /// Move `source` so it lands before the element at `index` (splice
    /// semantics: `index` is clamped to `0..=len` and, when moving right,
    /// adjusted for the removal).
    pub fn reorder_to_index(&mut self, source: PageId, index: i64) -> bool {
        let Some(from) = self.index_of(source) else {
            return false;
        };
        let len = self.pages.len() as i64;
        let mut to = index.clamp(0, len) as usize;
        let moved = self.pages.remove(from);
        if to > from {
            to = to.saturating_sub(1);
        }
        self.pages.insert(to, moved);
        true
    }
}
