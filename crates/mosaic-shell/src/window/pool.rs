use mosaic_common::{PageId, SurfaceId};

/// The fixed set of tab surfaces one window holds for one page.
///
/// Slots are created together and never reordered, so a slot index is the
/// tab's identity. Only a prefix (the page's tab count) is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePool {
    pub page: PageId,
    pub session_id: String,
    slots: Vec<SurfaceId>,
}

impl SurfacePool {
    pub fn new(page: PageId, session_id: impl Into<String>, slots: Vec<SurfaceId>) -> Self {
        Self {
            page,
            session_id: session_id.into(),
            slots,
        }
    }

    pub fn get(&self, slot: usize) -> Option<SurfaceId> {
        self.slots.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[SurfaceId] {
        &self.slots
    }

    /// The first `count` slots, clamped to the pool size.
    pub fn visible(&self, count: usize) -> &[SurfaceId] {
        &self.slots[..count.min(self.slots.len())]
    }

    pub fn position(&self, surface: SurfaceId) -> Option<usize> {
        self.slots.iter().position(|s| *s == surface)
    }
}
