//! WebView lifecycle management.
//!
//! `WebViewManager` creates `wry::WebView` instances for shell surfaces and
//! owns the per-partition `WebContext`s they share. `WebViewRegistry` keys
//! the resulting handles by surface.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use wry::WebContext;

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod registry;
mod types;

pub use handle::WebViewHandle;
pub use registry::WebViewRegistry;
pub use types::WebViewConfig;

/// Scheme of the bundled chrome pages.
pub const PROTOCOL: &str = "mosaic";

/// A browsing partition: one data directory shared by every tab of a page.
pub(crate) struct PartitionContext {
    pub(crate) context: WebContext,
    /// WebKitGTK registers schemes on the context, once.
    pub(crate) protocol_registered: bool,
}

pub struct WebViewManager {
    /// Event sink, drained by the main event loop.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    content_provider: Option<Arc<ContentProvider>>,
    partitions: HashMap<String, PartitionContext>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: None,
            partitions: HashMap::new(),
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        let mut events = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::take(&mut *events)
    }

    pub(crate) fn push_event(&self, event: WebViewEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Partitions with a live context.
    pub fn partitions(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(String::as_str)
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}
