use std::collections::HashMap;

use mosaic_common::{Rect, SurfaceId};
use tracing::debug;
use wry::raw_window_handle;

use crate::content::ContentProvider;
use crate::events::{PageLoadState, WebViewEvent};
use crate::WebViewError;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

/// Maps surfaces to WebView handles and keeps their navigation history
/// in step with the events drained from the engine.
pub struct WebViewRegistry {
    manager: WebViewManager,
    handles: HashMap<SurfaceId, WebViewHandle>,
}

impl WebViewRegistry {
    pub fn new(manager: WebViewManager) -> Self {
        Self {
            manager,
            handles: HashMap::new(),
        }
    }

    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.manager.set_content_provider(provider);
    }

    /// Create a WebView for a surface and register it. An existing view for
    /// the same surface is replaced.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        surface: SurfaceId,
        window: &W,
        bounds: Rect,
        config: WebViewConfig,
    ) -> Result<(), WebViewError> {
        let handle = self.manager.create(surface, window, bounds, config)?;
        self.handles.insert(surface, handle);
        Ok(())
    }

    pub fn get(&self, surface: SurfaceId) -> Option<&WebViewHandle> {
        self.handles.get(&surface)
    }

    pub fn get_mut(&mut self, surface: SurfaceId) -> Option<&mut WebViewHandle> {
        self.handles.get_mut(&surface)
    }

    pub fn destroy(&mut self, surface: SurfaceId) -> bool {
        if self.handles.remove(&surface).is_some() {
            debug!(surface = surface.0, "WebView destroyed");
            self.manager.push_event(WebViewEvent::Closed { surface });
            true
        } else {
            false
        }
    }

    /// Drop a partition's storage. Its views must already be destroyed.
    pub fn clear_partition(&mut self, partition: &str) -> Result<(), WebViewError> {
        self.manager.clear_partition(partition)
    }

    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.handles.keys().copied().collect()
    }

    /// Drain pending events, recording page loads in each view's history.
    pub fn drain_events(&mut self) -> Vec<WebViewEvent> {
        let events = self.manager.drain_events();
        for event in &events {
            if let WebViewEvent::PageLoad {
                surface,
                state,
                url,
            } = event
            {
                if let Some(handle) = self.handles.get_mut(surface) {
                    handle
                        .history_mut()
                        .observe(url, *state == PageLoadState::Finished);
                }
            }
        }
        events
    }

    /// Destroy all views. Used during shutdown.
    pub fn destroy_all(&mut self) {
        for surface in self.surfaces() {
            self.destroy(surface);
        }
    }

    pub fn count(&self) -> usize {
        self.handles.len()
    }
}
