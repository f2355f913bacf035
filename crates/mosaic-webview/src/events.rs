//! WebView event types.

use mosaic_common::SurfaceId;
use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a WebView, drained by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad {
        surface: SurfaceId,
        state: PageLoadState,
        url: String,
    },
    /// An IPC message was received from JavaScript.
    IpcMessage { surface: SurfaceId, body: String },
    /// A top-level navigation was allowed.
    NavigationRequested { surface: SurfaceId, url: String },
    /// The page asked for a new window. Mosaic opens it in place.
    NewWindowRequested { surface: SurfaceId, url: String },
    /// WebView was destroyed.
    Closed { surface: SurfaceId },
}

impl WebViewEvent {
    pub fn surface(&self) -> SurfaceId {
        match self {
            Self::PageLoad { surface, .. }
            | Self::IpcMessage { surface, .. }
            | Self::NavigationRequested { surface, .. }
            | Self::NewWindowRequested { surface, .. }
            | Self::Closed { surface } => *surface,
        }
    }
}
