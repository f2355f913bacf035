use std::sync::{Arc, Mutex};

use mosaic_common::SurfaceId;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::WebViewManager;

// =============================================================================
// NAVIGATION POLICY
// =============================================================================

/// URL schemes a surface may navigate to. Everything else is blocked.
/// `http://mosaic.localhost` is how WebView2 rewrites `mosaic://localhost`.
pub const ALLOWED_NAV_SCHEMES: &[&str] = &[
    "https://",
    "http://",
    "mosaic://",
    "file://",
    "about:",
    "blob:",
];

/// Check whether a top-level navigation to `url` is allowed.
pub fn is_navigation_allowed(url: &str) -> bool {
    let url = url.trim_start();
    ALLOWED_NAV_SCHEMES.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

fn push(events: &Mutex<Vec<WebViewEvent>>, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(
                    surface = surface.0,
                    body_len = body.len(),
                    "IPC message rejected: invalid JSON"
                );
                return;
            }

            debug!(surface = surface.0, body_len = body.len(), "IPC message from JS");
            push(&events, WebViewEvent::IpcMessage { surface, body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(surface = surface.0, ?state, url = %url, "page load");
            push(&events, WebViewEvent::PageLoad { surface, state, url });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url) {
                warn!(surface = surface.0, url = %url, "navigation blocked");
                return false;
            }
            push(&events, WebViewEvent::NavigationRequested { surface, url });
            true
        })
    }

    pub(super) fn attach_new_window_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_new_window_req_handler(move |url| {
            if is_navigation_allowed(&url) {
                debug!(surface = surface.0, url = %url, "new window redirected in place");
                push(&events, WebViewEvent::NewWindowRequested { surface, url });
            } else {
                warn!(surface = surface.0, url = %url, "new window blocked");
            }
            false
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
