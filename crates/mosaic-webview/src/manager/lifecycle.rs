use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use mosaic_common::{Rect, SurfaceId};
use mosaic_platform::paths::{partition_dir, remove_partition};
use tracing::{debug, warn};
use wry::http::{header::CONTENT_TYPE, Response};
use wry::{raw_window_handle, WebContext, WebViewBuilder};

use crate::content::{request_path, ContentProvider};
use crate::history::NavHistory;
use crate::ipc::IPC_INIT_SCRIPT;
use crate::WebViewError;

use super::handle::{to_wry_rect, WebViewHandle};
use super::types::WebViewConfig;
use super::{PartitionContext, WebViewManager, PROTOCOL};

impl WebViewManager {
    /// Create a new WebView as a child of `window`, positioned at `bounds`
    /// in window-content coordinates.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        surface: SurfaceId,
        window: &W,
        bounds: Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, WebViewError> {
        let events = Arc::clone(&self.events);
        let provider = self.content_provider.clone();
        let url = config
            .url
            .clone()
            .unwrap_or_else(|| "about:blank".to_string());

        let (builder, register_protocol) = match &config.partition {
            Some(partition) => {
                let entry = match self.partitions.entry(partition.clone()) {
                    Entry::Occupied(e) => e.into_mut(),
                    Entry::Vacant(e) => {
                        let dir = partition_dir(partition)?;
                        debug!(partition = %partition, dir = %dir.display(), "partition context created");
                        e.insert(PartitionContext {
                            context: WebContext::new(Some(dir)),
                            protocol_registered: false,
                        })
                    }
                };
                let register = !(cfg!(target_os = "linux") && entry.protocol_registered);
                if provider.is_some() {
                    entry.protocol_registered = true;
                }
                (WebViewBuilder::with_web_context(&mut entry.context), register)
            }
            None => (WebViewBuilder::new(), true),
        };

        let mut builder = builder
            .with_bounds(to_wry_rect(bounds))
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_visible(config.visible)
            .with_focused(false)
            .with_initialization_script(IPC_INIT_SCRIPT);

        for script in &config.init_scripts {
            builder = builder.with_initialization_script(script.as_str());
        }
        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua.as_str());
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events), surface);
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events), surface);
        builder = Self::attach_navigation_handler(builder, Arc::clone(&events), surface);
        builder = Self::attach_new_window_handler(builder, Arc::clone(&events), surface);

        if let (Some(provider), true) = (provider, register_protocol) {
            builder = attach_custom_protocol(builder, provider);
        }

        let webview = builder.with_url(url.as_str()).build_as_child(window)?;

        let mut history = NavHistory::new();
        history.load(&url);
        debug!(surface = surface.0, url = %url, partition = ?config.partition, "WebView created");

        Ok(WebViewHandle {
            webview,
            surface,
            partition: config.partition,
            history,
            next_css: 0,
            zoom: 1.0,
        })
    }

    /// Set the content provider serving `mosaic://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    /// Drop the partition's context and delete its data directory. Views
    /// using it must already be destroyed.
    pub fn clear_partition(&mut self, partition: &str) -> Result<(), WebViewError> {
        self.partitions.remove(partition);
        let dir = partition_dir(partition)?;
        remove_partition(&dir)?;
        debug!(partition, dir = %dir.display(), "partition cleared");
        Ok(())
    }
}

fn attach_custom_protocol<'a>(
    builder: WebViewBuilder<'a>,
    provider: Arc<ContentProvider>,
) -> WebViewBuilder<'a> {
    builder.with_custom_protocol(PROTOCOL.to_string(), move |_id, request| {
        asset_response(&provider, &request.uri().to_string())
    })
}

/// Serve a `mosaic://` request from the content provider.
fn asset_response(provider: &ContentProvider, uri: &str) -> Response<Cow<'static, [u8]>> {
    let path = request_path(uri);
    let (status, mime, body) = match provider.resolve(path) {
        Some((mime, data)) => (200, mime.into_owned(), data.into_owned()),
        None => {
            warn!(path = %path, "custom protocol: asset not found");
            (404, "text/plain".to_string(), b"Not Found".to_vec())
        }
    };
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, mime)
        .header("Access-Control-Allow-Origin", "*")
        .body(Cow::Owned(body))
        .unwrap_or_else(|_| Response::new(Cow::Borrowed(&b""[..])))
}
