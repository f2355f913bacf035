//! WebView layer for Mosaic surfaces.
//!
//! Wraps the `wry` crate to provide:
//! - One managed WebView per shell surface (header, tabs, overlays)
//! - Per-page browsing partitions backed by their own data directory
//! - Bidirectional IPC (Rust <-> JavaScript)
//! - The `mosaic://` protocol serving the bundled chrome pages
//! - Navigation history and scoped stylesheet tracking

pub mod content;
pub mod events;
pub mod history;
pub mod ipc;
pub mod manager;

pub use content::ContentProvider;
pub use events::{PageLoadState, WebViewEvent};
pub use history::NavHistory;
pub use ipc::IpcMessage;
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager, WebViewRegistry};

/// Errors raised while creating or driving a WebView.
#[derive(Debug, thiserror::Error)]
pub enum WebViewError {
    #[error("webview error: {0}")]
    Wry(#[from] wry::Error),

    #[error("partition error: {0}")]
    Partition(#[from] mosaic_common::PlatformError),

    #[error("unknown surface {0}")]
    UnknownSurface(mosaic_common::SurfaceId),
}
