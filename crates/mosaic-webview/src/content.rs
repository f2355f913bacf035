//! Local content serving via the `mosaic://` custom protocol.
//!
//! The chrome pages (header, overlays, start and error pages) are compiled
//! into the binary. A base directory may be layered underneath for extra
//! assets during development.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Chrome pages compiled into the binary, by request path.
const BUNDLED: &[(&str, &str)] = &[
    ("header.html", include_str!("../../../assets/chrome/header.html")),
    ("popup.html", include_str!("../../../assets/chrome/popup.html")),
    ("delete-mode.html", include_str!("../../../assets/chrome/delete-mode.html")),
    ("search-box.html", include_str!("../../../assets/chrome/search-box.html")),
    ("settings.html", include_str!("../../../assets/chrome/settings.html")),
    ("start.html", include_str!("../../../assets/chrome/start.html")),
    ("error.html", include_str!("../../../assets/chrome/error.html")),
    ("chrome.css", include_str!("../../../assets/chrome/chrome.css")),
];

/// Resolves `mosaic://localhost/<path>` requests to bytes and a MIME type.
///
/// In-memory entries win over files under `base_dir`.
pub struct ContentProvider {
    base_dir: Option<PathBuf>,
    overrides: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl ContentProvider {
    /// Provider serving only the bundled chrome pages.
    pub fn bundled() -> Self {
        let mut provider = Self {
            base_dir: None,
            overrides: HashMap::new(),
        };
        for (path, body) in BUNDLED {
            let mime = mime_from_extension(Path::new(path));
            provider.add_override(*path, mime, body.as_bytes());
        }
        provider
    }

    /// Bundled pages plus files under `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            ..Self::bundled()
        }
    }

    /// Register an in-memory asset.
    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        self.overrides
            .insert(path.into(), (mime.into(), data.into()));
    }

    /// Resolve a request path (query string allowed) to MIME type and bytes.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path
            .split(['?', '#'])
            .next()
            .unwrap_or("")
            .trim_start_matches('/');

        if let Some((mime, data)) = self.overrides.get(clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        let base_dir = self.base_dir.as_ref()?;
        let file_path = base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape.
        let canonical_base = std::fs::canonicalize(base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        let mime = mime_from_extension(&file_path);
        Some((Cow::Owned(mime.to_string()), Cow::Owned(data)))
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

/// Request path of a `mosaic://` URI. WebView2 rewrites custom schemes to
/// `http://mosaic.localhost/`, so that form is accepted too.
pub fn request_path(uri: &str) -> &str {
    uri.strip_prefix("mosaic://localhost/")
        .or_else(|| uri.strip_prefix("mosaic://localhost"))
        .or_else(|| uri.strip_prefix("http://mosaic.localhost/"))
        .or_else(|| uri.strip_prefix("mosaic:///"))
        .or_else(|| uri.strip_prefix("mosaic://"))
        .unwrap_or("")
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
