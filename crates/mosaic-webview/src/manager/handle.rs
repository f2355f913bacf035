use mosaic_common::{Rect, SurfaceId};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::WebView;

use crate::history::NavHistory;

/// Convert window-content coordinates to a wry rectangle.
pub fn to_wry_rect(rect: Rect) -> wry::Rect {
    wry::Rect {
        position: LogicalPosition::new(rect.x, rect.y).into(),
        size: LogicalSize::new(rect.width.max(0.0), rect.height.max(0.0)).into(),
    }
}

/// Handle to a managed WebView instance.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) surface: SurfaceId,
    pub(super) partition: Option<String>,
    pub(super) history: NavHistory,
    /// Next stylesheet key.
    pub(super) next_css: u64,
    pub(super) zoom: f64,
}

impl WebViewHandle {
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn partition(&self) -> Option<&str> {
        self.partition.as_deref()
    }

    /// Current URL as far as navigation events tell.
    pub fn current_url(&self) -> Option<&str> {
        self.history.current()
    }

    pub fn history(&self) -> &NavHistory {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut NavHistory {
        &mut self.history
    }

    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.history.load(url);
        self.webview.load_url(url)
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Reload the previous history entry. Returns `false` at the start.
    pub fn go_back(&mut self) -> Result<bool, wry::Error> {
        match self.history.back().map(str::to_string) {
            Some(url) => self.webview.load_url(&url).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn go_forward(&mut self) -> Result<bool, wry::Error> {
        match self.history.forward().map(str::to_string) {
            Some(url) => self.webview.load_url(&url).map(|()| true),
            None => Ok(false),
        }
    }

    /// Execute JavaScript in the WebView context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Deliver a chrome message to the page's `window.mosaic.ipc` listeners.
    pub fn send_ipc(&self, channel: &str, data: &serde_json::Value) -> Result<(), wry::Error> {
        let script = crate::ipc::js_dispatch_message(channel, data);
        self.webview.evaluate_script(&script)
    }

    /// Add a stylesheet to the current document. The key removes it again.
    pub fn insert_css(&mut self, css: &str) -> Result<u64, wry::Error> {
        let key = self.next_css;
        self.next_css += 1;
        self.webview.evaluate_script(&insert_css_script(key, css))?;
        Ok(key)
    }

    pub fn remove_css(&self, key: u64) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&remove_css_script(key))
    }

    /// Set the WebView bounds within the parent window.
    pub fn set_bounds(&self, bounds: Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(to_wry_rect(bounds))
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), wry::Error> {
        self.webview.set_visible(visible)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    /// Return focus to the parent window.
    pub fn focus_parent(&self) -> Result<(), wry::Error> {
        self.webview.focus_parent()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, scale: f64) -> Result<(), wry::Error> {
        self.zoom = scale;
        self.webview.zoom(scale)
    }

    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}

fn css_element_id(key: u64) -> String {
    format!("mosaic-css-{key}")
}

fn insert_css_script(key: u64, css: &str) -> String {
    let id = css_element_id(key);
    let css = serde_json::Value::from(css);
    format!(
        "(function(){{var s=document.createElement('style');s.id='{id}';s.textContent={css};\
         (document.head||document.documentElement).appendChild(s);}})();"
    )
}

fn remove_css_script(key: u64) -> String {
    let id = css_element_id(key);
    format!("(function(){{var s=document.getElementById('{id}');if(s)s.remove();}})();")
}
