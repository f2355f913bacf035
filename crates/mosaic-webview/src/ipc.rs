//! IPC protocol between Rust and the pages hosted in Mosaic surfaces.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: pages call `window.mosaic.ipc.send(kind, payload)`,
//!   which posts `{kind, payload}` through wry's `window.ipc.postMessage`.
//! - **Rust -> JS**: Rust evaluates `window.mosaic.ipc._dispatch(channel, data)`
//!   and the page's registered handler for `channel` runs.

use serde::{Deserialize, Serialize};

/// A message from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    /// Event name, e.g. `add-page` or `tab-clicked`.
    pub kind: String,
    /// Arbitrary JSON payload; `null` when the page sent none.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcMessage {
    /// Parse a raw `postMessage` body.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Installed into every surface before any page script runs.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    if (window.mosaic && window.mosaic.ipc) return;
    window.mosaic = window.mosaic || {};
    window.mosaic.ipc = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        },
        _handlers: {},
        on: function(channel, callback) {
            this._handlers[channel] = callback;
        },
        _dispatch: function(channel, data) {
            var handler = this._handlers[channel];
            if (handler) {
                handler(data);
            }
        }
    };
})();
"#;

/// JS snippet delivering `data` to the page's handler for `channel`.
pub fn js_dispatch_message(channel: &str, data: &serde_json::Value) -> String {
    let data_json = serde_json::to_string(data).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.mosaic && window.mosaic.ipc._dispatch({}, {});",
        serde_json::to_string(channel).unwrap_or_else(|_| "\"unknown\"".to_string()),
        data_json,
    )
}
