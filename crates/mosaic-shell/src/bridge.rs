//! Scripts and stylesheets injected into tab surfaces.
//!
//! Tab surfaces run arbitrary web content, so the bridge is kept narrow:
//! it reports clicks (to track the active tab), forwards shortcut keydowns
//! while the page holds keyboard focus, and offers `navigateTo`. Everything
//! goes through `window.ipc.postMessage` as `{kind, payload}` JSON.

use mosaic_common::PageId;

/// Origin of the bundled chrome pages.
pub const CHROME_ORIGIN: &str = "mosaic://localhost/";

/// Stylesheet inserted into the search target while the search box is open.
pub const SEARCH_HIGHLIGHT_CSS: &str =
    "html { outline: 3px solid rgba(90, 160, 255, 0.9) !important; outline-offset: -3px; }";

/// Address of a bundled chrome page.
pub fn chrome_url(page: &str) -> String {
    format!("{CHROME_ORIGIN}{page}")
}

/// True for addresses served locally (file system or bundled chrome).
pub fn is_local_url(url: &str) -> bool {
    url.starts_with("file://") || url.starts_with(CHROME_ORIGIN) || url.starts_with("mosaic:")
}

/// Error page substituted for a failed main-frame load.
pub fn error_page_url(code: i32, description: &str, url: &str) -> String {
    format!(
        "{}?code={}&desc={}&url={}",
        chrome_url("error.html"),
        code,
        urlencoding::encode(description),
        urlencoding::encode(url)
    )
}

/// Content bridge for tab `slot` of `page`. Installing it twice is a no-op.
pub fn tab_bridge_script(page: PageId, slot: usize) -> String {
    format!(
        r#"
(function() {{
    if (window.__mosaicBridge) return;
    window.__mosaicBridge = true;
    var pageId = {page}, tabIndex = {slot};
    function post(kind, payload) {{
        try {{ window.ipc.postMessage(JSON.stringify({{ kind: kind, payload: payload }})); }} catch (e) {{}}
    }}
    function clicked() {{ post('tab-clicked', {{ pageId: pageId, tabIndex: tabIndex }}); }}
    window.addEventListener('pointerdown', clicked, true);
    window.addEventListener('click', clicked, true);
    window.addEventListener('keydown', function(e) {{
        var mod = e.ctrlKey || e.altKey || e.metaKey;
        var special = e.key === 'Escape' || /^F\d+$/.test(e.key);
        if (!mod && !special) return;
        post('keydown', {{ key: e.key, ctrl: e.ctrlKey, alt: e.altKey, shift: e.shiftKey, meta: e.metaKey }});
    }}, true);
    window.mosaic = window.mosaic || {{}};
    window.mosaic.navigateTo = function(url) {{ post('navigate-to', String(url)); }};
}})();
"#,
        page = page.0,
        slot = slot,
    )
}

/// Brief border flash on the activated tab. Removes itself after
/// `duration_ms`.
pub fn highlight_script(duration_ms: u64) -> String {
    format!(
        r#"
(function() {{
    var old = document.getElementById('__mosaic_highlight');
    if (old) old.remove();
    var el = document.createElement('div');
    el.id = '__mosaic_highlight';
    el.style.cssText = 'position:fixed;inset:0;pointer-events:none;z-index:2147483647;' +
        'box-shadow:inset 0 0 0 3px rgba(90,160,255,0.9);transition:opacity {fade}ms ease-out;';
    (document.body || document.documentElement).appendChild(el);
    requestAnimationFrame(function() {{ el.style.opacity = '0'; }});
    setTimeout(function() {{ el.remove(); }}, {duration});
}})();
"#,
        fade = duration_ms,
        duration = duration_ms,
    )
}
