//! Turning search-box input into an address.

/// Resolve a query typed into the search box.
///
/// `http://`/`https://` input is used as-is; input containing a dot and no
/// space is treated as a host and gets `https://`; anything else is
/// appended, percent-encoded, to `search_url`. Blank input yields `None`.
pub fn resolve_query(query: &str, search_url: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if query.starts_with("http://") || query.starts_with("https://") {
        return Some(query.to_string());
    }
    if query.contains('.') && !query.contains(' ') {
        return Some(format!("https://{query}"));
    }
    Some(format!("{search_url}{}", urlencoding::encode(query)))
}
