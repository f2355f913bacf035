//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Mosaic Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
#
# Default tab count, layout preset and hotkeys are edited from the
# settings overlay and stored with the session state, not here.

[window]
# width = 1200
# height = 900
# header_height = 80     # 32-200
# background = "#000000"
# title = "Mosaic"

[browser]
# start_page = "mosaic://localhost/start.html"
# search_url = "https://www.google.com/search?q="
# user_agent = "Mozilla/5.0 ..."

[timing]
# resize_debounce_ms = 16
# settle_delay_ms = 150
# layout_delay_ms = 50
# save_debounce_ms = 1000
# autosave_interval_secs = 10   # 1-3600
# cycle_throttle_ms = 120
# loader_timeout_ms = 2000
# highlight_ms = 650

[logging]
# level = "INFO"         # TRACE, DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
