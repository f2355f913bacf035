/// Configuration for creating a new WebView instance.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL; `about:blank` when unset.
    pub url: Option<String>,
    /// Storage partition. `None` uses the engine's default context.
    pub partition: Option<String>,
    /// Scripts run at document start, after the IPC bridge.
    pub init_scripts: Vec<String>,
    /// Whether the WebView background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    pub user_agent: Option<String>,
    /// Whether the view starts shown.
    pub visible: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            partition: None,
            init_scripts: Vec::new(),
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            visible: true,
        }
    }
}

impl WebViewConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Chrome pages draw over other content.
    pub fn chrome(url: impl Into<String>) -> Self {
        Self {
            transparent: true,
            ..Self::with_url(url)
        }
    }

    pub fn partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = Some(partition.into());
        self
    }

    pub fn init_script(mut self, script: impl Into<String>) -> Self {
        self.init_scripts.push(script.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
