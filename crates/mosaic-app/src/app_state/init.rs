//! Shell and webview setup.

use std::path::{Path, PathBuf};

use mosaic_config::MosaicConfig;
use mosaic_shell::Shell;
use mosaic_webview::{ContentProvider, WebViewManager, WebViewRegistry};

use crate::backend::WinitBackend;

use super::core::MosaicApp;

impl MosaicApp {
    /// Build the shell on a winit backend. `chrome_dir` serves extra or
    /// replacement chrome files ahead of the bundled ones.
    pub fn build_shell(
        config: MosaicConfig,
        state_path: Option<PathBuf>,
        chrome_dir: Option<&Path>,
    ) -> Shell<WinitBackend> {
        let provider = match chrome_dir {
            Some(dir) if dir.is_dir() => {
                tracing::info!(dir = %dir.display(), "serving chrome overrides");
                ContentProvider::with_base_dir(dir)
            }
            Some(dir) => {
                tracing::warn!(dir = %dir.display(), "chrome directory not found, using bundled pages");
                ContentProvider::bundled()
            }
            None => ContentProvider::bundled(),
        };

        let mut manager = WebViewManager::new();
        manager.set_content_provider(provider);
        let registry = WebViewRegistry::new(manager);

        let backend = WinitBackend::new(registry, config.browser.user_agent.clone());
        Shell::new(backend, config, state_path)
    }
}
