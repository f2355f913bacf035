//! Graceful shutdown: save the session, then destroy views and windows.

use super::core::MosaicApp;

impl MosaicApp {
    /// Runs once; later calls are no-ops.
    pub(super) fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        tracing::info!("Initiating graceful shutdown");

        self.shell.shutdown();
        self.shell.backend_mut().destroy_all();

        tracing::info!("Graceful shutdown complete");
    }
}
