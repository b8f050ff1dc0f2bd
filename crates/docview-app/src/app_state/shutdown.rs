//! Graceful shutdown: release the bus, destroy the WebView, stop watchers.

use super::core::DocviewApp;
use super::types::SHUTDOWN_TIMEOUT;

impl DocviewApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Dispose the panel's bus (no more event delivery)
    /// 2. Destroy the WebView
    /// 3. Stop watchers and the runtime they run on
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Some(panel) = self.panel.take() {
            let handle = panel.into_host();
            match &self.webviews {
                Some(manager) => manager.destroy(handle),
                None => drop(handle),
            }
        }
        self.webviews = None;

        self.stop_document_watch();
        self.config_rx = None;
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(SHUTDOWN_TIMEOUT);
        }

        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}
