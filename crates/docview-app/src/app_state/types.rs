//! Internal types and constants for the app state module.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// How often to poll for events (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// How long background tasks get to finish on shutdown.
pub(super) const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// A running watch on the open document.
pub(super) struct DocumentWatch {
    pub(super) task: JoinHandle<()>,
    pub(super) changes: broadcast::Receiver<()>,
}

impl Drop for DocumentWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
