//! Settings and document watchers.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use docview_config::{FileWatcher, ViewerConfig};

use crate::theme::resolve_theme;

use super::core::DocviewApp;
use super::types::DocumentWatch;

impl DocviewApp {
    /// Watch the open document for changes on disk.
    pub(super) fn start_document_watch(&mut self) {
        if self.document_watch.is_some() {
            return;
        }
        let Some(rt) = &self.tokio_runtime else {
            tracing::warn!("No runtime, document auto-reload unavailable");
            return;
        };
        let watcher = match FileWatcher::new(self.document.clone()) {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!("Failed to watch document: {e}");
                return;
            }
        };

        let (tx, changes) = broadcast::channel(4);
        let task = rt.spawn(async move {
            if let Err(e) = watcher.watch(tx).await {
                tracing::error!("Document watcher error: {e}");
            }
        });
        tracing::info!(path = %self.document.display(), "Document auto-reload enabled");
        self.document_watch = Some(DocumentWatch { task, changes });
    }

    pub(super) fn stop_document_watch(&mut self) {
        if self.document_watch.take().is_some() {
            tracing::info!("Document auto-reload disabled");
        }
    }

    /// Reload the document if it changed on disk since the last poll.
    pub(super) fn poll_document_changes(&mut self) {
        let Some(watch) = &mut self.document_watch else {
            return;
        };

        let mut changed = false;
        let mut closed = false;
        loop {
            match watch.changes.try_recv() {
                Ok(()) | Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Closed) => {
                    closed = true;
                    break;
                }
            }
        }

        if closed {
            tracing::warn!("Document watcher stopped");
            self.document_watch = None;
        }
        if changed {
            tracing::info!("Document changed on disk, reloading");
            self.reload_document();
        }
    }

    /// Apply settings published by the config reload manager.
    pub(super) fn poll_config_changes(&mut self) {
        let Some(rx) = &mut self.config_rx else {
            return;
        };
        match rx.has_changed() {
            Ok(true) => {}
            Ok(false) => return,
            Err(_) => {
                tracing::debug!("Config reload channel closed");
                self.config_rx = None;
                return;
            }
        }
        let config = rx.borrow_and_update().clone();
        self.apply_config(config);
    }

    pub(super) fn apply_config(&mut self, config: ViewerConfig) {
        tracing::info!("Applying reloaded settings");
        if config.logging.level != self.config.logging.level {
            tracing::info!("Log level changes take effect on restart");
        }

        if let Some(panel) = &mut self.panel {
            panel.set_theme(resolve_theme(&config));
        }

        if config.document.auto_reload {
            self.start_document_watch();
        } else {
            self.stop_document_watch();
        }

        self.config = config;
    }
}
