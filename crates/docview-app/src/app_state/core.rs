//! DocviewApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use winit::window::Window;

use docview_config::{ReloadManager, ViewerConfig};
use docview_webview::{WebViewHandle, WebViewManager};

use crate::panel::DocumentPanel;

use super::types::DocumentWatch;

/// Top-level application state.
pub struct DocviewApp {
    pub(super) config: ViewerConfig,
    /// Canonical path of the open document.
    pub(super) document: PathBuf,
    pub(super) viewer_dir: PathBuf,
    /// Text searched for by F3 / Shift+F3.
    pub(super) search: Option<String>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) modifiers: winit::keyboard::ModifiersState,

    // Document WebView
    pub(super) webviews: Option<WebViewManager>,
    pub(super) panel: Option<DocumentPanel<WebViewHandle>>,

    // Background watchers
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) config_rx: Option<watch::Receiver<ViewerConfig>>,
    pub(super) document_watch: Option<DocumentWatch>,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl DocviewApp {
    /// Create the app. With a `config_path`, settings are re-read from it and
    /// watched for changes; `config` is the fallback.
    pub fn new(
        config: ViewerConfig,
        document: PathBuf,
        viewer_dir: PathBuf,
        config_path: Option<PathBuf>,
    ) -> Self {
        let tokio_runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("docview-watch")
            .enable_all()
            .build()
        {
            Ok(rt) => Some(rt),
            Err(e) => {
                tracing::warn!("Failed to start watcher runtime, live reload disabled: {e}");
                None
            }
        };

        let (config, config_rx) = match (&tokio_runtime, config_path) {
            (Some(rt), Some(path)) => {
                let (config, rx) = rt.block_on(ReloadManager::start(path));
                (config, Some(rx))
            }
            _ => (config, None),
        };

        Self {
            config,
            document,
            viewer_dir,
            search: None,
            window: None,
            modifiers: winit::keyboard::ModifiersState::empty(),
            webviews: None,
            panel: None,
            tokio_runtime,
            config_rx,
            document_watch: None,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }
}
