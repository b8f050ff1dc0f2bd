//! WebView lifecycle management.
//!
//! `WebViewManager` creates the `wry::WebView` hosting the document renderer
//! and collects its callbacks as [`WebViewEvent`]s for the event loop.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;
use crate::receiver::QueryRegistry;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

pub struct WebViewManager {
    /// Event sink: wry callbacks push, the main event loop drains.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    /// Live query endpoints; IPC bodies for anything else are dropped early.
    queries: QueryRegistry,
    content_provider: Option<Arc<ContentProvider>>,
}

impl WebViewManager {
    pub fn new(queries: QueryRegistry) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            queries,
            content_provider: None,
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn queries(&self) -> &QueryRegistry {
        &self.queries
    }

    /// Destroy a WebView and report it closed.
    pub fn destroy(&self, handle: WebViewHandle) {
        drop(handle);
        if let Ok(mut events) = self.events.lock() {
            events.push(WebViewEvent::Closed);
        }
    }
}
