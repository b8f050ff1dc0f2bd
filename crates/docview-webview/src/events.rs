//! WebView event types.

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the document WebView, queued from wry callbacks and
/// drained on the event loop thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebViewEvent {
    PageLoad { state: PageLoadState, url: String },
    TitleChanged { title: String },
    /// A query frame posted by the renderer. Only bodies addressed to a
    /// live endpoint are queued.
    IpcMessage { body: String },
    /// A navigation the allowlist blocked.
    NavigationBlocked { url: String },
    Closed,
}
