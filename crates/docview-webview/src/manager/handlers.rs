use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};
use crate::ipc::QueryFrame;
use crate::receiver::QueryRegistry;

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Allowed URL prefixes for navigation. Everything else is blocked.
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "docview://",
    // WebView2 rewrites docview://localhost/… to http://docview.localhost/…
    "http://docview.localhost/",
    "about:blank",
];

pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

/// Whether an IPC body is a query frame for a live endpoint.
pub fn accepts_ipc_body(queries: &QueryRegistry, body: &str) -> bool {
    match QueryFrame::from_json(body) {
        Ok(frame) => queries.contains(frame.endpoint),
        Err(_) => false,
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        queries: QueryRegistry,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if !accepts_ipc_body(&queries, &body) {
                warn!(
                    body_len = body.len(),
                    "IPC message rejected: not a frame for a live endpoint"
                );
                return;
            }

            debug!(body_len = body.len(), "IPC message from renderer");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::IpcMessage { body });
            }
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::PageLoad { state, url });
            }
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(title = %title, "title changed");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::TitleChanged { title });
            }
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if is_navigation_allowed(&url) {
                debug!(url = %url, "navigation allowed");
                return true;
            }

            warn!(url = %url, "navigation blocked: URL not in allowlist");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::NavigationBlocked { url });
            }
            false
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SubscribableEvent;

    #[test]
    fn allows_docview_protocol() {
        assert!(is_navigation_allowed(
            "docview://localhost/viewer/index.html?file=%2Fget-file%2Fa.pdf"
        ));
    }

    #[test]
    fn allows_webview2_rewritten_custom_protocol() {
        assert!(is_navigation_allowed(
            "http://docview.localhost/viewer/index.html"
        ));
    }

    #[test]
    fn allows_about_blank() {
        assert!(is_navigation_allowed("about:blank"));
    }

    #[test]
    fn blocks_remote_origins() {
        assert!(!is_navigation_allowed("https://example.com/paper.pdf"));
        assert!(!is_navigation_allowed("http://localhost:8080"));
        assert!(!is_navigation_allowed("http://docview.localhost.evil.com/"));
    }

    #[test]
    fn blocks_file_and_script_schemes() {
        assert!(!is_navigation_allowed("file:///etc/passwd"));
        assert!(!is_navigation_allowed("javascript:alert(1)"));
        assert!(!is_navigation_allowed("data:text/html,<h1>x</h1>"));
    }

    #[test]
    fn blocks_empty_and_garbage() {
        assert!(!is_navigation_allowed(""));
        assert!(!is_navigation_allowed("not-a-url"));
    }

    #[test]
    fn ipc_filter_requires_live_endpoint() {
        let queries = QueryRegistry::new();
        let mut handle = queries.allocate(SubscribableEvent::PageChanged);
        let body = QueryFrame {
            endpoint: handle.id(),
            generation: 1,
            request: None,
            payload: None,
        }
        .to_json();

        assert!(accepts_ipc_body(&queries, &body));
        assert!(!accepts_ipc_body(&queries, "{\"kind\":\"ping\"}"));
        assert!(!accepts_ipc_body(&queries, "garbage"));

        handle.release();
        assert!(!accepts_ipc_body(&queries, &body));
    }
}
