use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use wry::http::{HeaderValue, Response, StatusCode};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{ContentProvider, ORIGIN, SCHEME};
use crate::ipc::IPC_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the document WebView as a child of `window`, positioned at
    /// `bounds`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_focused(true)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&self.events), self.queries.clone());
        builder = Self::attach_page_load_handler(builder, Arc::clone(&self.events));
        builder = Self::attach_title_handler(builder, Arc::clone(&self.events));
        builder = Self::attach_navigation_handler(builder, Arc::clone(&self.events));
        builder = self.attach_custom_protocol(builder);

        let initial_url = config.url.unwrap_or_else(|| "about:blank".to_string());
        builder = builder.with_url(&initial_url);

        let webview = builder.build_as_child(window)?;
        debug!(url = %initial_url, "WebView created");

        Ok(WebViewHandle {
            webview,
            current_url: initial_url,
            current_title: String::new(),
            loaded: false,
            visible: true,
        })
    }

    /// Serve `docview://` requests from `provider`. Takes effect for WebViews
    /// created afterwards.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    fn attach_custom_protocol<'a>(&self, builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        let Some(provider) = &self.content_provider else {
            return builder;
        };
        let cp = Arc::clone(provider);
        builder.with_custom_protocol(SCHEME.to_string(), move |_wv_id, request| {
            let path = request.uri().path();
            match cp.resolve(path) {
                Some((mime, data)) => respond(StatusCode::OK, &mime, data),
                None => {
                    warn!(path = %path, "custom protocol: content not found");
                    respond(StatusCode::NOT_FOUND, "text/plain", b"Not Found".to_vec())
                }
            }
        })
    }
}

fn respond(status: StatusCode, mime: &str, data: Vec<u8>) -> Response<Cow<'static, [u8]>> {
    let mut response = Response::new(Cow::Owned(data));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime) {
        headers.insert(CONTENT_TYPE, value);
    }
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ORIGIN));
    response
}
