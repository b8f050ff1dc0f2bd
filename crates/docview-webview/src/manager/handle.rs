use wry::WebView;

use crate::error::BusError;
use crate::renderer::RendererContext;

/// Handle to the document WebView.
///
/// Tracks whether a page is loaded: scripts sent while a navigation is in
/// flight would run against a page that is about to be discarded.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) current_url: String,
    pub(super) current_title: String,
    pub(super) loaded: bool,
    pub(super) visible: bool,
}

impl WebViewHandle {
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    /// Navigate to a URL. The handle is not ready until the load finishes.
    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.current_url = url.to_string();
        self.loaded = false;
        self.webview.load_url(url)
    }

    pub fn mark_loading(&mut self) {
        self.loaded = false;
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) -> Result<(), wry::Error> {
        self.webview.set_visible(visible)?;
        self.visible = visible;
        Ok(())
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }
}

impl RendererContext for WebViewHandle {
    fn is_ready(&self) -> bool {
        self.loaded
    }

    fn execute_script(&self, script: &str) -> Result<(), BusError> {
        if !self.loaded {
            return Err(BusError::TransportUnavailable);
        }
        self.webview.evaluate_script(script)?;
        Ok(())
    }
}
