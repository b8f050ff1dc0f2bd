use docview_common::DocviewError;
use docview_webview::{RendererContext, ScriptRecorder, WebViewHandle};

/// A renderer the panel can also navigate and show or hide.
pub trait DocumentHost: RendererContext {
    fn navigate(&mut self, url: &str) -> Result<(), DocviewError>;

    /// Whether scripts should be sent: a page finished loading and no
    /// navigation has started since.
    fn set_loaded(&mut self, loaded: bool);

    fn is_renderer_visible(&self) -> bool;

    fn set_renderer_visible(&mut self, visible: bool);
}

impl DocumentHost for WebViewHandle {
    fn navigate(&mut self, url: &str) -> Result<(), DocviewError> {
        self.load_url(url)
            .map_err(|e| DocviewError::WebView(format!("failed to load {url}: {e}")))
    }

    fn set_loaded(&mut self, loaded: bool) {
        if loaded {
            self.mark_loaded();
        } else {
            self.mark_loading();
        }
    }

    fn is_renderer_visible(&self) -> bool {
        self.is_visible()
    }

    fn set_renderer_visible(&mut self, visible: bool) {
        if let Err(e) = self.set_visible(visible) {
            tracing::warn!(error = %e, visible, "failed to change renderer visibility");
        }
    }
}

/// Headless host: scripts are recorded, navigation only resets readiness.
impl DocumentHost for ScriptRecorder {
    fn navigate(&mut self, _url: &str) -> Result<(), DocviewError> {
        self.set_ready(false);
        Ok(())
    }

    fn set_loaded(&mut self, loaded: bool) {
        self.set_ready(loaded);
    }

    fn is_renderer_visible(&self) -> bool {
        true
    }

    fn set_renderer_visible(&mut self, _visible: bool) {}
}
