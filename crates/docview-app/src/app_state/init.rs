//! Window creation and document WebView setup.

use std::path::Path;
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use docview_webview::{ContentProvider, QueryRegistry, WebViewConfig, WebViewManager};

use crate::panel::DocumentPanel;
use crate::theme::resolve_theme;

use super::core::DocviewApp;

impl DocviewApp {
    /// Create the window and the document WebView.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(window_title(&self.document, None))
            .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 800.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        if !self.initialize_webview(&window) {
            return false;
        }

        if self.config.document.auto_reload {
            self.start_document_watch();
        }

        self.window = Some(window);
        tracing::info!("Window created and document view initialized");
        true
    }

    /// Serve the renderer bundle and the document, create the WebView, and
    /// start loading.
    fn initialize_webview(&mut self, window: &Window) -> bool {
        if !self.viewer_dir.join("index.html").is_file() {
            tracing::warn!(
                path = %self.viewer_dir.display(),
                "Renderer bundle not found, the document view will stay empty"
            );
        }

        let mut content = ContentProvider::new(&self.viewer_dir);
        if let Err(e) = content.allow_document(&self.document) {
            tracing::error!(path = %self.document.display(), "Cannot open document: {e}");
            return false;
        }

        let queries = QueryRegistry::new();
        let mut manager = WebViewManager::new(queries.clone());
        manager.set_content_provider(content);

        let handle = match manager.create(window, full_bounds(window.inner_size()), WebViewConfig::default()) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!("Failed to create webview: {e}");
                return false;
            }
        };

        let mut panel = DocumentPanel::new(
            handle,
            self.document.clone(),
            queries,
            resolve_theme(&self.config),
        );
        if let Err(e) = panel.reload_document() {
            tracing::error!("Failed to load document: {e}");
        }

        self.panel = Some(panel);
        self.webviews = Some(manager);
        tracing::info!(viewer_dir = %self.viewer_dir.display(), "Document WebView initialized");
        true
    }
}

/// WebView bounds covering the whole window.
pub(super) fn full_bounds(size: PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}

/// `"<file name> - docview"`, or with the renderer's document title.
pub(super) fn window_title(document: &Path, title: Option<&str>) -> String {
    let name = document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| document.display().to_string());
    match title {
        Some(t) if !t.is_empty() && t != name => format!("{t} ({name}) - docview"),
        _ => format!("{name} - docview"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_file_name() {
        assert_eq!(window_title(Path::new("/docs/paper.pdf"), None), "paper.pdf - docview");
        assert_eq!(
            window_title(Path::new("/docs/paper.pdf"), Some("paper.pdf")),
            "paper.pdf - docview"
        );
    }

    #[test]
    fn title_with_document_title() {
        assert_eq!(
            window_title(Path::new("/docs/paper.pdf"), Some("On Computable Numbers")),
            "On Computable Numbers (paper.pdf) - docview"
        );
    }

    #[test]
    fn bounds_cover_window() {
        let bounds = full_bounds(PhysicalSize::new(800, 600));
        assert_eq!(
            bounds.size,
            wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(800, 600))
        );
    }
}
