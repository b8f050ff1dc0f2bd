//! Polling for WebView events, settings reloads, and document changes.

use std::time::Instant;

use winit::event_loop::ActiveEventLoop;

use docview_common::{NotificationAction, NotificationLevel};
use docview_webview::WebViewEvent;

use super::core::DocviewApp;
use super::init::window_title;
use super::types::POLL_INTERVAL;

impl DocviewApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
            self.poll_config_changes();
            self.poll_document_changes();
            self.show_notifications();
        }

        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            Instant::now() + POLL_INTERVAL,
        ));
    }

    /// Drain WebView callbacks and feed them to the panel, on this thread.
    fn poll_webview_events(&mut self) {
        let events = match &self.webviews {
            Some(manager) => manager.drain_events(),
            None => return,
        };
        let Some(panel) = &mut self.panel else {
            return;
        };

        for event in events {
            match event {
                WebViewEvent::PageLoad { state, url } => {
                    panel.on_page_load(state, &url);
                }
                WebViewEvent::IpcMessage { body } => {
                    panel.handle_ipc(&body);
                }
                WebViewEvent::TitleChanged { title } => {
                    if let Some(window) = &self.window {
                        window.set_title(&window_title(&self.document, Some(&title)));
                    }
                    panel.host_mut().set_title(title);
                }
                WebViewEvent::NavigationBlocked { url } => {
                    tracing::debug!(url = %url, "Renderer navigation blocked");
                }
                WebViewEvent::Closed => {
                    tracing::info!("Document WebView closed");
                }
            }
        }

        if panel.state_mut().take_focus_request() {
            if let Err(e) = panel.host().focus() {
                tracing::warn!("Failed to focus webview: {e}");
            }
        }
    }

    /// Surface panel notifications through the log and the window title.
    fn show_notifications(&mut self) {
        let Some(panel) = &mut self.panel else {
            return;
        };
        for notification in panel.state_mut().notifications.drain() {
            match notification.level {
                NotificationLevel::Error => {
                    tracing::error!(body = %notification.body, "{}", notification.title)
                }
                NotificationLevel::Warning => {
                    tracing::warn!(body = %notification.body, "{}", notification.title)
                }
                _ => tracing::info!(body = %notification.body, "{}", notification.title),
            }

            if let Some(NotificationAction::ReloadDocument) = notification.action {
                tracing::info!(
                    "Press F5 to run \"{}\"",
                    NotificationAction::ReloadDocument.label()
                );
                if let Some(window) = &self.window {
                    window.set_title(&window_title(&self.document, Some(&notification.title)));
                }
            }
        }
    }
}
