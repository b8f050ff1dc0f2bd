//! Panel state and the subscriptions that keep it current.

use docview_common::{Notification, NotificationAction, NotificationQueue};
use docview_webview::codec;
use docview_webview::messages::{
    DocumentInfo, DocumentLoadError, PageChange, PageSpreadState, PagesCount,
    SidebarAvailableViewModes, SidebarViewState, SidebarViewStateChange,
};
use docview_webview::{MessagePassingInterface, SubscribableEvent};
use tracing::{debug, warn};

const NOTIFICATION_CAPACITY: usize = 8;

/// Shown when the renderer reports a failure without saying what failed.
const UNKNOWN_LOAD_ERROR: &str = "Unknown error while opening the document";

/// What the host knows about the renderer's document view.
///
/// Only the bus subscriptions below and the panel's own actions write to it.
#[derive(Debug)]
pub struct PanelState {
    /// 1-based.
    pub current_page: u32,
    /// 0 until the renderer reports a count.
    pub pages_count: u32,
    pub page_spread: PageSpreadState,
    pub scroll_horizontal: bool,
    pub sidebar_state: SidebarViewState,
    pub available_view_modes: SidebarAvailableViewModes,
    pub document_info: Option<DocumentInfo>,
    /// Set while the error fallback replaces the renderer.
    pub load_error: Option<String>,
    pub renderer_visible: bool,
    pub focus_requested: bool,
    pub notifications: NotificationQueue,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            current_page: 1,
            pages_count: 0,
            page_spread: PageSpreadState::None,
            scroll_horizontal: true,
            sidebar_state: SidebarViewState::default(),
            available_view_modes: SidebarAvailableViewModes::default(),
            document_info: None,
            load_error: None,
            renderer_visible: true,
            focus_requested: false,
            notifications: NotificationQueue::new(NOTIFICATION_CAPACITY),
        }
    }
}

impl PanelState {
    pub fn can_go_next(&self) -> bool {
        self.pages_count > 0 && self.current_page < self.pages_count
    }

    pub fn can_go_previous(&self) -> bool {
        self.pages_count > 0 && self.current_page > 1
    }

    /// Consume a pending focus request from the renderer.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    fn show_load_error(&mut self, message: String) {
        warn!(message = %message, "document failed to load");
        self.load_error = Some(message);
        self.renderer_visible = false;
        self.notifications.push(
            Notification::error("Could not open document!", "Failed to open selected document!")
                .with_action(NotificationAction::ReloadDocument),
        );
    }
}

/// Wire every subscribable event to its state update.
pub(super) fn subscribe_all(mpi: &mut MessagePassingInterface<PanelState>) {
    mpi.subscribe(SubscribableEvent::PageChanged, |state: &mut PanelState, p: PageChange| {
        state.current_page = p.page_number;
    });

    mpi.subscribe(SubscribableEvent::PagesCount, |state: &mut PanelState, c: PagesCount| {
        state.pages_count = c.count;
    });

    mpi.subscribe(SubscribableEvent::DocumentInfo, |state: &mut PanelState, info: DocumentInfo| {
        state
            .notifications
            .push(Notification::info("Document Info", document_info_summary(&info)));
        state.document_info = Some(info);
    });

    mpi.subscribe_signal(SubscribableEvent::FrameFocused, |state: &mut PanelState| {
        state.focus_requested = true;
    });

    mpi.subscribe(
        SubscribableEvent::SidebarViewStateChanged,
        |state: &mut PanelState, change: SidebarViewStateChange| match change.state() {
            Ok(sidebar) => state.sidebar_state = sidebar,
            Err(e) => warn!(error = %e, "ignoring sidebar state with unknown view mode"),
        },
    );

    mpi.subscribe(
        SubscribableEvent::SidebarAvailableViewsChanged,
        |state: &mut PanelState, modes: SidebarAvailableViewModes| {
            state.available_view_modes = modes;
        },
    );

    // The renderer also fires this with no data on spurious rejections;
    // only a non-empty payload is a real failure.
    mpi.subscribe_plain(SubscribableEvent::DocumentLoadError, |state: &mut PanelState, data: &str| {
        if data.is_empty() {
            debug!("empty document load error ignored");
            return;
        }
        state.show_load_error(load_error_message(data));
    });
}

/// Human-readable message from a load error payload, which may be a
/// structured object, a JSON string, or bare text. Never blank.
fn load_error_message(data: &str) -> String {
    let message = match codec::deserialize::<DocumentLoadError>(data) {
        Ok(error) => error.message,
        Err(_) => serde_json::from_str::<String>(data).unwrap_or_else(|_| data.to_string()),
    };
    if message.trim().is_empty() {
        UNKNOWN_LOAD_ERROR.to_string()
    } else {
        message
    }
}

fn document_info_summary(info: &DocumentInfo) -> String {
    info.entries()
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
