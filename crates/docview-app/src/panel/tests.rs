use std::cell::RefCell;

use docview_common::{Color, NotificationAction, NotificationLevel};
use docview_config::ThemeConfig;
use docview_webview::messages::{PageSpreadState, SidebarViewMode};
use docview_webview::{BusError, QueryFrame, RendererContext, ScriptRecorder, SubscribableEvent};

use super::*;

/// Records scripts like [`ScriptRecorder`] and also navigations and
/// visibility changes.
#[derive(Default)]
struct FakeHost {
    recorder: ScriptRecorder,
    navigations: Vec<String>,
    visible: bool,
    visibility_changes: RefCell<u32>,
}

impl RendererContext for FakeHost {
    fn is_ready(&self) -> bool {
        self.recorder.is_ready()
    }

    fn execute_script(&self, script: &str) -> Result<(), BusError> {
        self.recorder.execute_script(script)
    }
}

impl DocumentHost for FakeHost {
    fn navigate(&mut self, url: &str) -> Result<(), DocviewError> {
        self.navigations.push(url.to_string());
        self.recorder.set_ready(false);
        Ok(())
    }

    fn set_loaded(&mut self, loaded: bool) {
        self.recorder.set_ready(loaded);
    }

    fn is_renderer_visible(&self) -> bool {
        self.visible
    }

    fn set_renderer_visible(&mut self, visible: bool) {
        *self.visibility_changes.borrow_mut() += 1;
        self.visible = visible;
    }
}

fn theme() -> ResolvedTheme {
    ThemeConfig::default().resolve(Color::from_rgb(43, 43, 43), Color::from_rgb(187, 187, 187))
}

fn panel() -> DocumentPanel<FakeHost> {
    let host = FakeHost {
        visible: true,
        ..FakeHost::default()
    };
    DocumentPanel::new(host, PathBuf::from("/docs/paper.pdf"), QueryRegistry::new(), theme())
}

/// A panel whose document finished loading, with the load's scripts drained.
fn loaded_panel() -> DocumentPanel<FakeHost> {
    let mut panel = panel();
    panel.reload_document().unwrap();
    let url = panel.host().navigations[0].clone();
    assert!(panel.on_page_load(PageLoadState::Finished, &url));
    panel.host().recorder.take();
    panel
}

fn event_body(panel: &DocumentPanel<FakeHost>, event: SubscribableEvent, payload: Option<&str>) -> String {
    let receiver = panel.bus().receiver();
    QueryFrame {
        endpoint: receiver.endpoint_id(event).unwrap(),
        generation: receiver.generation(),
        request: None,
        payload: payload.map(str::to_string),
    }
    .to_json()
}

fn calls(panel: &DocumentPanel<FakeHost>) -> Vec<(String, Option<String>)> {
    panel.host().recorder.function_calls()
}

fn call_names(panel: &DocumentPanel<FakeHost>) -> Vec<String> {
    calls(panel).into_iter().map(|(name, _)| name).collect()
}

// -- Loading -----------------------------------------------------------------

#[test]
fn reload_navigates_to_viewer_url() {
    let mut panel = panel();
    panel.reload_document().unwrap();
    assert_eq!(
        panel.host().navigations,
        vec![viewer_url_for(Path::new("/docs/paper.pdf"))]
    );
    assert!(!panel.host().is_ready());
}

#[test]
fn finished_load_injects_then_restores_page_and_theme() {
    let mut panel = panel();
    panel.state_mut().current_page = 4;
    panel.reload_document().unwrap();
    let url = panel.host().navigations[0].clone();

    assert!(panel.on_page_load(PageLoadState::Finished, &url));

    let scripts = panel.host().recorder.scripts();
    let glue = SubscribableEvent::ALL.len();
    assert!(scripts[..glue].iter().all(|s| s.contains("subscribeToMessageEvent")));
    assert_eq!(
        call_names(&panel),
        vec!["setPage".to_string(), "setThemeColors".to_string()]
    );
    assert_eq!(calls(&panel)[0].1.as_deref(), Some(r#"{"pageNumber":4}"#));
}

#[test]
fn superseded_load_is_ignored() {
    let mut panel = panel();
    panel.reload_document().unwrap();
    assert!(!panel.on_page_load(PageLoadState::Finished, "about:blank"));
    assert!(!panel.host().is_ready());
    assert!(panel.host().recorder.scripts().is_empty());
}

#[test]
fn load_start_marks_renderer_not_ready() {
    let mut panel = loaded_panel();
    panel.on_page_load(PageLoadState::Started, "docview://localhost/viewer/index.html");
    panel.next_page();
    assert!(panel.host().recorder.scripts().is_empty());
}

#[test]
fn reload_twice_delivers_events_once() {
    let mut panel = loaded_panel();
    let stale = event_body(&panel, SubscribableEvent::PageChanged, Some(r#"{"pageNumber":9}"#));

    panel.reload_document().unwrap();
    let url = panel.host().navigations[1].clone();
    panel.on_page_load(PageLoadState::Finished, &url);

    assert_eq!(panel.handle_ipc(&stale), Some(Delivery::Stale));
    assert_eq!(panel.state().current_page, 1);

    let fresh = event_body(&panel, SubscribableEvent::PageChanged, Some(r#"{"pageNumber":9}"#));
    assert_eq!(panel.handle_ipc(&fresh), Some(Delivery::Delivered));
    assert_eq!(panel.state().current_page, 9);
}

// -- Subscriptions -------------------------------------------------------------

#[test]
fn page_and_count_events_update_state() {
    let mut panel = loaded_panel();
    let body = event_body(&panel, SubscribableEvent::PagesCount, Some(r#"{"count":10}"#));
    panel.handle_ipc(&body);
    let body = event_body(&panel, SubscribableEvent::PageChanged, Some(r#"{"pageNumber":10}"#));
    panel.handle_ipc(&body);

    assert_eq!(panel.state().pages_count, 10);
    assert_eq!(panel.state().current_page, 10);
    assert!(!panel.can_go_next());
    assert!(panel.can_go_previous());
}

#[test]
fn malformed_count_is_skipped_then_recovers() {
    let mut panel = loaded_panel();
    let bad = event_body(&panel, SubscribableEvent::PagesCount, Some("{\"count\":"));
    panel.handle_ipc(&bad);
    assert_eq!(panel.state().pages_count, 0);

    let good = event_body(&panel, SubscribableEvent::PagesCount, Some(r#"{"count":3}"#));
    panel.handle_ipc(&good);
    assert_eq!(panel.state().pages_count, 3);
}

#[test]
fn empty_load_error_is_ignored() {
    let mut panel = loaded_panel();
    let body = event_body(&panel, SubscribableEvent::DocumentLoadError, None);
    panel.handle_ipc(&body);

    assert!(panel.state().load_error.is_none());
    assert!(panel.state().renderer_visible);
    assert!(panel.state().notifications.is_empty());
    assert_eq!(*panel.host().visibility_changes.borrow(), 1);
}

#[test]
fn load_error_shows_fallback_with_one_notification() {
    let mut panel = loaded_panel();
    let body = event_body(&panel, SubscribableEvent::DocumentLoadError, Some("\"Missing PDF\""));
    panel.handle_ipc(&body);

    assert_eq!(panel.state().load_error.as_deref(), Some("Missing PDF"));
    assert!(!panel.state().renderer_visible);
    assert!(!panel.host().is_renderer_visible());

    let notifications = panel.state_mut().notifications.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(notifications[0].action, Some(NotificationAction::ReloadDocument));

    // Retrying clears the fallback
    panel.reload_document().unwrap();
    assert!(panel.state().load_error.is_none());
    assert!(panel.host().is_renderer_visible());
}

#[test]
fn document_info_is_stored_and_announced() {
    let mut panel = loaded_panel();
    let body = event_body(
        &panel,
        SubscribableEvent::DocumentInfo,
        Some(r#"{"fileName":"paper.pdf","author":"N. Wirth"}"#),
    );
    panel.handle_ipc(&body);

    let info = panel.state().document_info.clone().unwrap();
    assert_eq!(info.file_name, "paper.pdf");
    assert_eq!(info.author, "N. Wirth");
    assert_eq!(panel.state().notifications.count_level(NotificationLevel::Info), 1);
}

#[test]
fn frame_focus_sets_request() {
    let mut panel = loaded_panel();
    let body = event_body(&panel, SubscribableEvent::FrameFocused, None);
    panel.handle_ipc(&body);
    assert!(panel.state_mut().take_focus_request());
}

#[test]
fn sidebar_events_update_state() {
    let mut panel = loaded_panel();
    let body = event_body(
        &panel,
        SubscribableEvent::SidebarViewStateChanged,
        Some(r#"{"mode":"bookmarks","hidden":true}"#),
    );
    panel.handle_ipc(&body);
    let body = event_body(
        &panel,
        SubscribableEvent::SidebarAvailableViewsChanged,
        Some(r#"{"bookmarks":true}"#),
    );
    panel.handle_ipc(&body);

    let state = panel.state();
    assert_eq!(state.sidebar_state.mode, SidebarViewMode::Bookmarks);
    assert!(state.sidebar_state.hidden);
    assert!(state.available_view_modes.thumbnails);
    assert!(state.available_view_modes.bookmarks);
    assert!(!state.available_view_modes.attachments);
}

#[test]
fn unknown_sidebar_mode_is_ignored() {
    let mut panel = loaded_panel();
    let body = event_body(
        &panel,
        SubscribableEvent::SidebarViewStateChanged,
        Some(r#"{"mode":"outline","hidden":true}"#),
    );
    panel.handle_ipc(&body);
    assert_eq!(panel.state().sidebar_state, SidebarViewState::default());
}

// -- Actions -------------------------------------------------------------------

#[test]
fn set_current_page_sends_set_page() {
    let mut panel = loaded_panel();
    panel.set_current_page(5);
    assert_eq!(panel.state().current_page, 5);
    assert_eq!(
        calls(&panel),
        vec![("setPage".to_string(), Some(r#"{"pageNumber":5}"#.to_string()))]
    );
}

#[test]
fn simple_actions_map_to_triggers() {
    let panel = loaded_panel();
    panel.next_page();
    panel.previous_page();
    panel.increase_scale();
    panel.decrease_scale();
    panel.rotate_clockwise();
    panel.rotate_counterclockwise();
    panel.print_document();
    panel.request_document_info();
    panel.toggle_sidebar();
    assert_eq!(
        call_names(&panel),
        vec![
            "nextPage",
            "previousPage",
            "increaseScale",
            "decreaseScale",
            "rotateClockwise",
            "rotateCounterclockwise",
            "printDocument",
            "getDocumentInfo",
            "toggleSidebar",
        ]
    );
}

#[test]
fn sidebar_view_mode_keeps_hidden_flag() {
    let mut panel = loaded_panel();
    panel.state_mut().sidebar_state.hidden = true;
    panel.set_sidebar_view_mode(SidebarViewMode::Attachments);
    assert_eq!(
        panel.state().sidebar_state,
        SidebarViewState {
            mode: SidebarViewMode::Attachments,
            hidden: true
        }
    );
    assert_eq!(
        calls(&panel),
        vec![(
            "setSidebarViewMode".to_string(),
            Some(r#"{"mode":"attachments"}"#.to_string())
        )]
    );
}

#[test]
fn page_spread_only_triggers_on_change() {
    let mut panel = loaded_panel();
    panel.set_page_spread(PageSpreadState::None);
    assert!(calls(&panel).is_empty());

    panel.set_page_spread(PageSpreadState::Odd);
    panel.set_page_spread(PageSpreadState::Odd);
    panel.set_page_spread(PageSpreadState::Even);
    assert_eq!(call_names(&panel), vec!["spreadOddPages", "spreadEvenPages"]);
    assert_eq!(panel.page_spread(), PageSpreadState::Even);
}

#[test]
fn sidebar_mode_cycles_through_available_modes_only() {
    let mut panel = loaded_panel();
    // Only thumbnails by default
    assert_eq!(panel.cycle_sidebar_view_mode(), None);
    assert!(calls(&panel).is_empty());

    let body = event_body(
        &panel,
        SubscribableEvent::SidebarAvailableViewsChanged,
        Some(r#"{"attachments":true}"#),
    );
    panel.handle_ipc(&body);
    assert_eq!(panel.cycle_sidebar_view_mode(), Some(SidebarViewMode::Attachments));
    assert_eq!(panel.cycle_sidebar_view_mode(), Some(SidebarViewMode::Thumbnails));
    assert_eq!(
        calls(&panel),
        vec![
            ("setSidebarViewMode".to_string(), Some(r#"{"mode":"attachments"}"#.to_string())),
            ("setSidebarViewMode".to_string(), Some(r#"{"mode":"thumbs"}"#.to_string())),
        ]
    );
}

#[test]
fn page_spread_cycles() {
    let mut panel = loaded_panel();
    assert_eq!(panel.cycle_page_spread(), PageSpreadState::Odd);
    assert_eq!(panel.cycle_page_spread(), PageSpreadState::Even);
    assert_eq!(panel.cycle_page_spread(), PageSpreadState::None);
    assert_eq!(
        call_names(&panel),
        vec!["spreadOddPages", "spreadEvenPages", "spreadNone"]
    );
}

#[test]
fn scroll_direction_toggles() {
    let mut panel = loaded_panel();
    assert!(!panel.toggle_scroll_direction());
    assert!(panel.toggle_scroll_direction());
    assert_eq!(call_names(&panel), vec!["toggleScrollDirection"; 2]);
}

#[test]
fn search_skips_empty_text() {
    let panel = loaded_panel();
    panel.find_next("");
    panel.find_previous("");
    assert!(calls(&panel).is_empty());

    panel.find_next("lemma");
    panel.find_previous("lemma");
    assert_eq!(
        calls(&panel),
        vec![
            ("findNext".to_string(), Some(r#"{"searchTarget":"lemma"}"#.to_string())),
            ("findPrevious".to_string(), Some(r#"{"searchTarget":"lemma"}"#.to_string())),
        ]
    );
}

#[test]
fn set_theme_pushes_colors() {
    let mut panel = loaded_panel();
    let custom = ResolvedTheme {
        background: Color::from_rgb(255, 255, 255),
        foreground: Color::from_rgb(0, 0, 0),
        icons: Color::from_rgb(255, 0, 0),
    };
    panel.set_theme(custom);
    assert_eq!(panel.theme(), custom);
    let (name, arg) = calls(&panel).remove(0);
    assert_eq!(name, "setThemeColors");
    let arg = arg.unwrap();
    assert!(arg.contains("rgba(255, 255, 255, 1)"));
    assert!(arg.contains("rgba(255, 0, 0, 1)"));
}

#[test]
fn actions_before_load_are_dropped() {
    let mut panel = panel();
    panel.next_page();
    panel.set_current_page(3);
    panel.find_next("x");
    assert!(panel.host().recorder.scripts().is_empty());
    // Local state still tracks the request and is pushed on load
    assert_eq!(panel.state().current_page, 3);
}

#[test]
fn dispose_stops_event_delivery() {
    let mut panel = loaded_panel();
    let body = event_body(&panel, SubscribableEvent::PageChanged, Some(r#"{"pageNumber":2}"#));
    panel.dispose();
    panel.dispose();
    assert_eq!(panel.handle_ipc(&body), Some(Delivery::Disposed));
    assert_eq!(panel.state().current_page, 1);
}

#[test]
fn blank_load_error_gets_a_message() {
    let mut panel = loaded_panel();
    let body = event_body(&panel, SubscribableEvent::DocumentLoadError, Some(r#""""#));
    panel.handle_ipc(&body);
    let error = panel.state().load_error.clone().unwrap();
    assert!(!error.is_empty());
    assert!(!panel.host().visible);
}
