//! The document panel: owns the bus for one renderer and turns UI actions
//! into triggers.

mod host;
mod state;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use docview_common::DocviewError;
use docview_config::schema::ResolvedTheme;
use docview_webview::content::viewer_url_for;
use docview_webview::messages::{
    PageChange, PageSpreadState, Search, SetThemeColors, SidebarViewMode, SidebarViewModeChange,
    SidebarViewState,
};
use docview_webview::{
    Delivery, MessagePassingInterface, PageLoadState, QueryRegistry, ReloadGuard, TriggerableEvent,
};
use tracing::{debug, info, warn};

pub use host::DocumentHost;
pub use state::PanelState;

pub struct DocumentPanel<H: DocumentHost> {
    host: H,
    mpi: MessagePassingInterface<PanelState>,
    guard: ReloadGuard,
    state: PanelState,
    document: PathBuf,
    theme: ResolvedTheme,
}

impl<H: DocumentHost> DocumentPanel<H> {
    /// Wire up a panel for `document`. Nothing loads until
    /// [`reload_document`](Self::reload_document).
    pub fn new(host: H, document: PathBuf, queries: QueryRegistry, theme: ResolvedTheme) -> Self {
        let mut mpi = MessagePassingInterface::with_queries(queries);
        state::subscribe_all(&mut mpi);
        Self {
            host,
            mpi,
            guard: ReloadGuard::new(),
            state: PanelState::default(),
            document,
            theme,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give up the host, e.g. to destroy the WebView on shutdown.
    pub fn into_host(mut self) -> H {
        self.dispose();
        self.host
    }

    pub fn document(&self) -> &Path {
        &self.document
    }

    pub fn bus(&self) -> &MessagePassingInterface<PanelState> {
        &self.mpi
    }

    // -- Loading ------------------------------------------------------------

    /// Drop any error fallback and (re)load the document into the renderer.
    pub fn reload_document(&mut self) -> Result<(), DocviewError> {
        self.state.load_error = None;
        self.state.renderer_visible = true;
        self.host.set_renderer_visible(true);

        let url = viewer_url_for(&self.document);
        debug!(url = %url, "loading document");
        self.guard.set_target(url.clone());
        self.host.navigate(&url)
    }

    /// Feed a page load notification from the host. Returns `true` when the
    /// load completed the current target and subscriptions were re-injected.
    pub fn on_page_load(&mut self, state: PageLoadState, url: &str) -> bool {
        match state {
            PageLoadState::Started => {
                self.guard.on_load_started();
                self.host.set_loaded(false);
                false
            }
            PageLoadState::Finished => {
                if !self.guard.on_load_finished(url) {
                    return false;
                }
                self.host.set_loaded(true);

                // The new page has no glue and none of the host's state
                let injected = self.mpi.inject_subscriptions(&self.host);
                self.update_page_number(self.state.current_page);
                self.push_theme();
                info!(injected, page = self.state.current_page, "document loaded");
                true
            }
        }
    }

    /// Dispatch one IPC body from the renderer.
    pub fn handle_ipc(&mut self, body: &str) -> Option<Delivery> {
        let delivery = self.mpi.handle_ipc(&mut self.state, &self.host, body);
        self.sync_visibility();
        delivery
    }

    fn sync_visibility(&mut self) {
        if self.host.is_renderer_visible() != self.state.renderer_visible {
            self.host.set_renderer_visible(self.state.renderer_visible);
        }
    }

    // -- Page navigation ----------------------------------------------------

    pub fn next_page(&self) {
        self.trigger(TriggerableEvent::GotoNextPage);
    }

    pub fn previous_page(&self) {
        self.trigger(TriggerableEvent::GotoPreviousPage);
    }

    pub fn set_current_page(&mut self, page: u32) {
        self.state.current_page = page;
        self.update_page_number(page);
    }

    pub fn can_go_next(&self) -> bool {
        self.state.can_go_next()
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.can_go_previous()
    }

    fn update_page_number(&self, page: u32) {
        self.mpi.trigger_event_with(
            &self.host,
            TriggerableEvent::SetPage,
            &PageChange { page_number: page },
        );
    }

    // -- View -----------------------------------------------------------------

    pub fn increase_scale(&self) {
        self.trigger(TriggerableEvent::IncreaseScale);
    }

    pub fn decrease_scale(&self) {
        self.trigger(TriggerableEvent::DecreaseScale);
    }

    pub fn rotate_clockwise(&self) {
        self.trigger(TriggerableEvent::RotateClockwise);
    }

    pub fn rotate_counterclockwise(&self) {
        self.trigger(TriggerableEvent::RotateCounterclockwise);
    }

    pub fn print_document(&self) {
        self.trigger(TriggerableEvent::PrintDocument);
    }

    /// Ask the renderer for document properties; they arrive as a
    /// `DocumentInfo` event.
    pub fn request_document_info(&self) {
        self.trigger(TriggerableEvent::GetDocumentInfo);
    }

    pub fn toggle_sidebar(&self) {
        self.trigger(TriggerableEvent::ToggleSidebar);
    }

    pub fn set_sidebar_view_mode(&mut self, mode: SidebarViewMode) {
        self.state.sidebar_state = SidebarViewState {
            mode,
            hidden: self.state.sidebar_state.hidden,
        };
        self.mpi.trigger_event_with(
            &self.host,
            TriggerableEvent::SetSidebarViewMode,
            &SidebarViewModeChange::from_mode(mode),
        );
    }

    /// Switch the sidebar to the next view mode the renderer offers.
    /// Returns `None`, and sends nothing, when no other mode is available.
    pub fn cycle_sidebar_view_mode(&mut self) -> Option<SidebarViewMode> {
        let modes = SidebarViewMode::ALL;
        let current = modes
            .iter()
            .position(|m| *m == self.state.sidebar_state.mode)
            .unwrap_or(0);
        let available = self.state.available_view_modes;
        let next = (1..modes.len())
            .map(|step| modes[(current + step) % modes.len()])
            .find(|m| available.is_view_mode_available(*m))?;
        self.set_sidebar_view_mode(next);
        Some(next)
    }

    pub fn page_spread(&self) -> PageSpreadState {
        self.state.page_spread
    }

    pub fn set_page_spread(&mut self, spread: PageSpreadState) {
        if self.state.page_spread == spread {
            return;
        }
        self.state.page_spread = spread;
        self.trigger(spread.trigger_event());
    }

    pub fn cycle_page_spread(&mut self) -> PageSpreadState {
        let next = self.state.page_spread.next();
        self.set_page_spread(next);
        next
    }

    /// Flip between horizontal and vertical scrolling. Returns whether
    /// scrolling is now horizontal.
    pub fn toggle_scroll_direction(&mut self) -> bool {
        self.trigger(TriggerableEvent::ToggleScrollDirection);
        self.state.scroll_horizontal = !self.state.scroll_horizontal;
        self.state.scroll_horizontal
    }

    // -- Search -----------------------------------------------------------------

    pub fn find_next(&self, text: &str) {
        self.find(TriggerableEvent::FindNext, text);
    }

    pub fn find_previous(&self, text: &str) {
        self.find(TriggerableEvent::FindPrevious, text);
    }

    fn find(&self, event: TriggerableEvent, text: &str) {
        if text.is_empty() {
            return;
        }
        self.mpi.trigger_event_with(
            &self.host,
            event,
            &Search {
                search_target: text.to_string(),
            },
        );
    }

    // -- Theme ------------------------------------------------------------------

    pub fn theme(&self) -> ResolvedTheme {
        self.theme
    }

    /// Replace the theme and push it to the renderer.
    pub fn set_theme(&mut self, theme: ResolvedTheme) {
        self.theme = theme;
        self.push_theme();
    }

    fn push_theme(&self) {
        self.mpi.trigger_event_with(
            &self.host,
            TriggerableEvent::SetThemeColors,
            &SetThemeColors::from_colors(self.theme.background, self.theme.foreground, self.theme.icons),
        );
    }

    fn trigger(&self, event: TriggerableEvent) {
        self.mpi.trigger_event(&self.host, event);
    }

    /// Release the bus. The panel stays usable as a value but no longer
    /// receives events.
    pub fn dispose(&mut self) {
        if self.mpi.is_disposed() {
            return;
        }
        self.mpi.dispose();
        if self.guard.is_loading() {
            warn!("panel disposed while a load was in flight");
        }
    }
}
