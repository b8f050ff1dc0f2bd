//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::DocviewApp;
use super::init::full_bounds;
use super::keys::{action_for_key, ViewerAction};

impl ApplicationHandler for DocviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            self.should_exit = true;
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(panel) = &self.panel {
                        if let Err(e) = panel.host().set_bounds(full_bounds(size)) {
                            tracing::warn!("Failed to resize webview: {e}");
                        }
                    }
                }
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl DocviewApp {
    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        if let Some(action) = action_for_key(&event.logical_key, self.modifiers) {
            self.dispatch(action);
        }
    }

    pub(super) fn dispatch(&mut self, action: ViewerAction) {
        tracing::debug!(?action, "Dispatching action");
        if action == ViewerAction::ReloadDocument {
            self.reload_document();
            return;
        }

        let Some(panel) = &mut self.panel else {
            return;
        };
        match action {
            ViewerAction::PreviousPage => {
                if panel.can_go_previous() {
                    panel.previous_page();
                }
            }
            ViewerAction::NextPage => {
                if panel.can_go_next() {
                    panel.next_page();
                }
            }
            ViewerAction::IncreaseScale => panel.increase_scale(),
            ViewerAction::DecreaseScale => panel.decrease_scale(),
            ViewerAction::PrintDocument => panel.print_document(),
            ViewerAction::DocumentInfo => panel.request_document_info(),
            ViewerAction::ToggleSidebar => panel.toggle_sidebar(),
            ViewerAction::CycleSidebarViewMode => match panel.cycle_sidebar_view_mode() {
                Some(mode) => tracing::info!(mode = mode.display_name(), "Sidebar view changed"),
                None => tracing::info!("No other sidebar view available"),
            },
            ViewerAction::RotateClockwise => panel.rotate_clockwise(),
            ViewerAction::RotateCounterclockwise => panel.rotate_counterclockwise(),
            ViewerAction::CyclePageSpread => {
                let spread = panel.cycle_page_spread();
                tracing::info!(?spread, "Page spread changed");
            }
            ViewerAction::ToggleScrollDirection => {
                let horizontal = panel.toggle_scroll_direction();
                tracing::info!(horizontal, "Scroll direction changed");
            }
            ViewerAction::FindNext | ViewerAction::FindPrevious => {
                let Some(text) = self.search.as_deref() else {
                    tracing::info!("Nothing to search for, start docview with --find <TEXT>");
                    return;
                };
                if action == ViewerAction::FindNext {
                    panel.find_next(text);
                } else {
                    panel.find_previous(text);
                }
            }
            ViewerAction::ReloadDocument => {}
        }
    }

    pub(super) fn reload_document(&mut self) {
        if let Some(panel) = &mut self.panel {
            if let Err(e) = panel.reload_document() {
                tracing::error!("Failed to reload document: {e}");
            }
        }
    }
}
