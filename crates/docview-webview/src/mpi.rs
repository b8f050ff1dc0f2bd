//! Message passing interface: one sender and one receiver bound to a
//! renderer instance.

use tracing::warn;

use crate::codec::{self, Payload};
use crate::ipc::QueryFrame;
use crate::receiver::{Delivery, MessageEventReceiver, QueryRegistry};
use crate::registry::{SubscribableEvent, TriggerableEvent};
use crate::renderer::RendererContext;
use crate::sender::MessageEventSender;

/// Typed facade over the bus for one renderer.
///
/// `Ctx` is the state handlers mutate; it is passed into every dispatch
/// rather than captured, so handlers never hold references into the panel
/// that owns this interface.
pub struct MessagePassingInterface<Ctx> {
    sender: MessageEventSender,
    receiver: MessageEventReceiver<Ctx>,
}

impl<Ctx> MessagePassingInterface<Ctx> {
    /// Endpoints for every subscribable event on a fresh query table.
    pub fn new() -> Self {
        Self::with_queries(QueryRegistry::new())
    }

    /// Allocate endpoints in `queries`, which is typically shared with the
    /// IPC callback of the hosting WebView.
    pub fn with_queries(queries: QueryRegistry) -> Self {
        Self {
            sender: MessageEventSender::new(),
            receiver: MessageEventReceiver::from_events(SubscribableEvent::ALL, queries),
        }
    }

    pub fn sender(&self) -> &MessageEventSender {
        &self.sender
    }

    pub fn receiver(&self) -> &MessageEventReceiver<Ctx> {
        &self.receiver
    }

    pub fn receiver_mut(&mut self) -> &mut MessageEventReceiver<Ctx> {
        &mut self.receiver
    }

    pub fn trigger_event(&self, renderer: &dyn RendererContext, event: TriggerableEvent) {
        self.sender.trigger(renderer, event);
    }

    pub fn trigger_event_with<T: Payload>(
        &self,
        renderer: &dyn RendererContext,
        event: TriggerableEvent,
        payload: &T,
    ) {
        self.sender.trigger_with(renderer, event, payload);
    }

    /// Listen for `event`, decoding its payload as `T`.
    ///
    /// Undecodable payloads are logged and skipped; the listener stays
    /// registered.
    pub fn subscribe<T, F>(&mut self, event: SubscribableEvent, mut listener: F)
    where
        T: Payload,
        F: FnMut(&mut Ctx, T) + 'static,
    {
        self.receiver.add_handler(event, move |ctx: &mut Ctx, data: &str| {
            match codec::deserialize::<T>(data) {
                Ok(value) => listener(ctx, value),
                Err(e) => warn!(
                    event = event.wire_name(),
                    data,
                    error = %e,
                    "dropping undecodable event payload"
                ),
            }
        });
    }

    /// Listen for `event`, ignoring its payload.
    pub fn subscribe_signal<F>(&mut self, event: SubscribableEvent, mut listener: F)
    where
        F: FnMut(&mut Ctx) + 'static,
    {
        self.receiver
            .add_handler(event, move |ctx: &mut Ctx, _: &str| listener(ctx));
    }

    /// Listen for `event` with the raw payload text.
    pub fn subscribe_plain<F>(&mut self, event: SubscribableEvent, listener: F)
    where
        F: FnMut(&mut Ctx, &str) + 'static,
    {
        self.receiver.add_handler(event, listener);
    }

    pub fn inject_subscriptions(&mut self, renderer: &dyn RendererContext) -> usize {
        self.receiver.inject_subscriptions(renderer)
    }

    /// Dispatch one IPC body posted by the renderer. `None` if the body is
    /// not a query frame.
    pub fn handle_ipc(
        &mut self,
        ctx: &mut Ctx,
        renderer: &dyn RendererContext,
        body: &str,
    ) -> Option<Delivery> {
        match QueryFrame::from_json(body) {
            Ok(frame) => Some(self.receiver.dispatch(ctx, renderer, &frame)),
            Err(e) => {
                warn!(error = %e, body, "dropping IPC message");
                None
            }
        }
    }

    pub fn dispose(&mut self) {
        self.receiver.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.receiver.is_disposed()
    }
}

impl<Ctx> Default for MessagePassingInterface<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{PageChange, PagesCount};
    use crate::renderer::ScriptRecorder;

    #[derive(Default)]
    struct Viewer {
        page: u32,
        pages: u32,
        focused: u32,
        raw: Vec<String>,
    }

    fn body(mpi: &MessagePassingInterface<Viewer>, event: SubscribableEvent, payload: &str) -> String {
        QueryFrame {
            endpoint: mpi.receiver().endpoint_id(event).unwrap(),
            generation: mpi.receiver().generation(),
            request: None,
            payload: Some(payload.to_string()),
        }
        .to_json()
    }

    fn loaded() -> (MessagePassingInterface<Viewer>, ScriptRecorder) {
        let mut mpi = MessagePassingInterface::new();
        let renderer = ScriptRecorder::ready();
        mpi.inject_subscriptions(&renderer);
        renderer.take();
        (mpi, renderer)
    }

    #[test]
    fn set_page_then_page_changed() {
        let (mut mpi, renderer) = loaded();
        let mut viewer = Viewer::default();
        mpi.subscribe(SubscribableEvent::PageChanged, |v: &mut Viewer, p: PageChange| {
            v.page = p.page_number;
        });

        mpi.trigger_event_with(&renderer, TriggerableEvent::SetPage, &PageChange { page_number: 5 });
        assert_eq!(
            renderer.function_calls(),
            vec![("setPage".to_string(), Some(r#"{"pageNumber":5}"#.to_string()))]
        );

        // Renderer reports the page it landed on
        let b = body(&mpi, SubscribableEvent::PageChanged, r#"{"pageNumber":5}"#);
        assert_eq!(mpi.handle_ipc(&mut viewer, &renderer, &b), Some(Delivery::Delivered));
        assert_eq!(viewer.page, 5);
    }

    #[test]
    fn undecodable_payload_skips_listener_once() {
        let (mut mpi, renderer) = loaded();
        let mut viewer = Viewer::default();
        mpi.subscribe(SubscribableEvent::PagesCount, |v: &mut Viewer, c: PagesCount| {
            v.pages = c.count;
        });

        let bad = body(&mpi, SubscribableEvent::PagesCount, r#"{"count":"many"}"#);
        mpi.handle_ipc(&mut viewer, &renderer, &bad);
        assert_eq!(viewer.pages, 0);

        let good = body(&mpi, SubscribableEvent::PagesCount, r#"{"count":12}"#);
        mpi.handle_ipc(&mut viewer, &renderer, &good);
        assert_eq!(viewer.pages, 12);
    }

    #[test]
    fn signal_ignores_payload() {
        let (mut mpi, renderer) = loaded();
        let mut viewer = Viewer::default();
        mpi.subscribe_signal(SubscribableEvent::FrameFocused, |v: &mut Viewer| v.focused += 1);
        let b = body(&mpi, SubscribableEvent::FrameFocused, "not even json");
        mpi.handle_ipc(&mut viewer, &renderer, &b);
        assert_eq!(viewer.focused, 1);
    }

    #[test]
    fn plain_receives_raw_text() {
        let (mut mpi, renderer) = loaded();
        let mut viewer = Viewer::default();
        mpi.subscribe_plain(SubscribableEvent::DocumentLoadError, |v: &mut Viewer, data: &str| {
            v.raw.push(data.to_string());
        });
        let b = body(&mpi, SubscribableEvent::DocumentLoadError, "Missing PDF");
        mpi.handle_ipc(&mut viewer, &renderer, &b);
        assert_eq!(viewer.raw, vec!["Missing PDF".to_string()]);
    }

    #[test]
    fn malformed_ipc_body_is_dropped() {
        let (mut mpi, renderer) = loaded();
        let mut viewer = Viewer::default();
        mpi.subscribe(SubscribableEvent::PageChanged, |v: &mut Viewer, p: PageChange| {
            v.page = p.page_number;
        });
        assert_eq!(mpi.handle_ipc(&mut viewer, &renderer, "{broken"), None);

        let b = body(&mpi, SubscribableEvent::PageChanged, r#"{"pageNumber":2}"#);
        mpi.handle_ipc(&mut viewer, &renderer, &b);
        assert_eq!(viewer.page, 2);
    }

    #[test]
    fn dispose_silences_listeners() {
        let (mut mpi, renderer) = loaded();
        let mut viewer = Viewer::default();
        mpi.subscribe_signal(SubscribableEvent::FrameFocused, |v: &mut Viewer| v.focused += 1);
        let b = body(&mpi, SubscribableEvent::FrameFocused, "");

        mpi.dispose();
        assert!(mpi.is_disposed());
        assert!(mpi.receiver().queries().is_empty());
        assert_eq!(mpi.handle_ipc(&mut viewer, &renderer, &b), Some(Delivery::Disposed));
        assert_eq!(viewer.focused, 0);
    }

    #[test]
    fn triggers_before_load_are_dropped() {
        let mpi: MessagePassingInterface<Viewer> = MessagePassingInterface::new();
        let renderer = ScriptRecorder::new();
        mpi.trigger_event(&renderer, TriggerableEvent::PrintDocument);
        assert!(renderer.scripts().is_empty());
    }
}
