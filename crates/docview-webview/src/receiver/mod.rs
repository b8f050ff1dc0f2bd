//! Inbound channel: renderer -> host events.
//!
//! One [`Endpoint`] per subscribable event, allocated up front. Each endpoint
//! holds at most one handler (last registration wins). Frames are dispatched
//! on the thread that owns the receiver; the IPC callback only queues them.
//!
//! Endpoint lifecycle: `Unbound -> Bound -> Bound ... -> Disposed`.

mod endpoint;


use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, warn};

use crate::error::BusError;
use crate::ipc::{self, QueryFrame};
use crate::registry::SubscribableEvent;
use crate::renderer::RendererContext;

pub use endpoint::{QueryHandle, QueryRegistry};

/// Host-side handler for one event. `Some` is sent back as the reply to the
/// renderer call that delivered the event.
pub type Handler<Ctx> = Box<dyn FnMut(&mut Ctx, &str) -> Option<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    Unbound,
    Bound,
    Disposed,
}

/// What happened to one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Endpoint exists but has no handler yet.
    Unbound,
    /// Sent by glue from an earlier injection.
    Stale,
    UnknownEndpoint,
    /// The handler panicked; the panic was contained.
    HandlerFailed,
    Disposed,
}

struct Endpoint<Ctx> {
    handle: QueryHandle,
    handler: Option<Handler<Ctx>>,
}

pub struct MessageEventReceiver<Ctx> {
    endpoints: Vec<Endpoint<Ctx>>,
    queries: QueryRegistry,
    generation: u64,
    disposed: bool,
}

impl<Ctx> MessageEventReceiver<Ctx> {
    /// Allocate one endpoint per distinct event in `events`.
    pub fn from_events(events: &[SubscribableEvent], queries: QueryRegistry) -> Self {
        let mut endpoints: Vec<Endpoint<Ctx>> = Vec::with_capacity(events.len());
        for event in events {
            if endpoints.iter().any(|e| e.handle.event() == *event) {
                continue;
            }
            endpoints.push(Endpoint {
                handle: queries.allocate(*event),
                handler: None,
            });
        }
        Self {
            endpoints,
            queries,
            generation: 0,
            disposed: false,
        }
    }

    /// Register a side-effecting handler for `event`, replacing any previous one.
    pub fn add_handler<F>(&mut self, event: SubscribableEvent, mut handler: F)
    where
        F: FnMut(&mut Ctx, &str) + 'static,
    {
        self.add_handler_with_response(event, move |ctx: &mut Ctx, data: &str| {
            handler(ctx, data);
            None
        });
    }

    /// Register a handler whose return value is replied to the renderer.
    ///
    /// # Panics
    ///
    /// If no endpoint was allocated for `event`. The endpoint set is fixed at
    /// construction, so this is a wiring bug.
    pub fn add_handler_with_response<F>(&mut self, event: SubscribableEvent, handler: F)
    where
        F: FnMut(&mut Ctx, &str) -> Option<String> + 'static,
    {
        let disposed = self.disposed;
        let Some(endpoint) = self.endpoint_mut(event) else {
            panic!("{}", BusError::UnboundEndpoint(event.wire_name()));
        };
        if disposed {
            warn!(
                event = event.wire_name(),
                "handler registered on disposed receiver, ignoring"
            );
            return;
        }
        if endpoint.handler.is_some() {
            debug!(event = event.wire_name(), "replacing event handler");
        }
        endpoint.handler = Some(Box::new(handler));
    }

    /// Route one inbound frame to its handler.
    ///
    /// Never fails: unknown endpoints, stale glue, missing handlers, and
    /// panicking handlers are logged and contained here.
    ///
    /// A frame is accepted only from the glue of the current generation.
    /// An occurrence the page sends after [`inject_subscriptions`] bumped
    /// the generation but before the new glue ran still carries the old
    /// generation and is dropped as [`Delivery::Stale`]: within that window
    /// delivery is at-most-once rather than exactly-once.
    ///
    /// [`inject_subscriptions`]: Self::inject_subscriptions
    pub fn dispatch(
        &mut self,
        ctx: &mut Ctx,
        renderer: &dyn RendererContext,
        frame: &QueryFrame,
    ) -> Delivery {
        if self.disposed {
            debug!(endpoint = frame.endpoint, "frame for disposed receiver ignored");
            return Delivery::Disposed;
        }

        let generation = self.generation;
        let Some(endpoint) = self
            .endpoints
            .iter_mut()
            .find(|e| e.handle.id() == frame.endpoint)
        else {
            warn!(endpoint = frame.endpoint, "frame for unknown endpoint ignored");
            return Delivery::UnknownEndpoint;
        };

        let event = endpoint.handle.event().wire_name();
        if frame.generation != generation {
            debug!(
                event,
                frame_generation = frame.generation,
                generation,
                "frame from stale subscription glue dropped"
            );
            return Delivery::Stale;
        }

        let data = frame.payload_text();
        debug!(event, data, "received event");

        let Some(handler) = endpoint.handler.as_mut() else {
            debug!(event, "no handler bound");
            resolve(renderer, frame, None);
            return Delivery::Unbound;
        };

        match panic::catch_unwind(AssertUnwindSafe(|| handler(ctx, data))) {
            Ok(reply) => {
                resolve(renderer, frame, reply.as_deref());
                Delivery::Delivered
            }
            Err(panic) => {
                error!(
                    event,
                    panic = panic_message(panic.as_ref()),
                    "event handler panicked"
                );
                resolve(renderer, frame, None);
                Delivery::HandlerFailed
            }
        }
    }

    /// (Re)install renderer-side glue for every endpoint. Returns how many
    /// endpoints were injected.
    ///
    /// Run after every navigation: the page's JS state, glue included, is
    /// discarded on reload while endpoints and handlers live on here.
    pub fn inject_subscriptions(&mut self, renderer: &dyn RendererContext) -> usize {
        if self.disposed {
            warn!("inject_subscriptions on disposed receiver ignored");
            return 0;
        }

        self.generation += 1;
        debug!(
            generation = self.generation,
            events = ?self.events().map(|e| e.wire_name()).collect::<Vec<_>>(),
            "injecting subscriptions"
        );

        let mut injected = 0;
        for endpoint in &self.endpoints {
            let event = endpoint.handle.event().wire_name();
            let glue = ipc::js_subscription_glue(event, endpoint.handle.id(), self.generation);
            match renderer.execute_script(&glue) {
                Ok(()) => injected += 1,
                Err(e) => warn!(event, error = %e, "failed to inject subscription"),
            }
        }
        injected
    }

    /// Release every endpoint. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for endpoint in &mut self.endpoints {
            endpoint.handle.release();
            endpoint.handler = None;
        }
        debug!(endpoints = self.endpoints.len(), "receiver disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn state(&self, event: SubscribableEvent) -> Option<EndpointState> {
        let endpoint = self.endpoints.iter().find(|e| e.handle.event() == event)?;
        Some(if self.disposed {
            EndpointState::Disposed
        } else if endpoint.handler.is_some() {
            EndpointState::Bound
        } else {
            EndpointState::Unbound
        })
    }

    /// Query id of `event`'s endpoint.
    pub fn endpoint_id(&self, event: SubscribableEvent) -> Option<u32> {
        self.endpoints
            .iter()
            .find(|e| e.handle.event() == event)
            .map(|e| e.handle.id())
    }

    /// Current injection generation; 0 until the first injection.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn events(&self) -> impl Iterator<Item = SubscribableEvent> + '_ {
        self.endpoints.iter().map(|e| e.handle.event())
    }

    pub fn queries(&self) -> &QueryRegistry {
        &self.queries
    }

    fn endpoint_mut(&mut self, event: SubscribableEvent) -> Option<&mut Endpoint<Ctx>> {
        self.endpoints.iter_mut().find(|e| e.handle.event() == event)
    }
}

impl<Ctx> Drop for MessageEventReceiver<Ctx> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Settle the renderer's pending query, if it is waiting on one.
fn resolve(renderer: &dyn RendererContext, frame: &QueryFrame, reply: Option<&str>) {
    let Some(request) = frame.request else {
        return;
    };
    if !renderer.is_ready() {
        return;
    }
    if let Err(e) = renderer.execute_script(&ipc::js_resolve(request, reply)) {
        warn!(request, error = %e, "failed to send query reply");
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
