use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::registry::SubscribableEvent;

#[derive(Debug, Default)]
struct Routes {
    next_id: u32,
    by_id: HashMap<u32, SubscribableEvent>,
}

/// Query id -> event routing table shared with the IPC callback.
///
/// Written only when endpoints are allocated or released; the IPC thread
/// only reads it to reject frames for endpoints that no longer exist.
#[derive(Debug, Clone, Default)]
pub struct QueryRegistry {
    routes: Arc<RwLock<Routes>>,
}

impl QueryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate(&self, event: SubscribableEvent) -> QueryHandle {
        let id = match self.routes.write() {
            Ok(mut routes) => {
                routes.next_id += 1;
                let id = routes.next_id;
                routes.by_id.insert(id, event);
                id
            }
            // A poisoned table routes nothing; the handle still releases cleanly
            Err(_) => 0,
        };
        debug!(event = event.wire_name(), id, "query endpoint allocated");
        QueryHandle {
            id,
            event,
            registry: self.clone(),
            released: false,
        }
    }

    /// The event routed to query `id`, if it is still live.
    pub fn lookup(&self, id: u32) -> Option<SubscribableEvent> {
        self.routes.read().ok()?.by_id.get(&id).copied()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.lookup(id).is_some()
    }

    /// Number of live query endpoints.
    pub fn len(&self) -> usize {
        self.routes.read().map(|r| r.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, id: u32) {
        if let Ok(mut routes) = self.routes.write() {
            routes.by_id.remove(&id);
        }
    }
}

/// Exclusive owner of one renderer-callable query endpoint.
///
/// Released exactly once, either explicitly or on drop.
#[derive(Debug)]
pub struct QueryHandle {
    id: u32,
    event: SubscribableEvent,
    registry: QueryRegistry,
    released: bool,
}

impl QueryHandle {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn event(&self) -> SubscribableEvent {
        self.event
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Unregister the endpoint. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.registry.release(self.id);
        debug!(event = self.event.wire_name(), id = self.id, "query endpoint released");
        true
    }
}

impl Drop for QueryHandle {
    fn drop(&mut self) {
        self.release();
    }
}
