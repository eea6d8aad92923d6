//! Observer registry for playback events
//!
//! Handlers are kept per event kind in registration order and invoked
//! synchronously when an event of that kind is emitted.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{EventKind, PlaybackEvent};

/// A registered event handler
pub type EventHandler = Arc<dyn Fn(&PlaybackEvent) + Send + Sync>;

/// Identifies a registration so it can be removed again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler-{}", self.0)
    }
}

/// Mapping from event kind to its ordered list of handlers
pub struct EventRegistry {
    handlers: RwLock<HashMap<EventKind, Vec<(HandlerId, EventHandler)>>>,
    next_id: AtomicU64,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a handler for one event kind
    pub fn on(&self, kind: EventKind, handler: EventHandler) -> HandlerId {
        let id = self.allocate_id();
        self.handlers
            .write()
            .entry(kind)
            .or_default()
            .push((id, handler));
        id
    }

    /// Register a handler for every event kind
    pub fn on_any(&self, handler: EventHandler) -> HandlerId {
        let id = self.allocate_id();
        let mut handlers = self.handlers.write();
        for kind in EventKind::ALL {
            handlers
                .entry(kind)
                .or_default()
                .push((id, Arc::clone(&handler)));
        }
        id
    }

    /// Remove a registration, returning whether anything was removed
    pub fn off(&self, id: HandlerId) -> bool {
        let mut removed = false;
        for list in self.handlers.write().values_mut() {
            let before = list.len();
            list.retain(|(handler_id, _)| *handler_id != id);
            removed |= list.len() != before;
        }
        removed
    }

    /// Invoke every handler registered for the event's kind, in order
    ///
    /// Handlers run against a snapshot of the registrations, so a handler
    /// may register or remove handlers without deadlocking.
    pub fn emit(&self, event: &PlaybackEvent) {
        let snapshot: Vec<EventHandler> = match self.handlers.read().get(&event.kind()) {
            Some(list) => list.iter().map(|(_, handler)| Arc::clone(handler)).collect(),
            None => return,
        };

        for handler in snapshot {
            handler(event);
        }
    }

    /// Number of handlers registered for a kind
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.read().get(&kind).map_or(0, Vec::len)
    }

    fn allocate_id(&self) -> HandlerId {
        HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read();
        f.debug_struct("EventRegistry")
            .field("handler_count", &handlers.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
