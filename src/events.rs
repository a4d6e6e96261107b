//! Events Module
//!
//! Synchronous observer registry used by a cache manager to decouple its
//! overflow and garbage-collection policies from the call sites that
//! trigger them.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

// == Cache Event ==
/// Signals raised by cache writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A write to `context` was rejected for lack of capacity
    Exceeded { context: String },
    /// A write to `context` completed and the context may need trimming
    Garbage { context: String },
}

impl CacheEvent {
    /// Wire name of the signal.
    pub fn name(&self) -> &'static str {
        match self {
            CacheEvent::Exceeded { .. } => "cache_exceeded",
            CacheEvent::Garbage { .. } => "cache_garbage",
        }
    }

    /// Context the signal is scoped to.
    pub fn context(&self) -> &str {
        match self {
            CacheEvent::Exceeded { context } | CacheEvent::Garbage { context } => context,
        }
    }
}

impl fmt::Display for CacheEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.context())
    }
}

// == Subscription ==
/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&CacheEvent)>;

// == Event Bus ==
/// Ordered list of listeners, dispatched synchronously.
///
/// `publish` runs every listener on the caller's stack before returning.
/// Listeners may publish, subscribe or unsubscribe while being dispatched;
/// such changes apply from the next `publish` on.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    // == Subscribe ==
    /// Registers a listener called for every published event.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&CacheEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    // == Unsubscribe ==
    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    // == Publish ==
    /// Calls every listener, in subscription order, with `event`.
    pub fn publish(&self, event: &CacheEvent) {
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        trace!(event = %event, listeners = snapshot.len(), "Publishing cache event");
        for listener in snapshot {
            listener(event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.len())
            .finish()
    }
}
