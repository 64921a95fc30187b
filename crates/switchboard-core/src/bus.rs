//! In-process publish/subscribe hub.
//!
//! `emit` invokes every subscriber whose filter matches the event, in
//! registration order across kind and wildcard subscriptions, and only then
//! returns. Handlers run synchronously; a handler that needs async work
//! forwards the event into a channel (see `subscribe_channel`).

use std::sync::Arc;

use switchboard_types::{EventKind, UiEvent};
use tokio::sync::mpsc;

/// Event handler callback.
pub type EventHandler = Arc<dyn Fn(&UiEvent) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    /// `None` receives every event.
    kind: Option<EventKind>,
    handler: EventHandler,
}

impl Subscriber {
    fn wants(&self, kind: EventKind) -> bool {
        self.kind.is_none_or(|wanted| wanted == kind)
    }
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, kind: Option<EventKind>, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push(Subscriber { id, kind, handler });
        id
    }

    /// Subscribes `handler` to a single event kind.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&UiEvent) + Send + Sync + 'static,
    {
        self.add(Some(kind), Arc::new(handler))
    }

    /// Subscribes `handler` to every event.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&UiEvent) + Send + Sync + 'static,
    {
        self.add(None, Arc::new(handler))
    }

    /// Subscribes a channel to an event kind (`None` = every event).
    ///
    /// Events are cloned into the channel; if the receiver is dropped the
    /// subscription stays registered but becomes a no-op.
    pub fn subscribe_channel(
        &mut self,
        kind: Option<EventKind>,
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let forward = move |event: &UiEvent| {
            let _ = tx.send(event.clone());
        };
        (self.add(kind, Arc::new(forward)), rx)
    }

    /// Removes a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.subscribers.iter().position(|s| s.id == id) {
            Some(pos) => {
                self.subscribers.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of handlers that would see an event of `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.iter().filter(|s| s.wants(kind)).count()
    }

    /// Dispatches `event` to its subscribers before returning.
    pub fn emit(&self, event: UiEvent) {
        let kind = event.kind();
        tracing::trace!(event = %kind, "emit");

        for subscriber in self.subscribers.iter().filter(|s| s.wants(kind)) {
            (subscriber.handler)(&event);
        }
    }
}
