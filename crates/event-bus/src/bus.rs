//! # Event Bus
//!
//! This module defines the `EventBus`, the registry of handlers keyed by topic, and the
//! synchronous dispatch loop that delivers one event to every handler for its topic.

use crate::error::BusError;
use crate::event::BusEvent;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// What a handler returns. Errors are reported back to the publisher, never propagated.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

type Handler<E> = Arc<dyn Fn(&E) -> HandlerResult + Send + Sync>;

type HandlerTable<E> = HashMap<<E as BusEvent>::Topic, Vec<(SubscriptionId, Handler<E>)>>;

/// Handle returned by [`EventBus::subscribe`]; pass it to [`EventBus::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}

/// Outcome of a single [`EventBus::publish`] call.
#[derive(Debug)]
pub struct Delivery<T> {
    /// Topic the event was published on.
    pub topic: T,
    /// Number of handlers that ran to completion without error.
    pub delivered: usize,
    /// Handlers that returned an error or panicked, in invocation order.
    pub failures: Vec<(SubscriptionId, BusError)>,
}

impl<T> Delivery<T> {
    /// True when every handler succeeded (including the zero-handler case).
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Registry<E: BusEvent> {
    handlers: RwLock<HandlerTable<E>>,
    next_id: AtomicU64,
}

/// A typed, in-memory publish/subscribe channel.
///
/// # Architecture Note
/// The bus is a thin handle around a shared registry. Cloning it is cheap and every clone
/// sees the same subscriptions, so a composition root can create one bus and hand clones to
/// each component that publishes or listens. There is no global instance.
///
/// **Dispatch Model**:
/// `publish` runs on the caller's thread. It captures the handler list for the topic,
/// releases the lock, then calls each handler in registration order. Because the lock is
/// not held during dispatch, a handler may itself publish or subscribe.
pub struct EventBus<E: BusEvent> {
    registry: Arc<Registry<E>>,
}

impl<E: BusEvent> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.read();
        f.debug_struct("EventBus")
            .field("topics", &table.len())
            .field("subscriptions", &table.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl<E: BusEvent> EventBus<E> {
    /// Creates an empty bus with no subscriptions.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                handlers: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Registers `handler` for `topic`. Handlers for the same topic run in the order
    /// they were registered.
    pub fn subscribe<F>(&self, topic: E::Topic, handler: F) -> SubscriptionId
    where
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.registry.next_id.fetch_add(1, Ordering::SeqCst));
        let mut table = self.write();
        let handlers = table.entry(topic).or_default();
        handlers.push((id, Arc::new(handler)));
        info!(%topic, %id, subscribers = handlers.len(), "Subscribed");
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut table = self.write();
        for (topic, handlers) in table.iter_mut() {
            if let Some(index) = handlers.iter().position(|(sub, _)| *sub == id) {
                handlers.remove(index);
                info!(%topic, %id, subscribers = handlers.len(), "Unsubscribed");
                return true;
            }
        }
        debug!(%id, "Unsubscribe for unknown subscription");
        false
    }

    /// Number of handlers currently registered for `topic`.
    pub fn subscriber_count(&self, topic: E::Topic) -> usize {
        self.read().get(&topic).map_or(0, Vec::len)
    }

    /// Delivers `event` to every handler registered for its topic and returns once all
    /// of them have run.
    ///
    /// Publishing on a topic with no subscribers is a no-op. A failing or panicking
    /// handler is recorded in the returned [`Delivery`] and does not stop the others.
    pub fn publish(&self, event: E) -> Delivery<E::Topic> {
        let topic = event.topic();
        let handlers: Vec<(SubscriptionId, Handler<E>)> =
            self.read().get(&topic).cloned().unwrap_or_default();
        debug!(%topic, subscribers = handlers.len(), ?event, "Publish");

        let mut delivery = Delivery {
            topic,
            delivered: 0,
            failures: Vec::new(),
        };

        for (id, handler) in handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(Ok(())) => delivery.delivered += 1,
                Ok(Err(e)) => {
                    warn!(%topic, %id, error = %e, "Handler failed");
                    delivery.failures.push((id, BusError::HandlerFailed(e)));
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(%topic, %id, panic = %message, "Handler panicked");
                    delivery.failures.push((id, BusError::HandlerPanicked(message)));
                }
            }
        }

        delivery
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HandlerTable<E>> {
        self.registry
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HandlerTable<E>> {
        self.registry
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
