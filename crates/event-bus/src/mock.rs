//! # Recorders & Testing Guide
//!
//! The [`EventRecorder<E>`] type subscribes to a set of topics and keeps every event it
//! receives, in delivery order. It lets you assert on *what a component announced* without
//! writing ad-hoc `Arc<Mutex<Vec<_>>>` plumbing in every test.
//!
//! ## When to use a Recorder vs a Custom Handler
//!
//! | Feature | EventRecorder | Custom handler |
//! |---------|---------------|----------------|
//! | **Setup** | One line | Closure + shared state |
//! | **Ordering checks** | Built in (`expect_next`) | Manual |
//! | **Failure injection** | No | Yes (return `Err` or panic) |
//! | **Use Case** | Asserting published facts | Testing handler isolation |
//!
//! ## Example
//!
//! ```rust
//! use event_bus::mock::EventRecorder;
//! use event_bus::{BusEvent, EventBus};
//! use std::fmt;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Door { Opened, Closed }
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum DoorTopic { Opened, Closed }
//! impl fmt::Display for DoorTopic {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{self:?}") }
//! }
//! impl BusEvent for Door {
//!     type Topic = DoorTopic;
//!     fn topic(&self) -> DoorTopic {
//!         match self { Door::Opened => DoorTopic::Opened, Door::Closed => DoorTopic::Closed }
//!     }
//! }
//!
//! let bus = EventBus::<Door>::new();
//! let recorder = EventRecorder::attach(&bus, [DoorTopic::Opened, DoorTopic::Closed]);
//!
//! bus.publish(Door::Opened);
//! bus.publish(Door::Closed);
//!
//! assert_eq!(recorder.expect_next(DoorTopic::Opened), Some(Door::Opened));
//! assert_eq!(recorder.expect_next(DoorTopic::Closed), Some(Door::Closed));
//! recorder.verify_empty();
//! ```

use crate::bus::{EventBus, SubscriptionId};
use crate::event::BusEvent;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Captures events published on a bus for later assertions.
///
/// Dropping the recorder does not unsubscribe it; call [`EventRecorder::detach`] when the
/// bus outlives the test scope.
pub struct EventRecorder<E: BusEvent> {
    bus: EventBus<E>,
    events: Arc<Mutex<VecDeque<E>>>,
    subscriptions: Vec<SubscriptionId>,
}

impl<E: BusEvent> EventRecorder<E> {
    /// Subscribes a recorder to every topic in `topics`.
    pub fn attach(bus: &EventBus<E>, topics: impl IntoIterator<Item = E::Topic>) -> Self {
        let events = Arc::new(Mutex::new(VecDeque::new()));
        let subscriptions = topics
            .into_iter()
            .map(|topic| {
                let sink = Arc::clone(&events);
                bus.subscribe(topic, move |event: &E| {
                    lock(&sink).push_back(event.clone());
                    Ok(())
                })
            })
            .collect();

        Self {
            bus: bus.clone(),
            events,
            subscriptions,
        }
    }

    /// All recorded events, oldest first. Does not consume them.
    pub fn events(&self) -> Vec<E> {
        lock(&self.events).iter().cloned().collect()
    }

    /// Topics of all recorded events, oldest first.
    pub fn topics(&self) -> Vec<E::Topic> {
        lock(&self.events).iter().map(BusEvent::topic).collect()
    }

    /// Drains and returns every recorded event.
    pub fn take(&self) -> Vec<E> {
        lock(&self.events).drain(..).collect()
    }

    /// Pops the oldest event if it was published on `topic`.
    ///
    /// Returns `None` (and leaves the queue alone) when the queue is empty or the oldest
    /// event belongs to another topic.
    pub fn expect_next(&self, topic: E::Topic) -> Option<E> {
        let mut events = lock(&self.events);
        match events.front() {
            Some(event) if event.topic() == topic => events.pop_front(),
            _ => None,
        }
    }

    /// Discards recorded events until one on `topic` is found, and returns it.
    pub fn skip_to(&self, topic: E::Topic) -> Option<E> {
        let mut events = lock(&self.events);
        while let Some(event) = events.pop_front() {
            if event.topic() == topic {
                return Some(event);
            }
        }
        None
    }

    /// Number of recorded events not yet consumed.
    pub fn len(&self) -> usize {
        lock(&self.events).len()
    }

    /// True when no events are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Asserts that every recorded event was consumed.
    pub fn verify_empty(&self) {
        let events = lock(&self.events);
        if !events.is_empty() {
            let topics: Vec<String> = events.iter().map(|e| e.topic().to_string()).collect();
            panic!("Not all events were consumed. Remaining: {topics:?}");
        }
    }

    /// Removes the recorder's subscriptions from the bus.
    pub fn detach(self) {
        for id in &self.subscriptions {
            self.bus.unsubscribe(*id);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
