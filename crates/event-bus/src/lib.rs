//! # Event Bus
//!
//! This crate provides a small, typed, in-memory **publish/subscribe** channel. It is the
//! plumbing that lets a domain core announce state changes without knowing who is listening,
//! and lets presentation layers send user intent back without reaching into domain state.
//!
//! ## Why a Closed Event Union?
//!
//! A stringly-typed bus (`emit("basket:changed", anything)`) silently tolerates the wrong
//! payload shape on the right topic. Here every bus is generic over one event type `E`:
//!
//! - **Closed**: `E` is an enum you own. Adding a topic means adding a variant, and the
//!   compiler walks you through every `match`.
//! - **Typed payloads**: each variant carries exactly the data that topic promises.
//! - **Named topics**: [`BusEvent::Topic`] keeps the human-readable wire names around for
//!   logging and narrow subscriptions.
//!
//! ## Architecture Overview
//!
//! 1. **Event Layer** ([`BusEvent`]) - Your closed union of events and its topic key
//! 2. **Dispatch Layer** ([`EventBus`]) - Registration and synchronous, ordered delivery
//! 3. **Testing Layer** ([`mock`]) - Recorders that capture what was published
//!
//! ```rust
//! use event_bus::{BusEvent, EventBus};
//! use std::fmt;
//!
//! #[derive(Clone, Debug)]
//! enum Signal { Ping(u32), Pong }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum SignalTopic { Ping, Pong }
//!
//! impl fmt::Display for SignalTopic {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str(match self { SignalTopic::Ping => "signal:ping", SignalTopic::Pong => "signal:pong" })
//!     }
//! }
//!
//! impl BusEvent for Signal {
//!     type Topic = SignalTopic;
//!     fn topic(&self) -> SignalTopic {
//!         match self { Signal::Ping(_) => SignalTopic::Ping, Signal::Pong => SignalTopic::Pong }
//!     }
//! }
//!
//! let bus = EventBus::<Signal>::new();
//! bus.subscribe(SignalTopic::Ping, |event| {
//!     if let Signal::Ping(n) = event {
//!         assert_eq!(*n, 7);
//!     }
//!     Ok(())
//! });
//!
//! let delivery = bus.publish(Signal::Ping(7));
//! assert_eq!(delivery.delivered, 1);
//!
//! // Nobody listens to Pong: still fine.
//! assert_eq!(bus.publish(Signal::Pong).delivered, 0);
//! ```
//!
//! ## Delivery Guarantees
//!
//! - `publish` returns only after every handler registered for the topic has run.
//! - Handlers run in registration order.
//! - A handler that returns an error or panics is recorded in [`Delivery::failures`]; the
//!   handlers after it still run.
//! - Handlers may publish or subscribe from inside a handler. The handler list is captured
//!   before dispatch, so a subscription added mid-publish sees the *next* event, not this one.
//!
//! ## Concurrency Model
//!
//! [`EventBus`] is `Clone + Send + Sync`. Clones share one registry. Dispatch is synchronous
//! on the caller's thread; the bus never spawns tasks or buffers events.

pub mod bus;
pub mod error;
pub mod event;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use bus::{Delivery, EventBus, HandlerResult, SubscriptionId};
pub use error::BusError;
pub use event::BusEvent;
