//! # BusEvent Trait
//!
//! The `BusEvent` trait is the contract an event union implements to travel over an
//! [`EventBus`](crate::EventBus). It maps each event value to the topic it is delivered on.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that a closed event union must implement to be dispatched by `EventBus`.
///
/// # Architecture Note
/// The associated `Topic` is a fieldless key (usually a `Copy` enum mirroring the event
/// variants). Subscribers register against topics so they can listen narrowly, while the
/// payload stays strongly typed inside the event itself.
pub trait BusEvent: Clone + Debug + Send + Sync + 'static {
    /// Key that handlers subscribe to. `Display` should render the wire name
    /// (e.g. `basket:changed`) since that is what ends up in logs.
    type Topic: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// The topic this event is delivered on.
    fn topic(&self) -> Self::Topic;
}
