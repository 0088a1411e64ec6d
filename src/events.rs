//! # Storefront Events
//!
//! The closed set of everything that travels over the storefront's
//! [`EventBus`](event_bus::EventBus).
//!
//! Two families share one union:
//!
//! - **Domain facts**, published by the core after state changed
//!   (`basket:changed`, `order:success`, ...).
//! - **Intents**, published by presentation adapters when the user asks for something
//!   (`basket:add`, `checkout:start`, ...). The composition root forwards them to the
//!   storefront actor; the core never publishes them itself.
//!
//! | Topic | Variant | Published by |
//! |-------|---------|--------------|
//! | `basket:changed` | [`StoreEvent::BasketChanged`] | basket |
//! | `basket:itemCount` | [`StoreEvent::BasketItemCount`] | basket |
//! | `basket:totalUpdated` | [`StoreEvent::BasketTotalUpdated`] | basket |
//! | `catalog:loaded` | [`StoreEvent::CatalogLoaded`] | storefront actor |
//! | `order:invalid` | [`StoreEvent::OrderInvalid`] | checkout |
//! | `order:success` | [`StoreEvent::OrderSucceeded`] | checkout |
//! | `order:error` | [`StoreEvent::OrderFailed`] | checkout, storefront actor |
//! | `basket:add` | [`StoreEvent::BasketAdd`] | presentation |
//! | `basket:remove` | [`StoreEvent::BasketRemove`] | presentation |
//! | `product:preview` | [`StoreEvent::ProductPreview`] | presentation |
//! | `checkout:start` | [`StoreEvent::CheckoutStart`] | presentation |
//! | `payment:complete` | [`StoreEvent::PaymentComplete`] | presentation |
//! | `contact:complete` | [`StoreEvent::ContactComplete`] | presentation |
//! | `modal:closed` | [`StoreEvent::ModalClosed`] | presentation |

use crate::model::{BasketState, ContactDetails, OrderResult, PaymentDetails, Price, Product, ProductId};
use event_bus::BusEvent;
use std::fmt::{self, Display};

/// Topic keys, one per [`StoreEvent`] variant. `Display` renders the wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    BasketChanged,
    BasketItemCount,
    BasketTotalUpdated,
    CatalogLoaded,
    OrderInvalid,
    OrderSucceeded,
    OrderFailed,
    BasketAdd,
    BasketRemove,
    ProductPreview,
    CheckoutStart,
    PaymentComplete,
    ContactComplete,
    ModalClosed,
}

impl Topic {
    /// The three notifications published after every basket mutation, in order.
    pub const BASKET: [Topic; 3] = [
        Topic::BasketChanged,
        Topic::BasketItemCount,
        Topic::BasketTotalUpdated,
    ];

    /// Outcomes of a checkout attempt.
    pub const ORDER: [Topic; 3] = [Topic::OrderInvalid, Topic::OrderSucceeded, Topic::OrderFailed];

    pub fn name(self) -> &'static str {
        match self {
            Topic::BasketChanged => "basket:changed",
            Topic::BasketItemCount => "basket:itemCount",
            Topic::BasketTotalUpdated => "basket:totalUpdated",
            Topic::CatalogLoaded => "catalog:loaded",
            Topic::OrderInvalid => "order:invalid",
            Topic::OrderSucceeded => "order:success",
            Topic::OrderFailed => "order:error",
            Topic::BasketAdd => "basket:add",
            Topic::BasketRemove => "basket:remove",
            Topic::ProductPreview => "product:preview",
            Topic::CheckoutStart => "checkout:start",
            Topic::PaymentComplete => "payment:complete",
            Topic::ContactComplete => "contact:complete",
            Topic::ModalClosed => "modal:closed",
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every event the storefront bus carries.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// Full basket snapshot after a mutation.
    BasketChanged(BasketState),
    /// Number of items after a mutation.
    BasketItemCount(usize),
    /// Basket total after a mutation.
    BasketTotalUpdated(Price),
    /// The catalog was (re)loaded; carries the full product list.
    CatalogLoaded(Vec<Product>),
    /// Checkout input failed validation; carries every error message.
    OrderInvalid(Vec<String>),
    /// The order was accepted. The basket is already empty when this is published.
    OrderSucceeded(OrderResult),
    /// The attempt failed; carries a message fit for display.
    OrderFailed(String),

    BasketAdd(ProductId),
    BasketRemove(ProductId),
    ProductPreview(ProductId),
    CheckoutStart,
    PaymentComplete(PaymentDetails),
    ContactComplete(ContactDetails),
    ModalClosed,
}

impl BusEvent for StoreEvent {
    type Topic = Topic;

    fn topic(&self) -> Topic {
        match self {
            StoreEvent::BasketChanged(_) => Topic::BasketChanged,
            StoreEvent::BasketItemCount(_) => Topic::BasketItemCount,
            StoreEvent::BasketTotalUpdated(_) => Topic::BasketTotalUpdated,
            StoreEvent::CatalogLoaded(_) => Topic::CatalogLoaded,
            StoreEvent::OrderInvalid(_) => Topic::OrderInvalid,
            StoreEvent::OrderSucceeded(_) => Topic::OrderSucceeded,
            StoreEvent::OrderFailed(_) => Topic::OrderFailed,
            StoreEvent::BasketAdd(_) => Topic::BasketAdd,
            StoreEvent::BasketRemove(_) => Topic::BasketRemove,
            StoreEvent::ProductPreview(_) => Topic::ProductPreview,
            StoreEvent::CheckoutStart => Topic::CheckoutStart,
            StoreEvent::PaymentComplete(_) => Topic::PaymentComplete,
            StoreEvent::ContactComplete(_) => Topic::ContactComplete,
            StoreEvent::ModalClosed => Topic::ModalClosed,
        }
    }
}

/// The storefront's bus.
pub type StoreBus = event_bus::EventBus<StoreEvent>;
