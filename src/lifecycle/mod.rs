//! # Lifecycle Module
//!
//! Starting, wiring and stopping the storefront.
//!
//! ```text
//!  presentation ──publish intent──▶ EventBus ──forward──▶ ┌──────────────────┐
//!                              (unbounded mpsc<Intent>)   │ StorefrontActor  │
//!  StorefrontClient ─────────────── mpsc<Intent> ───────▶ │  Catalog         │
//!                                                         │  Basket          │
//!  presentation ◀──domain facts─── EventBus ◀──publish─── │  CheckoutWorkflow│
//!                                                         └──────────────────┘
//! ```
//!
//! - [`message`]: the [`Intent`](message::Intent) protocol between client and actor
//! - [`actor`]: the single task that owns all storefront state
//! - [`storefront`]: the composition root, [`Storefront::start`] and [`Storefront::shutdown`]

pub mod actor;
pub mod message;
pub mod storefront;

pub use actor::StorefrontActor;
pub use storefront::{Storefront, INTENT_TOPICS};
