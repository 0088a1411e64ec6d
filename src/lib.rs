#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Storefront
//!
//! > **The state layer of a storefront: catalog, basket and checkout, decoupled from
//! > whatever draws them.**
//!
//! This crate owns everything in a shop client that has real invariants: the product
//! catalog, a single-unit-per-product basket with a derived total, and an order workflow
//! that validates buyer input and submits it exactly once. Presentation is somebody else's
//! problem; it talks to the core through a typed event bus.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why Actor + Event Bus?
//!
//! - **Actor**: all mutable state lives in one task, [`StorefrontActor`](lifecycle::StorefrontActor).
//!   Intents are processed one at a time, so there are no locks around the basket and no
//!   way for two checkouts to interleave.
//! - **Event Bus**: every state change is announced as a strongly typed [`StoreEvent`](events::StoreEvent).
//!   Renderers subscribe narrowly (`basket:itemCount` for a badge) and never reach into
//!   domain state.
//!
//! ## 🚀 Core Concepts
//!
//! ### Snapshots
//! Every read hands out an owned copy. Mutating a [`BasketState`](model::BasketState) you
//! received changes nothing inside the basket.
//!
//! ### Announce after commit
//! Notifications go out only after the state they describe is in place. A listener for
//! `order:success` always sees an already empty basket.
//!
//! ### Mocking
//! The remote store is a trait, [`StoreApi`](clients::StoreApi). Tests use
//! [`MockStoreApi`](clients::mock::MockStoreApi) with scripted answers and delays, and
//! [`EventRecorder`](event_bus::mock::EventRecorder) to assert on what was published.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each component has its own error type ([`BasketError`](basket::BasketError),
//! [`CatalogError`](catalog::CatalogError), [`OrderError`](checkout::OrderError)) and
//! [`StoreError`](error::StoreError) wraps them at the client boundary with `#[from]`.
//!
//! ### 2. At-most-once Submission
//! An order is sent once. Any failure, including a timeout, leaves the basket untouched
//! and publishes `order:error`; retrying is the buyer's decision.
//!
//! ### 3. Observability
//! `tracing` everywhere with structured fields. See [`event_bus::tracing`] for setup.
//!
//! ## 🗺️ Module Tour
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Plain data: products, prices, basket snapshots, order payloads |
//! | [`events`] | The closed event union and its topic names |
//! | [`basket`] | The basket aggregate and its invariants |
//! | [`catalog`] | The product cache |
//! | [`checkout`] | Validation and the submission state machine |
//! | [`clients`] | HTTP and mock store collaborators, the typed actor client |
//! | [`lifecycle`] | The actor and the composition root |
//! | [`config`] | CLI and environment configuration |
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo against a live service
//! STOREFRONT_API_URL=https://larek-api.nomoreparties.co/api/weblarek RUST_LOG=info cargo run
//!
//! # Run tests
//! cargo test
//! ```

pub mod basket;
pub mod catalog;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod model;
