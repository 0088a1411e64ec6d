//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! The bus logs at three levels:
//!
//! - **info**: subscriptions added and removed
//! - **debug**: every publish, with topic, subscriber count and the full event
//! - **warn**: handlers that failed or panicked
//!
//! ## Usage Examples
//!
//! ```bash
//! # State changes and failures only
//! RUST_LOG=info cargo run
//!
//! # Full event payloads on every publish
//! RUST_LOG=debug cargo run
//!
//! # Payloads from the bus only
//! RUST_LOG=info,event_bus=debug cargo run
//! ```
//!
//! The compact format hides the module prefix (`with_target(false)`), so lines stay short
//! and the structured fields (`topic`, `id`, `subscribers`) carry the context instead.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
