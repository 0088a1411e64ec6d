//! # Bus Errors
//!
//! Failures raised by individual handlers during a publish. They never abort a publish;
//! they are collected into [`Delivery::failures`](crate::Delivery::failures).

/// Errors that can occur while delivering an event to one handler.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("Handler failed: {0}")]
    HandlerFailed(Box<dyn std::error::Error + Send + Sync>),
    #[error("Handler panicked: {0}")]
    HandlerPanicked(String),
}
