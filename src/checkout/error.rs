//! Error types for the order workflow.

use crate::clients::ApiError;
use std::time::Duration;
use thiserror::Error;

pub const SUBMISSION_FAILED: &str = "Order submission failed";

/// Why a checkout attempt ended without an order.
///
/// In every case the basket is exactly as it was before the attempt.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The form failed validation; carries every message.
    #[error("Invalid order: {}", .0.join(", "))]
    Invalid(Vec<String>),

    /// The service refused the order and said why.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or its answer was unusable.
    #[error("Store service unavailable: {0}")]
    Unavailable(String),

    /// No answer within the submission timeout. The order may or may not exist remotely.
    #[error("Order submission timed out after {0:?}")]
    TimedOut(Duration),
}

impl OrderError {
    /// Text suitable for showing to the buyer.
    pub fn user_message(&self) -> String {
        match self {
            OrderError::Invalid(errors) => errors.join(", "),
            OrderError::Rejected(message) => message.clone(),
            OrderError::Unavailable(_) => SUBMISSION_FAILED.to_string(),
            OrderError::TimedOut(_) => {
                "The store did not respond in time. Please check your orders before trying again"
                    .to_string()
            }
        }
    }
}

impl From<ApiError> for OrderError {
    fn from(error: ApiError) -> Self {
        match error.server_message() {
            Some(message) => OrderError::Rejected(message.to_string()),
            None => OrderError::Unavailable(error.to_string()),
        }
    }
}
