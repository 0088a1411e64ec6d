//! # Store API
//!
//! The seam between the storefront core and the remote store service. The core only ever
//! talks to a `dyn StoreApi`; production wires in [`HttpStoreApi`](crate::clients::HttpStoreApi),
//! tests wire in [`MockStoreApi`](crate::clients::mock::MockStoreApi).

use crate::model::{OrderRequest, OrderResult, ProductList};
use async_trait::async_trait;
use thiserror::Error;

/// Remote collaborator for product listing and order submission.
///
/// Implementations must not retry `submit_order` on their own: one call is one attempt,
/// and an ambiguous failure must be reported as an error.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// `GET /products`
    async fn list_products(&self) -> Result<ProductList, ApiError>;

    /// `POST /order/`
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, ApiError>;
}

/// Errors returned by a [`StoreApi`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or body decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The service could not be reached or gave no usable answer.
    #[error("store service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// The message the service itself put in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
