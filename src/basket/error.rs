//! Error types for the basket aggregate.

use crate::model::ProductId;
use thiserror::Error;

/// Reasons a basket mutation was refused. The basket is unchanged in every case.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BasketError {
    /// The product has no price and cannot be bought.
    #[error("Product is not for sale: {0}")]
    Priceless(ProductId),

    /// The product is already in the basket (one unit per product).
    #[error("Product already in basket: {0}")]
    AlreadyPresent(ProductId),

    /// The product is not in the basket.
    #[error("Product not in basket: {0}")]
    NotFound(ProductId),
}
