use crate::basket::BasketError;
use crate::catalog::CatalogError;
use crate::checkout::OrderError;
use thiserror::Error;

/// Everything a [`StorefrontClient`](crate::clients::StorefrontClient) call can fail with.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storefront actor closed")]
    ActorClosed,

    #[error("Storefront actor dropped response channel")]
    ActorDropped,

    #[error(transparent)]
    Basket(#[from] BasketError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Order(#[from] OrderError),
}
