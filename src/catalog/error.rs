use crate::clients::ApiError;
use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch products: {0}")]
    Fetch(#[from] ApiError),

    #[error("Product listing contains {0} more than once")]
    DuplicateProduct(ProductId),

    #[error("Product not found: {0}")]
    NotFound(ProductId),
}
