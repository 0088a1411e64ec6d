//! # Catalog Cache
//!
//! Read-only snapshot of the products the service offers, in listing order, with an
//! id index for constant-time lookup.
//!
//! A load either replaces the whole snapshot or changes nothing: the listing is fetched
//! and checked first, and only a fully valid listing is swapped in.

pub mod error;

pub use error::*;

use crate::clients::StoreApi;
use crate::model::{Category, Product, ProductId};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// A product together with whether it is already in the basket.
///
/// Presentation uses `in_basket` to swap "Add" for "Remove" on the preview card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPreview {
    pub product: Product,
    pub in_basket: bool,
}

#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the listing from `api` and swaps it in.
    ///
    /// Returns the number of products now cached. On any error the previous
    /// contents stay in place.
    #[instrument(skip(self, api))]
    pub async fn load(&mut self, api: &dyn StoreApi) -> Result<usize, CatalogError> {
        let listing = match api.list_products().await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(error = %e, kept = self.products.len(), "Catalog load failed");
                return Err(e.into());
            }
        };
        if listing.total != listing.items.len() {
            warn!(
                reported = listing.total,
                received = listing.items.len(),
                "Listing total disagrees with item count"
            );
        }
        self.replace(listing.items)
    }

    /// Swaps in `products` if their ids are unique.
    pub fn replace(&mut self, products: Vec<Product>) -> Result<usize, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                warn!(product_id = %product.id, "Duplicate product id in listing");
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        self.products = products;
        self.index = index;
        info!(count = self.products.len(), "Catalog loaded");
        Ok(self.products.len())
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&position| &self.products[position])
    }

    /// Like [`Catalog::get`], but a miss is an error.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    pub fn by_category(&self, category: Category) -> Vec<Product> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
