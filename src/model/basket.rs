use crate::model::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};

/// A product placed in the basket, with its 1-based display position.
///
/// Positions are derived by the basket on every membership change; a `BasketItem` held by
/// a caller is a snapshot and its position is not kept up to date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketItem {
    #[serde(flatten)]
    pub product: Product,
    pub position: usize,
}

impl BasketItem {
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price of the underlying product. Admitted items are never priceless, so this
    /// only yields zero for a hand-built item.
    pub fn price(&self) -> Price {
        self.product.price.unwrap_or(Price::ZERO)
    }
}

/// Snapshot of the basket handed to readers and published on the bus.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BasketState {
    pub items: Vec<BasketItem>,
    pub total: Price,
}

impl BasketState {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Identifiers in basket order.
    pub fn item_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }
}
