//! # Basket Aggregate
//!
//! The single owner of the buyer's basket. Only three operations change it:
//! [`Basket::add`], [`Basket::remove`] and [`Basket::clear`]. Each successful change is
//! followed by three notifications on the bus, in this order:
//!
//! 1. `basket:changed` with the full [`BasketState`] snapshot
//! 2. `basket:itemCount` with the new length
//! 3. `basket:totalUpdated` with the new total
//!
//! Narrow listeners (a header badge, a price label) subscribe to 2 or 3 and never touch
//! the full snapshot.
//!
//! ## Invariants
//!
//! - At most one item per product id.
//! - No priceless product is ever admitted.
//! - Positions are exactly `1..=len` in insertion order.
//! - `total` equals the sum of item prices; it is recomputed after each change.
//!
//! Readers only ever get clones, so nothing outside this module can break them.

pub mod error;

pub use error::*;

use crate::events::{StoreBus, StoreEvent};
use crate::model::{BasketItem, BasketState, Price, Product, ProductId};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub struct Basket {
    state: BasketState,
    bus: StoreBus,
}

impl Basket {
    /// Creates an empty basket that announces its changes on `bus`.
    pub fn new(bus: StoreBus) -> Self {
        Self {
            state: BasketState::default(),
            bus,
        }
    }

    /// Appends `product` at the end of the basket.
    ///
    /// # Errors
    /// - [`BasketError::Priceless`] if the product has no price
    /// - [`BasketError::AlreadyPresent`] if a product with the same id is already in
    pub fn add(&mut self, product: Product) -> Result<BasketState, BasketError> {
        if !product.is_purchasable() {
            warn!(product_id = %product.id, "Cannot add priceless product to basket");
            return Err(BasketError::Priceless(product.id));
        }
        if self.is_present(&product.id) {
            warn!(product_id = %product.id, "Product already in basket");
            return Err(BasketError::AlreadyPresent(product.id));
        }

        let product_id = product.id.clone();
        let position = self.state.items.len() + 1;
        self.state.items.push(BasketItem { product, position });
        self.recompute_total();
        info!(%product_id, position, total = %self.state.total, "Added to basket");

        Ok(self.announce())
    }

    /// Removes the item with `id` and closes the position gap it leaves.
    ///
    /// # Errors
    /// [`BasketError::NotFound`] if no such item is in the basket.
    pub fn remove(&mut self, id: &ProductId) -> Result<BasketState, BasketError> {
        let Some(index) = self.state.items.iter().position(|item| item.id() == id) else {
            warn!(product_id = %id, "Product not found in basket");
            return Err(BasketError::NotFound(id.clone()));
        };

        self.state.items.remove(index);
        self.reindex();
        self.recompute_total();
        info!(product_id = %id, size = self.state.items.len(), total = %self.state.total, "Removed from basket");

        Ok(self.announce())
    }

    /// Empties the basket. Used once per accepted order.
    pub fn clear(&mut self) -> BasketState {
        let dropped = self.state.items.len();
        self.state = BasketState::default();
        info!(dropped, "Basket cleared");
        self.announce()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> BasketState {
        self.state.clone()
    }

    pub fn is_present(&self, id: &ProductId) -> bool {
        self.state.contains(id)
    }

    pub fn item_count(&self) -> usize {
        self.state.items.len()
    }

    pub fn total(&self) -> Price {
        self.state.total
    }

    /// Checks the invariants against the live state and returns every violation found.
    ///
    /// An empty result means the basket is healthy. Nothing in this module should ever
    /// make it non-empty; the method exists for diagnostics and tests.
    pub fn audit(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for (index, item) in self.state.items.iter().enumerate() {
            if !item.product.is_purchasable() {
                problems.push(format!("Basket contains priceless item {}", item.id()));
            }
            if !seen.insert(item.id()) {
                problems.push(format!("Basket contains {} more than once", item.id()));
            }
            if item.position != index + 1 {
                problems.push(format!(
                    "Item {} has position {}, expected {}",
                    item.id(),
                    item.position,
                    index + 1
                ));
            }
        }

        let expected: Price = self.state.items.iter().map(BasketItem::price).sum();
        if (expected.amount() - self.state.total.amount()).abs() > 0.01 {
            problems.push(format!(
                "Total mismatch: recorded {}, items sum to {}",
                self.state.total, expected
            ));
        }

        problems
    }

    fn reindex(&mut self) {
        for (index, item) in self.state.items.iter_mut().enumerate() {
            item.position = index + 1;
        }
    }

    fn recompute_total(&mut self) {
        self.state.total = self.state.items.iter().map(BasketItem::price).sum();
    }

    fn announce(&self) -> BasketState {
        let snapshot = self.state.clone();
        debug!(size = snapshot.items.len(), "Announcing basket change");
        self.bus.publish(StoreEvent::BasketChanged(snapshot.clone()));
        self.bus.publish(StoreEvent::BasketItemCount(snapshot.items.len()));
        self.bus.publish(StoreEvent::BasketTotalUpdated(snapshot.total));
        snapshot
    }
}
