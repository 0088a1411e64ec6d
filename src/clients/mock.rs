//! # Mock Store API
//!
//! `MockStoreApi` implements [`StoreApi`] entirely in memory. You queue the answers you want
//! the "service" to give, hand the mock to the code under test, then `verify()` that every
//! answer was consumed.
//!
//! | Feature | MockStoreApi | HttpStoreApi |
//! |---------|--------------|--------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | 100% | Subject to the service |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//! | **Slow service** | `after(delay)` | Real latency |
//!
//! ```rust
//! use storefront::clients::mock::MockStoreApi;
//! use storefront::clients::StoreApi;
//! use storefront::model::{Category, Price, Product, ProductList};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockStoreApi::new();
//!     mock.expect_list_products().return_ok(ProductList::from(vec![
//!         Product::new("p1", "Widget", Category::Other, Price::new(10.0)),
//!     ]));
//!
//!     let listing = mock.list_products().await.unwrap();
//!     assert_eq!(listing.total, 1);
//!     mock.verify();
//! }
//! ```
//!
//! Clones share one expectation queue, so a test can keep a clone for `verify()` after
//! moving another into the storefront.

use crate::clients::store_api::{ApiError, StoreApi};
use crate::model::{OrderRequest, OrderResult, ProductList};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::warn;

enum Expectation {
    ListProducts {
        delay: Option<Duration>,
        response: Result<ProductList, ApiError>,
    },
    SubmitOrder {
        delay: Option<Duration>,
        response: Result<OrderResult, ApiError>,
    },
}

impl Expectation {
    fn name(&self) -> &'static str {
        match self {
            Expectation::ListProducts { .. } => "list_products",
            Expectation::SubmitOrder { .. } => "submit_order",
        }
    }
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    submitted: Vec<OrderRequest>,
    unexpected: Vec<&'static str>,
}

/// A scripted [`StoreApi`] with expectation tracking.
#[derive(Clone, Default)]
pub struct MockStoreApi {
    state: Arc<Mutex<MockState>>,
}

impl MockStoreApi {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list_products` call.
    pub fn expect_list_products(&self) -> ListProductsBuilder {
        ListProductsBuilder {
            state: Arc::clone(&self.state),
            delay: None,
        }
    }

    /// Expects a `submit_order` call.
    pub fn expect_submit_order(&self) -> SubmitOrderBuilder {
        SubmitOrderBuilder {
            state: Arc::clone(&self.state),
            delay: None,
        }
    }

    /// Every order body received so far, oldest first.
    pub fn submitted(&self) -> Vec<OrderRequest> {
        self.lock().submitted.clone()
    }

    /// Verifies that all expectations were met and nothing unexpected was called.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.unexpected.is_empty() {
            panic!("Unexpected calls: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            let remaining: Vec<_> = state.expectations.iter().map(Expectation::name).collect();
            panic!("Not all expectations were met. Remaining: {remaining:?}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn unexpected(&self, call: &'static str) -> ApiError {
        warn!(call, "Unexpected call on MockStoreApi");
        self.lock().unexpected.push(call);
        ApiError::Unavailable(format!("unexpected {call} call"))
    }
}

#[async_trait]
impl StoreApi for MockStoreApi {
    async fn list_products(&self) -> Result<ProductList, ApiError> {
        let next = {
            let mut state = self.lock();
            match state.expectations.front() {
                Some(Expectation::ListProducts { .. }) => state.expectations.pop_front(),
                _ => None,
            }
        };
        let Some(Expectation::ListProducts { delay, response }) = next else {
            return Err(self.unexpected("list_products"));
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        response
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, ApiError> {
        let next = {
            let mut state = self.lock();
            match state.expectations.front() {
                Some(Expectation::SubmitOrder { .. }) => {
                    state.submitted.push(order.clone());
                    state.expectations.pop_front()
                }
                _ => None,
            }
        };
        let Some(Expectation::SubmitOrder { delay, response }) = next else {
            return Err(self.unexpected("submit_order"));
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

/// Builder for `list_products` expectations.
pub struct ListProductsBuilder {
    state: Arc<Mutex<MockState>>,
    delay: Option<Duration>,
}

impl ListProductsBuilder {
    /// Delays the answer by `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, listing: ProductList) {
        self.push(Ok(listing));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<ProductList, ApiError>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation::ListProducts {
            delay: self.delay,
            response,
        });
    }
}

/// Builder for `submit_order` expectations.
pub struct SubmitOrderBuilder {
    state: Arc<Mutex<MockState>>,
    delay: Option<Duration>,
}

impl SubmitOrderBuilder {
    /// Delays the answer by `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: OrderResult) {
        self.push(Ok(result));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<OrderResult, ApiError>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation::SubmitOrder {
            delay: self.delay,
            response,
        });
    }
}
