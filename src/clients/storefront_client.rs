use crate::catalog::ProductPreview;
use crate::error::StoreError;
use crate::lifecycle::message::{Intent, Response};
use crate::model::{
    BasketState, Category, ContactDetails, OrderForm, OrderResult, PaymentDetails, Product,
    ProductId,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for the storefront actor.
///
/// Cheap to clone. Every call resolves after the actor has applied the change and every
/// bus subscriber has seen the resulting notifications.
#[derive(Clone)]
pub struct StorefrontClient {
    sender: mpsc::Sender<Intent>,
}

impl StorefrontClient {
    pub fn new(sender: mpsc::Sender<Intent>) -> Self {
        Self { sender }
    }

    /// Fetches the product listing and replaces the catalog.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| Intent::LoadCatalog { respond_to }).await
    }

    /// Cached products, optionally filtered by category.
    #[instrument(skip(self))]
    pub async fn products(&self, category: Option<Category>) -> Result<Vec<Product>, StoreError> {
        self.request(|respond_to| Intent::Products { category, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn preview(&self, id: ProductId) -> Result<ProductPreview, StoreError> {
        self.request(|respond_to| Intent::Preview { id, respond_to }).await
    }

    #[instrument(skip(self))]
    pub async fn add_to_basket(&self, id: ProductId) -> Result<BasketState, StoreError> {
        debug!("add_to_basket called");
        self.request(|respond_to| Intent::AddToBasket { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_from_basket(&self, id: ProductId) -> Result<BasketState, StoreError> {
        self.request(|respond_to| Intent::RemoveFromBasket { id, respond_to })
            .await
    }

    /// Snapshot of the basket.
    pub async fn basket(&self) -> Result<BasketState, StoreError> {
        self.request(|respond_to| Intent::Basket { respond_to }).await
    }

    /// Opens a checkout. Fails with an invalid-order error when the basket is empty.
    #[instrument(skip(self))]
    pub async fn start_checkout(&self) -> Result<BasketState, StoreError> {
        self.request(|respond_to| Intent::StartCheckout { respond_to })
            .await
    }

    /// First checkout step.
    #[instrument(skip(self, details))]
    pub async fn submit_payment(&self, details: PaymentDetails) -> Result<(), StoreError> {
        self.request(|respond_to| Intent::SubmitPayment { details, respond_to })
            .await
    }

    /// Second checkout step; completes the draft and submits the order.
    #[instrument(skip(self, details))]
    pub async fn submit_contacts(&self, details: ContactDetails) -> Result<OrderResult, StoreError> {
        self.request(|respond_to| Intent::SubmitContacts { details, respond_to })
            .await
    }

    /// Submits a complete form in one go, bypassing the two-step draft.
    #[instrument(skip(self, form))]
    pub async fn place_order(&self, form: OrderForm) -> Result<OrderResult, StoreError> {
        debug!(?form, "place_order called");
        self.request(|respond_to| Intent::PlaceOrder { form, respond_to })
            .await
    }

    /// Abandons the checkout draft.
    pub async fn close_modal(&self) -> Result<(), StoreError> {
        self.request(|respond_to| Intent::CloseModal { respond_to })
            .await
    }

    async fn request<T>(&self, make: impl FnOnce(Response<T>) -> Intent) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
