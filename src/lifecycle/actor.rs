use crate::basket::Basket;
use crate::catalog::{Catalog, ProductPreview};
use crate::checkout::{validate_payment, validation, CheckoutPhase, CheckoutWorkflow, OrderError};
use crate::clients::{StoreApi, StorefrontClient};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::events::{StoreBus, StoreEvent};
use crate::lifecycle::message::Intent;
use crate::model::{
    BasketState, Category, ContactDetails, OrderForm, OrderResult, PaymentDetails, Product,
    ProductId,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The single owner of all storefront state.
///
/// # Architecture Note
/// The catalog, the basket, the checkout workflow and the half-filled checkout draft all
/// live inside this struct and are only touched from [`StorefrontActor::run`]. Intents are
/// handled one at a time, to completion, including the network round-trip of an order
/// submission. A second checkout arriving while one is in flight waits in the channel;
/// it never interleaves with the first.
///
/// Intents arrive on two channels. Client calls use a bounded queue and wait for room.
/// Intents forwarded from the bus use an unbounded queue injected at [`StorefrontActor::run`],
/// because a bus publisher cannot wait and a dropped basket edit is never acceptable. The bus
/// queue is drained first, so a client call made after a publish observes its effect.
pub struct StorefrontActor {
    receiver: mpsc::Receiver<Intent>,
    api: Arc<dyn StoreApi>,
    bus: StoreBus,
    catalog: Catalog,
    basket: Basket,
    checkout: CheckoutWorkflow,
    draft: Option<PaymentDetails>,
}

impl StorefrontActor {
    pub fn new(config: &StoreConfig, api: Arc<dyn StoreApi>, bus: StoreBus) -> (Self, StorefrontClient) {
        let (sender, receiver) = mpsc::channel(config.channel_buffer());
        let actor = Self {
            receiver,
            api: Arc::clone(&api),
            catalog: Catalog::new(),
            basket: Basket::new(bus.clone()),
            checkout: CheckoutWorkflow::new(api, bus.clone(), config.submit_timeout()),
            bus,
            draft: None,
        };
        (actor, StorefrontClient::new(sender))
    }

    /// Follows the checkout phase from outside the actor task.
    pub fn checkout_phase(&self) -> watch::Receiver<CheckoutPhase> {
        self.checkout.watch_phase()
    }

    /// Runs the actor's event loop until every client and every bus sender is dropped.
    ///
    /// # Context Injection
    /// `bus_intents` carries intents forwarded from the bus. It is created by the
    /// composition root after the actor, alongside the forwarders that feed it.
    pub async fn run(mut self, mut bus_intents: mpsc::UnboundedReceiver<Intent>) {
        info!("Storefront actor started");

        loop {
            let intent = tokio::select! {
                biased;
                Some(intent) = bus_intents.recv() => intent,
                Some(intent) = self.receiver.recv() => intent,
                else => break,
            };
            debug!(intent = intent.name(), "Handling intent");
            match intent {
                Intent::LoadCatalog { respond_to } => {
                    let _ = respond_to.send(self.load_catalog().await);
                }
                Intent::Products { category, respond_to } => {
                    let _ = respond_to.send(Ok(self.products(category)));
                }
                Intent::Preview { id, respond_to } => {
                    let _ = respond_to.send(self.preview(&id));
                }
                Intent::AddToBasket { id, respond_to } => {
                    let _ = respond_to.send(self.add_to_basket(&id));
                }
                Intent::RemoveFromBasket { id, respond_to } => {
                    let _ = respond_to.send(self.basket.remove(&id).map_err(StoreError::from));
                }
                Intent::Basket { respond_to } => {
                    let _ = respond_to.send(Ok(self.basket.state()));
                }
                Intent::StartCheckout { respond_to } => {
                    let _ = respond_to.send(self.start_checkout());
                }
                Intent::SubmitPayment { details, respond_to } => {
                    let _ = respond_to.send(self.submit_payment(details));
                }
                Intent::SubmitContacts { details, respond_to } => {
                    let _ = respond_to.send(self.submit_contacts(details).await);
                }
                Intent::PlaceOrder { form, respond_to } => {
                    let _ = respond_to.send(self.place_order(form).await);
                }
                Intent::CloseModal { respond_to } => {
                    if self.draft.take().is_some() {
                        debug!("Checkout draft discarded");
                    }
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(basket_size = self.basket.item_count(), "Shutdown");
    }

    async fn load_catalog(&mut self) -> Result<usize, StoreError> {
        let count = self.catalog.load(self.api.as_ref()).await?;
        self.bus
            .publish(StoreEvent::CatalogLoaded(self.catalog.products().to_vec()));
        Ok(count)
    }

    fn products(&self, category: Option<Category>) -> Vec<Product> {
        match category {
            Some(category) => self.catalog.by_category(category),
            None => self.catalog.products().to_vec(),
        }
    }

    fn preview(&self, id: &ProductId) -> Result<ProductPreview, StoreError> {
        let product = self.catalog.require(id).inspect_err(|_| {
            warn!(product_id = %id, "Preview of unknown product");
        })?;
        Ok(ProductPreview {
            product: product.clone(),
            in_basket: self.basket.is_present(id),
        })
    }

    fn add_to_basket(&mut self, id: &ProductId) -> Result<BasketState, StoreError> {
        let product = self
            .catalog
            .require(id)
            .inspect_err(|_| warn!(product_id = %id, "Cannot add unknown product"))?
            .clone();
        Ok(self.basket.add(product)?)
    }

    fn start_checkout(&mut self) -> Result<BasketState, StoreError> {
        if self.basket.item_count() == 0 {
            let errors = vec![validation::BASKET_EMPTY.to_string()];
            warn!("Checkout started with an empty basket");
            self.bus.publish(StoreEvent::OrderInvalid(errors.clone()));
            return Err(OrderError::Invalid(errors).into());
        }
        self.draft = None;
        info!(items = self.basket.item_count(), total = %self.basket.total(), "Checkout started");
        Ok(self.basket.state())
    }

    fn submit_payment(&mut self, details: PaymentDetails) -> Result<(), StoreError> {
        let errors = validate_payment(&details);
        if !errors.is_empty() {
            warn!(?errors, "Payment step rejected");
            self.bus.publish(StoreEvent::OrderInvalid(errors.clone()));
            return Err(OrderError::Invalid(errors).into());
        }
        debug!(payment = ?details.payment, "Payment step stored");
        self.draft = Some(details);
        Ok(())
    }

    async fn submit_contacts(&mut self, details: ContactDetails) -> Result<OrderResult, StoreError> {
        let payment = self.draft.clone().unwrap_or_default();
        self.place_order(OrderForm::from_steps(payment, details)).await
    }

    async fn place_order(&mut self, form: OrderForm) -> Result<OrderResult, StoreError> {
        let result = self.checkout.submit(&mut self.basket, form).await?;
        self.draft = None;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::MockStoreApi;
    use crate::model::{PaymentMethod, Price, ProductList};

    fn catalog() -> ProductList {
        ProductList::from(vec![
            Product::new("p1", "One", Category::SoftSkill, Price::new(100.0)),
            Product::new("p2", "Two", Category::Other, None),
        ])
    }

    fn spawn(api: &MockStoreApi) -> StorefrontClient {
        let config = StoreConfig::new("http://unused");
        let (actor, client) = StorefrontActor::new(&config, Arc::new(api.clone()), StoreBus::new());
        let (_, bus_intents) = mpsc::unbounded_channel();
        tokio::spawn(actor.run(bus_intents));
        client
    }

    #[tokio::test]
    async fn test_add_looks_up_catalog() {
        let api = MockStoreApi::new();
        api.expect_list_products().return_ok(catalog());
        let client = spawn(&api);
        client.load_catalog().await.unwrap();

        let state = client.add_to_basket(ProductId::from("p1")).await.unwrap();
        assert_eq!(state.len(), 1);

        let err = client.add_to_basket(ProductId::from("p2")).await.unwrap_err();
        assert!(matches!(err, StoreError::Basket(_)));

        let err = client.add_to_basket(ProductId::from("ghost")).await.unwrap_err();
        assert!(matches!(err, StoreError::Catalog(_)));

        let preview = client.preview(ProductId::from("p1")).await.unwrap();
        assert!(preview.in_basket);
        api.verify();
    }

    #[tokio::test]
    async fn test_payment_draft_feeds_contact_step() {
        let api = MockStoreApi::new();
        api.expect_list_products().return_ok(catalog());
        api.expect_submit_order().return_ok(OrderResult {
            id: crate::model::OrderId("o-1".into()),
            total: Price::new(100.0).unwrap(),
        });
        let client = spawn(&api);
        client.load_catalog().await.unwrap();
        client.add_to_basket(ProductId::from("p1")).await.unwrap();

        client.start_checkout().await.unwrap();
        client
            .submit_payment(PaymentDetails {
                payment: Some(PaymentMethod::Online),
                address: "Main st. 1".into(),
            })
            .await
            .unwrap();
        let result = client
            .submit_contacts(ContactDetails {
                email: "a@b.c".into(),
                phone: "+7000".into(),
            })
            .await
            .unwrap();

        assert_eq!(result.id.to_string(), "o-1");
        assert_eq!(api.submitted()[0].address, "Main st. 1");
        assert!(client.basket().await.unwrap().is_empty());
        api.verify();
    }

    #[tokio::test]
    async fn test_closed_modal_forgets_draft() {
        let api = MockStoreApi::new();
        api.expect_list_products().return_ok(catalog());
        let client = spawn(&api);
        client.load_catalog().await.unwrap();
        client.add_to_basket(ProductId::from("p1")).await.unwrap();
        client
            .submit_payment(PaymentDetails {
                payment: Some(PaymentMethod::Cash),
                address: "Main st. 1".into(),
            })
            .await
            .unwrap();

        client.close_modal().await.unwrap();
        let err = client
            .submit_contacts(ContactDetails {
                email: "a@b.c".into(),
                phone: "+7000".into(),
            })
            .await
            .unwrap_err();

        let StoreError::Order(OrderError::Invalid(errors)) = err else {
            panic!("expected invalid order, got {err:?}");
        };
        assert_eq!(
            errors,
            vec![validation::ADDRESS_REQUIRED, validation::PAYMENT_REQUIRED]
        );
        assert!(api.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_empty_basket_cannot_start_checkout() {
        let client = spawn(&MockStoreApi::new());
        let err = client.start_checkout().await.unwrap_err();
        assert!(matches!(err, StoreError::Order(OrderError::Invalid(_))));
    }
}
