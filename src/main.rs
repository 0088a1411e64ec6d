//! # Storefront
//!
//! Demo driver: loads the catalog from a live store service, fills the basket through the
//! bus the way a UI would, and walks the two checkout steps.
//!
//! ```bash
//! STOREFRONT_API_URL=https://larek-api.nomoreparties.co/api/weblarek RUST_LOG=info cargo run
//! ```

use event_bus::tracing::setup_tracing;
use std::sync::Arc;
use storefront::clients::HttpStoreApi;
use storefront::config::StoreConfig;
use storefront::events::{StoreEvent, Topic};
use storefront::lifecycle::Storefront;
use storefront::model::{ContactDetails, PaymentDetails, PaymentMethod};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = StoreConfig::load().map_err(|e| e.to_string())?;
    setup_tracing();

    info!("Starting storefront demo");
    let api = Arc::new(HttpStoreApi::new(&config.api_url));
    let storefront = Storefront::start(&config, api);

    // Stand-ins for presentation adapters
    storefront.bus.subscribe(Topic::BasketItemCount, |event| {
        if let StoreEvent::BasketItemCount(count) = event {
            info!(count, "Basket badge");
        }
        Ok(())
    });
    storefront.bus.subscribe(Topic::OrderSucceeded, |event| {
        if let StoreEvent::OrderSucceeded(result) = event {
            info!(order_id = %result.id, total = %result.total, "Order confirmed");
        }
        Ok(())
    });
    storefront.bus.subscribe(Topic::OrderFailed, |event| {
        if let StoreEvent::OrderFailed(message) = event {
            error!(%message, "Order failed");
        }
        Ok(())
    });

    let span = tracing::info_span!("catalog");
    let products = async {
        storefront.client.load_catalog().await.map_err(|e| e.to_string())?;
        storefront.client.products(None).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(count = products.len(), "Catalog ready");

    for product in products.iter().filter(|p| p.is_purchasable()).take(2) {
        storefront.bus.publish(StoreEvent::BasketAdd(product.id.clone()));
    }

    let span = tracing::info_span!("checkout");
    let outcome = async {
        let basket = storefront.client.start_checkout().await?;
        info!(items = basket.len(), total = %basket.total, "Checking out");
        storefront
            .client
            .submit_payment(PaymentDetails {
                payment: Some(PaymentMethod::Online),
                address: "Spb Vosstania 1".to_string(),
            })
            .await?;
        storefront
            .client
            .submit_contacts(ContactDetails {
                email: "test@test.ru".to_string(),
                phone: "+71234567890".to_string(),
            })
            .await
    }
    .instrument(span)
    .await;

    if let Err(e) = outcome {
        error!(error = %e, "Checkout did not complete");
    }

    storefront.shutdown().await
}
