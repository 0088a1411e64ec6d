use crate::checkout::CheckoutPhase;
use crate::clients::{StoreApi, StorefrontClient};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::events::{StoreBus, StoreEvent, Topic};
use crate::lifecycle::actor::StorefrontActor;
use crate::lifecycle::message::Intent;
use event_bus::{HandlerResult, SubscriptionId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};

/// Bus topics the storefront consumes. Everything else on the bus is output.
pub const INTENT_TOPICS: [Topic; 7] = [
    Topic::BasketAdd,
    Topic::BasketRemove,
    Topic::ProductPreview,
    Topic::CheckoutStart,
    Topic::PaymentComplete,
    Topic::ContactComplete,
    Topic::ModalClosed,
];

/// The composition root of the storefront.
///
/// `Storefront` is responsible for:
/// - **Construction**: one bus, one actor, one client, created together
/// - **Wiring**: presentation intents published on the bus are forwarded into the actor
/// - **Shutdown**: detaching from the bus and waiting for the actor to drain
///
/// # Example
///
/// ```ignore
/// let storefront = Storefront::start(&config, Arc::new(HttpStoreApi::new(&config.api_url)));
///
/// storefront.bus.subscribe(Topic::BasketItemCount, |event| { /* re-render badge */ Ok(()) });
/// storefront.client.load_catalog().await?;
/// storefront.bus.publish(StoreEvent::BasketAdd(ProductId::from("p1")));
///
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    /// Typed entry point into the actor
    pub client: StorefrontClient,

    /// The bus presentation adapters subscribe to and publish intents on
    pub bus: StoreBus,

    /// Current checkout phase, e.g. to disable a submit button while `SUBMITTING`
    pub phase: watch::Receiver<CheckoutPhase>,

    intents: mpsc::UnboundedSender<Intent>,
    forwarders: Vec<SubscriptionId>,
    handle: tokio::task::JoinHandle<()>,
}

impl Storefront {
    /// Spawns the storefront actor and wires it to a fresh bus.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &StoreConfig, api: Arc<dyn StoreApi>) -> Self {
        let bus = StoreBus::new();
        let (actor, client) = StorefrontActor::new(config, api, bus.clone());
        let phase = actor.checkout_phase();
        let (intents, bus_intents) = mpsc::unbounded_channel();
        let handle = tokio::spawn(actor.run(bus_intents));

        let forwarders = INTENT_TOPICS
            .iter()
            .map(|&topic| {
                let sender = intents.downgrade();
                bus.subscribe(topic, move |event| forward(&sender, event))
            })
            .collect();

        info!(api_url = %config.api_url, "Storefront started");
        Self {
            client,
            bus,
            phase,
            intents,
            forwarders,
            handle,
        }
    }

    /// Gracefully shuts the storefront down.
    ///
    /// Unsubscribes the intent forwarders, drops the client and waits for the actor to
    /// finish whatever it is doing, including bus intents already queued. Clones of
    /// [`Storefront::client`] held elsewhere keep the actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        for id in self.forwarders {
            self.bus.unsubscribe(id);
        }
        drop(self.intents);
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Storefront actor failed: {:?}", e);
            return Err(format!("Storefront actor failed: {:?}", e));
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}

/// Queues a bus intent for the actor without waiting.
///
/// The queue is unbounded, so an intent is never dropped for lack of room. The actor
/// applies it after the intent it is currently handling; a client call issued after the
/// publish resolves only once the intent has been applied. The weak sender keeps the bus
/// from holding the actor alive.
fn forward(sender: &mpsc::WeakUnboundedSender<Intent>, event: &StoreEvent) -> HandlerResult {
    let Some(intent) = Intent::from_event(event) else {
        return Ok(());
    };
    let Some(sender) = sender.upgrade() else {
        return Err(StoreError::ActorClosed.into());
    };
    sender
        .send(intent)
        .map_err(|_| StoreError::ActorClosed.into())
}
