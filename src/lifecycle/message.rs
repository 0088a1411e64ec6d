//! Messages understood by the [`StorefrontActor`](super::StorefrontActor).

use crate::catalog::ProductPreview;
use crate::error::StoreError;
use crate::events::StoreEvent;
use crate::model::{
    BasketState, Category, ContactDetails, OrderForm, OrderResult, PaymentDetails, Product,
    ProductId,
};
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A request to the storefront actor.
///
/// Every variant carries its own `respond_to`. The actor always answers, but nobody is
/// required to listen: intents forwarded from the bus are sent with a detached responder.
#[derive(Debug)]
pub enum Intent {
    LoadCatalog {
        respond_to: Response<usize>,
    },
    Products {
        category: Option<Category>,
        respond_to: Response<Vec<Product>>,
    },
    Preview {
        id: ProductId,
        respond_to: Response<ProductPreview>,
    },
    AddToBasket {
        id: ProductId,
        respond_to: Response<BasketState>,
    },
    RemoveFromBasket {
        id: ProductId,
        respond_to: Response<BasketState>,
    },
    Basket {
        respond_to: Response<BasketState>,
    },
    StartCheckout {
        respond_to: Response<BasketState>,
    },
    SubmitPayment {
        details: PaymentDetails,
        respond_to: Response<()>,
    },
    SubmitContacts {
        details: ContactDetails,
        respond_to: Response<OrderResult>,
    },
    PlaceOrder {
        form: OrderForm,
        respond_to: Response<OrderResult>,
    },
    CloseModal {
        respond_to: Response<()>,
    },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::LoadCatalog { .. } => "load_catalog",
            Intent::Products { .. } => "products",
            Intent::Preview { .. } => "preview",
            Intent::AddToBasket { .. } => "add_to_basket",
            Intent::RemoveFromBasket { .. } => "remove_from_basket",
            Intent::Basket { .. } => "basket",
            Intent::StartCheckout { .. } => "start_checkout",
            Intent::SubmitPayment { .. } => "submit_payment",
            Intent::SubmitContacts { .. } => "submit_contacts",
            Intent::PlaceOrder { .. } => "place_order",
            Intent::CloseModal { .. } => "close_modal",
        }
    }

    /// Translates a presentation intent published on the bus.
    ///
    /// Returns `None` for domain facts, which the actor publishes itself.
    pub fn from_event(event: &StoreEvent) -> Option<Intent> {
        let intent = match event {
            StoreEvent::BasketAdd(id) => Intent::AddToBasket {
                id: id.clone(),
                respond_to: detached(),
            },
            StoreEvent::BasketRemove(id) => Intent::RemoveFromBasket {
                id: id.clone(),
                respond_to: detached(),
            },
            StoreEvent::ProductPreview(id) => Intent::Preview {
                id: id.clone(),
                respond_to: detached(),
            },
            StoreEvent::CheckoutStart => Intent::StartCheckout {
                respond_to: detached(),
            },
            StoreEvent::PaymentComplete(details) => Intent::SubmitPayment {
                details: details.clone(),
                respond_to: detached(),
            },
            StoreEvent::ContactComplete(details) => Intent::SubmitContacts {
                details: details.clone(),
                respond_to: detached(),
            },
            StoreEvent::ModalClosed => Intent::CloseModal {
                respond_to: detached(),
            },
            StoreEvent::BasketChanged(_)
            | StoreEvent::BasketItemCount(_)
            | StoreEvent::BasketTotalUpdated(_)
            | StoreEvent::CatalogLoaded(_)
            | StoreEvent::OrderInvalid(_)
            | StoreEvent::OrderSucceeded(_)
            | StoreEvent::OrderFailed(_) => return None,
        };
        Some(intent)
    }
}

fn detached<T>() -> Response<T> {
    oneshot::channel().0
}
