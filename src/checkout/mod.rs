//! # Order Workflow
//!
//! Drives one checkout attempt from raw buyer input to an accepted order (or a reason
//! why not).
//!
//! ```text
//! Idle → Validating ─┬─ Invalid ─────────────────────→ Idle
//!                    └─ Submitting ─┬─ Failed ───────→ Idle
//!                                   └─ Succeeded ────→ Idle
//! ```
//!
//! ## Architecture Note
//!
//! The remote call is the only suspension point. [`CheckoutWorkflow::submit`] borrows the
//! workflow and the basket mutably for the whole attempt, so a second attempt cannot
//! start until the first one has resolved. Inside the storefront actor this means a
//! second `checkout:start` simply waits in the queue.
//!
//! The service is treated as at-most-once: no retries, and a timeout counts as a failure
//! with the basket left intact.
//!
//! The phase lives in a `watch` channel. Callers outside the actor keep a receiver from
//! [`CheckoutWorkflow::watch_phase`] and see `SUBMITTING` while the remote call is pending;
//! outcome listeners on the bus read `INVALID`, `FAILED` or `SUCCEEDED` before the phase
//! settles back to `IDLE`.

pub mod error;
pub mod validation;

pub use error::*;
pub use validation::{validate, validate_contacts, validate_payment};

use crate::basket::Basket;
use crate::clients::StoreApi;
use crate::events::{StoreBus, StoreEvent};
use crate::model::{BasketState, OrderForm, OrderRequest, OrderResult};
use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Where the current attempt is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Failed,
    Succeeded,
}

impl Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutPhase::Idle => "IDLE",
            CheckoutPhase::Validating => "VALIDATING",
            CheckoutPhase::Invalid => "INVALID",
            CheckoutPhase::Submitting => "SUBMITTING",
            CheckoutPhase::Failed => "FAILED",
            CheckoutPhase::Succeeded => "SUCCEEDED",
        };
        f.write_str(name)
    }
}

pub struct CheckoutWorkflow {
    api: Arc<dyn StoreApi>,
    bus: StoreBus,
    submit_timeout: Duration,
    phase: watch::Sender<CheckoutPhase>,
}

impl CheckoutWorkflow {
    pub fn new(api: Arc<dyn StoreApi>, bus: StoreBus, submit_timeout: Duration) -> Self {
        Self {
            api,
            bus,
            submit_timeout,
            phase: watch::Sender::new(CheckoutPhase::Idle),
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        *self.phase.borrow()
    }

    /// A receiver that follows every phase change, usable from any task.
    pub fn watch_phase(&self) -> watch::Receiver<CheckoutPhase> {
        self.phase.subscribe()
    }

    pub fn submit_timeout(&self) -> Duration {
        self.submit_timeout
    }

    /// Runs one checkout attempt against the current contents of `basket`.
    ///
    /// Publishes exactly one outcome: `order:invalid`, `order:error` or `order:success`.
    /// On success the basket is cleared before `order:success` goes out.
    pub async fn submit(
        &mut self,
        basket: &mut Basket,
        form: OrderForm,
    ) -> Result<OrderResult, OrderError> {
        self.transition(CheckoutPhase::Validating);
        let snapshot = basket.state();
        let request = match build_request(form, &snapshot) {
            Ok(request) => request,
            Err(errors) => {
                self.transition(CheckoutPhase::Invalid);
                warn!(?errors, "Order form rejected");
                self.bus.publish(StoreEvent::OrderInvalid(errors.clone()));
                self.transition(CheckoutPhase::Idle);
                return Err(OrderError::Invalid(errors));
            }
        };

        self.transition(CheckoutPhase::Submitting);
        debug!(?request, "Submitting order");
        let outcome = match tokio::time::timeout(self.submit_timeout, self.api.submit_order(&request)).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(OrderError::from(e)),
            Err(_) => Err(OrderError::TimedOut(self.submit_timeout)),
        };

        let result = match outcome {
            Ok(result) => {
                self.transition(CheckoutPhase::Succeeded);
                basket.clear();
                info!(order_id = %result.id, total = %result.total, "Order placed");
                self.bus.publish(StoreEvent::OrderSucceeded(result.clone()));
                Ok(result)
            }
            Err(e) => {
                self.transition(CheckoutPhase::Failed);
                warn!(error = %e, items = request.items.len(), "Order submission failed");
                self.bus.publish(StoreEvent::OrderFailed(e.user_message()));
                Err(e)
            }
        };

        self.transition(CheckoutPhase::Idle);
        result
    }

    fn transition(&mut self, next: CheckoutPhase) {
        let previous = self.phase.send_replace(next);
        debug!(from = %previous, to = %next, "Checkout transition");
    }
}

/// Validates `form` against `basket` and builds the wire payload from both.
fn build_request(form: OrderForm, basket: &BasketState) -> Result<OrderRequest, Vec<String>> {
    let errors = validate(&form, basket);
    if !errors.is_empty() {
        return Err(errors);
    }
    let Some(payment) = form.payment else {
        return Err(vec![validation::PAYMENT_REQUIRED.to_string()]);
    };

    Ok(OrderRequest {
        payment,
        email: form.email,
        phone: form.phone,
        address: form.address,
        total: basket.total,
        items: basket.item_ids(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::MockStoreApi;
    use crate::clients::ApiError;
    use crate::events::Topic;
    use crate::model::{Category, OrderId, PaymentMethod, Price, Product, ProductId};
    use event_bus::mock::EventRecorder;

    fn form() -> OrderForm {
        OrderForm {
            payment: Some(PaymentMethod::Cash),
            address: "Main st. 1".into(),
            email: "buyer@example.com".into(),
            phone: "+70000000000".into(),
        }
    }

    fn price(amount: f64) -> Price {
        Price::new(amount).unwrap()
    }

    fn setup(api: &MockStoreApi) -> (CheckoutWorkflow, Basket, EventRecorder<StoreEvent>) {
        let bus = StoreBus::new();
        let recorder = EventRecorder::attach(&bus, Topic::ORDER);
        let mut basket = Basket::new(bus.clone());
        basket
            .add(Product::new("P1", "One", Category::Other, Price::new(100.0)))
            .unwrap();
        basket
            .add(Product::new("P2", "Two", Category::Other, Price::new(250.0)))
            .unwrap();
        let api: Arc<dyn StoreApi> = Arc::new(api.clone());
        let workflow = CheckoutWorkflow::new(api, bus, Duration::from_secs(5));
        (workflow, basket, recorder)
    }

    #[tokio::test]
    async fn test_success_sends_snapshot_and_clears_basket() {
        let api = MockStoreApi::new();
        api.expect_submit_order().return_ok(OrderResult {
            id: OrderId("order-1".into()),
            total: price(350.0),
        });
        let (mut workflow, mut basket, recorder) = setup(&api);

        let result = workflow.submit(&mut basket, form()).await.unwrap();

        assert_eq!(result.id, OrderId("order-1".into()));
        assert!(basket.state().is_empty());
        assert_eq!(workflow.phase(), CheckoutPhase::Idle);
        assert_eq!(
            recorder.take(),
            vec![StoreEvent::OrderSucceeded(result.clone())]
        );

        let sent = api.submitted();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].items, vec![ProductId::from("P1"), ProductId::from("P2")]);
        assert_eq!(sent[0].total, price(350.0));
        assert_eq!(sent[0].payment, PaymentMethod::Cash);
        api.verify();
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_the_service() {
        let api = MockStoreApi::new();
        let (mut workflow, mut basket, recorder) = setup(&api);
        let before = basket.state();

        let err = workflow
            .submit(
                &mut basket,
                OrderForm {
                    address: String::new(),
                    ..form()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, OrderError::Invalid(vec![validation::ADDRESS_REQUIRED.into()]));
        assert_eq!(basket.state(), before);
        assert_eq!(
            recorder.take(),
            vec![StoreEvent::OrderInvalid(vec![validation::ADDRESS_REQUIRED.into()])]
        );
        assert!(api.submitted().is_empty());
        api.verify();
    }

    #[tokio::test]
    async fn test_rejection_keeps_basket() {
        let api = MockStoreApi::new();
        api.expect_submit_order().return_err(ApiError::Rejected {
            status: 400,
            message: "Товар с id P2 не найден".into(),
        });
        let (mut workflow, mut basket, recorder) = setup(&api);
        let before = basket.state();

        let err = workflow.submit(&mut basket, form()).await.unwrap_err();

        assert_eq!(err, OrderError::Rejected("Товар с id P2 не найден".into()));
        assert_eq!(basket.state(), before);
        assert_eq!(workflow.phase(), CheckoutPhase::Idle);
        assert_eq!(
            recorder.take(),
            vec![StoreEvent::OrderFailed("Товар с id P2 не найден".into())]
        );
        api.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_failure() {
        let api = MockStoreApi::new();
        api.expect_submit_order()
            .after(Duration::from_secs(60))
            .return_ok(OrderResult {
                id: OrderId("late".into()),
                total: price(350.0),
            });
        let (mut workflow, mut basket, recorder) = setup(&api);

        let err = workflow.submit(&mut basket, form()).await.unwrap_err();

        assert_eq!(workflow.submit_timeout(), Duration::from_secs(5));
        assert_eq!(err, OrderError::TimedOut(workflow.submit_timeout()));
        assert_eq!(basket.item_count(), 2);
        assert_eq!(recorder.topics(), vec![Topic::OrderFailed]);
    }

    #[tokio::test]
    async fn test_success_listener_sees_empty_basket() {
        use std::sync::Mutex;

        let api = MockStoreApi::new();
        api.expect_submit_order().return_ok(OrderResult {
            id: OrderId("order-2".into()),
            total: price(350.0),
        });
        let (mut workflow, mut basket, _recorder) = setup(&api);

        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&counts);
        let bus = workflow.bus.clone();
        bus.subscribe(Topic::BasketItemCount, move |event| {
            if let StoreEvent::BasketItemCount(n) = event {
                sink.lock().unwrap().push(("count", *n));
            }
            Ok(())
        });
        let sink = Arc::clone(&counts);
        bus.subscribe(Topic::OrderSucceeded, move |_| {
            sink.lock().unwrap().push(("success", 0));
            Ok(())
        });

        workflow.submit(&mut basket, form()).await.unwrap();

        assert_eq!(*counts.lock().unwrap(), vec![("count", 0), ("success", 0)]);
    }

    fn phase_log(workflow: &CheckoutWorkflow, topic: Topic) -> Arc<std::sync::Mutex<Vec<CheckoutPhase>>> {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let phase = workflow.watch_phase();
        workflow.bus.subscribe(topic, move |_| {
            sink.lock().unwrap().push(*phase.borrow());
            Ok(())
        });
        seen
    }

    #[tokio::test]
    async fn test_outcome_listeners_see_terminal_phase() {
        let api = MockStoreApi::new();
        api.expect_submit_order().return_ok(OrderResult {
            id: OrderId("order-3".into()),
            total: price(350.0),
        });
        let (mut workflow, mut basket, _recorder) = setup(&api);
        let succeeded = phase_log(&workflow, Topic::OrderSucceeded);
        let invalid = phase_log(&workflow, Topic::OrderInvalid);

        workflow
            .submit(
                &mut basket,
                OrderForm {
                    email: " ".into(),
                    ..form()
                },
            )
            .await
            .unwrap_err();
        workflow.submit(&mut basket, form()).await.unwrap();

        assert_eq!(*invalid.lock().unwrap(), vec![CheckoutPhase::Invalid]);
        assert_eq!(*succeeded.lock().unwrap(), vec![CheckoutPhase::Succeeded]);
        assert_eq!(workflow.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn test_failure_listener_sees_failed_phase() {
        let api = MockStoreApi::new();
        api.expect_submit_order()
            .return_err(ApiError::Unavailable("connection reset".into()));
        let (mut workflow, mut basket, _recorder) = setup(&api);
        let failed = phase_log(&workflow, Topic::OrderFailed);

        workflow.submit(&mut basket, form()).await.unwrap_err();

        assert_eq!(*failed.lock().unwrap(), vec![CheckoutPhase::Failed]);
        assert_eq!(workflow.phase(), CheckoutPhase::Idle);
    }
}
