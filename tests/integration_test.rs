use event_bus::mock::EventRecorder;
use std::sync::Arc;
use std::time::Duration;
use storefront::checkout::{validation, CheckoutPhase, OrderError};
use storefront::clients::mock::MockStoreApi;
use storefront::clients::ApiError;
use storefront::config::StoreConfig;
use storefront::error::StoreError;
use storefront::events::{StoreEvent, Topic};
use storefront::lifecycle::Storefront;
use storefront::model::{
    Category, ContactDetails, OrderForm, OrderId, OrderResult, PaymentDetails, PaymentMethod,
    Price, Product, ProductId, ProductList,
};

fn price(amount: f64) -> Price {
    Price::new(amount).unwrap()
}

fn listing() -> ProductList {
    ProductList::from(vec![
        Product::new("P1", "+1 час в сутках", Category::SoftSkill, Price::new(100.0)),
        Product::new("P2", "HEX-леденец", Category::Other, Price::new(250.0)),
        Product::new("P3", "Мамка-таймер", Category::Other, None),
        Product::new("P4", "Фреймворк куки", Category::Additional, Price::new(2500.0)),
    ])
}

fn buyer() -> OrderForm {
    OrderForm {
        payment: Some(PaymentMethod::Online),
        address: "Spb Vosstania 1".into(),
        email: "test@test.ru".into(),
        phone: "+71234567890".into(),
    }
}

fn accepted(id: &str, total: f64) -> OrderResult {
    OrderResult {
        id: OrderId(id.into()),
        total: price(total),
    }
}

async fn start(api: &MockStoreApi, config: StoreConfig) -> Storefront {
    api.expect_list_products().return_ok(listing());
    let storefront = Storefront::start(&config, Arc::new(api.clone()));
    storefront.client.load_catalog().await.expect("catalog should load");
    storefront
}

async fn fill_basket(storefront: &Storefront) {
    for id in ["P1", "P2"] {
        storefront
            .client
            .add_to_basket(ProductId::from(id))
            .await
            .expect("add should succeed");
    }
}

/// Full happy path: catalog, basket, checkout, result.
#[tokio::test]
async fn test_successful_order_clears_basket_then_announces() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test")).await;
    fill_basket(&storefront).await;

    let recorder = EventRecorder::attach(
        &storefront.bus,
        Topic::BASKET.into_iter().chain(Topic::ORDER),
    );
    api.expect_submit_order().return_ok(accepted("28c57cb4-3002-4445-8aa1-2a06a5055ae5", 350.0));

    let result = storefront.client.place_order(buyer()).await.unwrap();

    assert_eq!(result, accepted("28c57cb4-3002-4445-8aa1-2a06a5055ae5", 350.0));
    assert!(storefront.client.basket().await.unwrap().is_empty());

    let mut expected = Topic::BASKET.to_vec();
    expected.push(Topic::OrderSucceeded);
    assert_eq!(recorder.topics(), expected);
    assert_eq!(
        recorder.skip_to(Topic::OrderSucceeded),
        Some(StoreEvent::OrderSucceeded(result))
    );

    let sent = api.submitted();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].items, vec![ProductId::from("P1"), ProductId::from("P2")]);
    assert_eq!(sent[0].total, price(350.0));

    api.verify();
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_order_keeps_basket() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test")).await;
    fill_basket(&storefront).await;
    let before = storefront.client.basket().await.unwrap();

    let recorder = EventRecorder::attach(&storefront.bus, Topic::ORDER);
    api.expect_submit_order().return_err(ApiError::Rejected {
        status: 400,
        message: "Неверная сумма заказа".into(),
    });

    let err = storefront.client.place_order(buyer()).await.unwrap_err();

    assert!(matches!(err, StoreError::Order(OrderError::Rejected(_))));
    assert_eq!(storefront.client.basket().await.unwrap(), before);
    assert_eq!(
        recorder.take(),
        vec![StoreEvent::OrderFailed("Неверная сумма заказа".into())]
    );

    // The buyer may simply try again.
    api.expect_submit_order().return_ok(accepted("retry", 350.0));
    storefront.client.place_order(buyer()).await.unwrap();
    assert!(storefront.client.basket().await.unwrap().is_empty());

    api.verify();
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_address_is_reported_and_nothing_is_sent() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test")).await;
    fill_basket(&storefront).await;
    let before = storefront.client.basket().await.unwrap();
    let recorder = EventRecorder::attach(&storefront.bus, Topic::ORDER);

    let err = storefront
        .client
        .place_order(OrderForm {
            address: "  ".into(),
            ..buyer()
        })
        .await
        .unwrap_err();

    let StoreError::Order(OrderError::Invalid(errors)) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert!(errors.iter().any(|e| e == validation::ADDRESS_REQUIRED));
    assert_eq!(storefront.client.basket().await.unwrap(), before);
    assert_eq!(recorder.topics(), vec![Topic::OrderInvalid]);
    assert!(api.submitted().is_empty());

    api.verify();
    storefront.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_unresponsive_service_times_out() {
    let api = MockStoreApi::new();
    let config = StoreConfig::new("http://store.test").with_submit_timeout(Duration::from_secs(3));
    let storefront = start(&api, config).await;
    fill_basket(&storefront).await;
    api.expect_submit_order()
        .after(Duration::from_secs(300))
        .return_ok(accepted("too-late", 350.0));

    let err = storefront.client.place_order(buyer()).await.unwrap_err();

    assert!(matches!(
        err,
        StoreError::Order(OrderError::TimedOut(d)) if d == Duration::from_secs(3)
    ));
    assert_eq!(storefront.client.basket().await.unwrap().len(), 2);

    storefront.shutdown().await.unwrap();
}

/// A second checkout while the first is in flight waits for it instead of interleaving.
#[tokio::test(start_paused = true)]
async fn test_second_checkout_waits_for_first() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test")).await;
    fill_basket(&storefront).await;
    api.expect_submit_order()
        .after(Duration::from_secs(2))
        .return_ok(accepted("only-once", 350.0));

    let (first, second) = tokio::join!(
        storefront.client.place_order(buyer()),
        storefront.client.place_order(buyer()),
    );

    assert_eq!(first.unwrap().id, OrderId("only-once".into()));
    let Err(StoreError::Order(OrderError::Invalid(errors))) = second else {
        panic!("second checkout should see the emptied basket");
    };
    assert_eq!(errors, vec![validation::BASKET_EMPTY]);
    assert_eq!(api.submitted().len(), 1);

    api.verify();
    storefront.shutdown().await.unwrap();
}

/// Presentation drives the storefront purely through bus intents.
#[tokio::test]
async fn test_bus_intents_drive_the_checkout() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test")).await;
    let recorder = EventRecorder::attach(&storefront.bus, [Topic::BasketItemCount, Topic::OrderSucceeded]);
    api.expect_submit_order().return_ok(accepted("via-bus", 2500.0));

    let bus = &storefront.bus;
    bus.publish(StoreEvent::BasketAdd(ProductId::from("P1")));
    bus.publish(StoreEvent::BasketAdd(ProductId::from("P3")));
    bus.publish(StoreEvent::BasketAdd(ProductId::from("P4")));
    bus.publish(StoreEvent::BasketRemove(ProductId::from("P1")));
    bus.publish(StoreEvent::CheckoutStart);
    bus.publish(StoreEvent::PaymentComplete(PaymentDetails {
        payment: Some(PaymentMethod::Cash),
        address: "Spb Vosstania 1".into(),
    }));
    bus.publish(StoreEvent::ContactComplete(ContactDetails {
        email: "test@test.ru".into(),
        phone: "+71234567890".into(),
    }));

    // Bus intents are drained first, so this resolves after all of them.
    let basket = storefront.client.basket().await.unwrap();
    assert!(basket.is_empty());

    assert_eq!(
        recorder.take(),
        vec![
            StoreEvent::BasketItemCount(1),
            StoreEvent::BasketItemCount(2),
            StoreEvent::BasketItemCount(1),
            StoreEvent::BasketItemCount(0),
            StoreEvent::OrderSucceeded(accepted("via-bus", 2500.0)),
        ]
    );
    let sent = api.submitted();
    assert_eq!(sent[0].items, vec![ProductId::from("P4")]);
    assert_eq!(sent[0].payment, PaymentMethod::Cash);

    api.verify();
    storefront.shutdown().await.unwrap();
}

/// Bus intents published while the actor is busy are queued, never dropped, however small
/// the client queue is.
#[tokio::test(start_paused = true)]
async fn test_bus_intents_survive_a_busy_actor() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test").with_channel_buffer(1)).await;
    fill_basket(&storefront).await;
    api.expect_submit_order()
        .after(Duration::from_secs(10))
        .return_err(ApiError::Unavailable("gateway timeout".into()));

    let client = storefront.client.clone();
    let pending = tokio::spawn(async move { client.place_order(buyer()).await });
    // Let the actor pick the order up and block on the slow service.
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(*storefront.phase.borrow(), CheckoutPhase::Submitting);

    let deliveries = [
        storefront.bus.publish(StoreEvent::BasketAdd(ProductId::from("P4"))),
        storefront.bus.publish(StoreEvent::BasketRemove(ProductId::from("P1"))),
        storefront.bus.publish(StoreEvent::ModalClosed),
        storefront.bus.publish(StoreEvent::ModalClosed),
    ];
    assert!(deliveries.iter().all(|d| d.is_clean() && d.delivered == 1));

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(err, StoreError::Order(OrderError::Unavailable(_))));

    let basket = storefront.client.basket().await.unwrap();
    assert_eq!(basket.item_ids(), vec![ProductId::from("P2"), ProductId::from("P4")]);
    assert_eq!(basket.total, price(2750.0));
    assert_eq!(*storefront.phase.borrow(), CheckoutPhase::Idle);

    api.verify();
    storefront.shutdown().await.unwrap();
}

/// Publishing an intent only queues it. Its notifications arrive once the actor has applied
/// it, which is guaranteed by the time any later client call resolves.
#[tokio::test]
async fn test_bus_intent_effect_is_visible_after_next_client_call() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test")).await;
    let recorder = EventRecorder::attach(&storefront.bus, [Topic::BasketItemCount]);

    let delivery = storefront.bus.publish(StoreEvent::BasketAdd(ProductId::from("P1")));

    assert!(delivery.is_clean());
    assert!(recorder.is_empty());

    let preview = storefront.client.preview(ProductId::from("P1")).await.unwrap();

    assert!(preview.in_basket);
    assert_eq!(recorder.take(), vec![StoreEvent::BasketItemCount(1)]);

    api.verify();
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_reload_failure_keeps_products() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test")).await;
    api.expect_list_products()
        .return_err(ApiError::Unavailable("connection refused".into()));

    let err = storefront.client.load_catalog().await.unwrap_err();

    assert!(matches!(err, StoreError::Catalog(_)));
    assert_eq!(storefront.client.products(None).await.unwrap().len(), 4);
    assert_eq!(
        storefront
            .client
            .products(Some(Category::Other))
            .await
            .unwrap()
            .len(),
        2
    );

    api.verify();
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_detaches_from_bus() {
    let api = MockStoreApi::new();
    let storefront = start(&api, StoreConfig::new("http://store.test")).await;
    let bus = storefront.bus.clone();
    assert_eq!(bus.subscriber_count(Topic::BasketAdd), 1);

    storefront.shutdown().await.unwrap();

    assert_eq!(bus.subscriber_count(Topic::BasketAdd), 0);
    assert_eq!(bus.publish(StoreEvent::BasketAdd(ProductId::from("P1"))).delivered, 0);
}
