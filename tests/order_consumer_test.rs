use actor_framework::mock::MockClient;
use actor_framework::FrameworkError;
use rust_decimal_macros::dec;
use shop_settlement::bus::{InMemoryBus, MessageBus, Topic};
use shop_settlement::clients::OrderClient;
use shop_settlement::model::{
    Order, OrderCreate, OrderId, OrderStatus, PaymentResult, REASON_ACCOUNT_NOT_FOUND,
};
use shop_settlement::order_service::{OrderResultConsumer, ResultDisposition};
use shop_settlement::shutdown;
use std::sync::Arc;

fn new_order(user: &str) -> OrderCreate {
    OrderCreate {
        user_id: user.into(),
        amount: dec!(12.5),
        description: String::new(),
    }
}

/// Real Order actor: the first result settles the order, later ones are no-ops.
#[tokio::test]
async fn applies_once_then_ignores_duplicates() {
    let (actor, orders) = shop_settlement::order_actor::new(8);
    let handle = tokio::spawn(actor.run(()));
    let consumer = OrderResultConsumer::new(orders.clone());

    let order = orders.create_order(new_order("alice")).await.unwrap();
    assert_eq!(
        consumer.handle_result(&PaymentResult::paid(order.id)).await,
        ResultDisposition::Applied(OrderStatus::Paid)
    );
    assert_eq!(
        consumer
            .handle_result(&PaymentResult::failed(order.id, REASON_ACCOUNT_NOT_FOUND))
            .await,
        ResultDisposition::AlreadySettled(OrderStatus::Paid)
    );
    assert_eq!(
        consumer.handle_result(&PaymentResult::paid(OrderId(999))).await,
        ResultDisposition::UnknownOrder
    );

    let stored = orders.get_order(order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Paid);
    assert_eq!(stored.failure_reason, None);

    drop(consumer);
    drop(orders);
    handle.await.unwrap();
}

/// Mocked store: a transport failure is reported, not retried.
#[tokio::test]
async fn store_failure_is_reported() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_action(OrderId(7))
        .return_err(FrameworkError::ActorDropped);

    let consumer = OrderResultConsumer::new(OrderClient::new(mock.client()));
    let disposition = consumer.handle_result(&PaymentResult::paid(OrderId(7))).await;
    assert!(matches!(disposition, ResultDisposition::Failed(_)), "{disposition:?}");

    mock.verify();
}

/// The loop keeps going past undecodable results and stops on shutdown.
#[tokio::test]
async fn loop_skips_garbage_and_stops_on_signal() {
    let (actor, orders) = shop_settlement::order_actor::new(8);
    let actor_handle = tokio::spawn(actor.run(()));
    let order = orders.create_order(new_order("bob")).await.unwrap();

    let memory = Arc::new(InMemoryBus::new());
    let bus: Arc<dyn MessageBus> = memory.clone();
    let subscription = bus.subscribe(Topic::PaymentResults).await.unwrap();
    let (trigger, signal) = shutdown::channel();
    let consumer = tokio::spawn(OrderResultConsumer::new(orders.clone()).run(subscription, signal));

    bus.publish(Topic::PaymentResults, b"\x00\x01".to_vec())
        .await
        .unwrap();
    bus.publish(
        Topic::PaymentResults,
        br#"{"order_id":"42","status":"PAID"}"#.to_vec(),
    )
    .await
    .unwrap();
    bus.publish_json(
        Topic::PaymentResults,
        &PaymentResult::failed(order.id, REASON_ACCOUNT_NOT_FOUND),
    )
    .await
    .unwrap();

    let settled = {
        let orders = orders.clone();
        let id = order.id;
        tokio::time::timeout(std::time::Duration::from_secs(5), async move {
            loop {
                let current = orders.get_order(id).await.unwrap();
                if current.status.is_terminal() {
                    return current;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap()
    };
    assert_eq!(settled.status, OrderStatus::Failed);
    assert_eq!(settled.failure_reason.as_deref(), Some(REASON_ACCOUNT_NOT_FOUND));

    trigger.trigger();
    consumer.await.unwrap();
    assert_eq!(memory.subscriber_count(Topic::PaymentResults), 0);

    drop(orders);
    actor_handle.await.unwrap();
}
