mod common;

use common::settled;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shop_settlement::bus::{InMemoryBus, MessageBus, Topic};
use shop_settlement::lifecycle::{OrderServiceRuntime, PaymentServiceRuntime, SystemConfig};
use shop_settlement::model::{
    OrderCreate, OrderId, OrderStatus, PaymentResult, PaymentTask, UserId,
    REASON_ACCOUNT_NOT_FOUND, REASON_INSUFFICIENT_FUNDS,
};
use shop_settlement::order_service::OrderServiceError;
use shop_settlement::payment_service::PaymentServiceError;
use std::sync::Arc;

struct System {
    bus: Arc<dyn MessageBus>,
    payments: PaymentServiceRuntime,
    orders: OrderServiceRuntime,
}

impl System {
    async fn start() -> Self {
        let config = SystemConfig::default();
        let bus: Arc<dyn MessageBus> = Arc::new(InMemoryBus::new());
        let payments = PaymentServiceRuntime::start(bus.clone(), &config).await.unwrap();
        let orders = OrderServiceRuntime::start(bus.clone(), &config).await.unwrap();
        Self {
            bus,
            payments,
            orders,
        }
    }

    async fn fund(&self, user: &str, amount: Decimal) -> UserId {
        let user_id = UserId::from(user);
        self.payments.service.open_account(user_id.clone()).await.unwrap();
        self.payments
            .service
            .deposit(user_id.clone(), amount)
            .await
            .unwrap();
        user_id
    }

    async fn shutdown(self) {
        self.orders.shutdown().await.unwrap();
        self.payments.shutdown().await.unwrap();
    }
}

fn order(user: &str, amount: Decimal) -> OrderCreate {
    OrderCreate {
        user_id: user.into(),
        amount,
        description: "widget".into(),
    }
}

#[tokio::test]
async fn funded_order_is_paid_and_debited() {
    let system = System::start().await;
    let alice = system.fund("alice", dec!(100)).await;

    let created = system
        .orders
        .service
        .create_order(order("alice", dec!(40)))
        .await
        .unwrap();
    assert_eq!(created.status, OrderStatus::New);

    let paid = settled(&system.orders.service, created.id).await;
    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(paid.failure_reason, None);
    assert_eq!(system.payments.service.balance(alice).await.unwrap(), dec!(60));

    let view = system.orders.service.order_status(created.id).await.unwrap();
    assert_eq!((view.status, view.amount), (OrderStatus::Paid, dec!(40)));

    system.shutdown().await;
}

#[tokio::test]
async fn order_without_account_fails_and_touches_no_ledger() {
    let system = System::start().await;

    let created = system
        .orders
        .service
        .create_order(order("bob", dec!(10)))
        .await
        .unwrap();
    let failed = settled(&system.orders.service, created.id).await;
    assert_eq!(failed.status, OrderStatus::Failed);
    assert_eq!(failed.failure_reason.as_deref(), Some(REASON_ACCOUNT_NOT_FOUND));

    let err = system.payments.service.balance("bob".into()).await.unwrap_err();
    assert_eq!(err, PaymentServiceError::NotFound("bob".into()));
    assert_eq!(err.status_code(), 404);

    system.shutdown().await;
}

#[tokio::test]
async fn underfunded_order_fails_and_keeps_balance() {
    let system = System::start().await;
    let carol = system.fund("carol", dec!(5)).await;

    let created = system
        .orders
        .service
        .create_order(order("carol", dec!(20)))
        .await
        .unwrap();
    let failed = settled(&system.orders.service, created.id).await;
    assert_eq!(failed.status, OrderStatus::Failed);
    assert_eq!(failed.failure_reason.as_deref(), Some(REASON_INSUFFICIENT_FUNDS));
    assert_eq!(system.payments.service.balance(carol).await.unwrap(), dec!(5));

    system.shutdown().await;
}

#[tokio::test]
async fn concurrent_orders_never_overdraw() {
    let system = System::start().await;
    let dave = system.fund("dave", dec!(50)).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let service = system.orders.service.clone();
        handles.push(tokio::spawn(async move {
            service.create_order(order("dave", dec!(10))).await.unwrap()
        }));
    }
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().id);
    }

    let mut paid = 0;
    for id in ids {
        if settled(&system.orders.service, id).await.status == OrderStatus::Paid {
            paid += 1;
        }
    }
    assert_eq!(paid, 5);
    assert_eq!(system.payments.service.balance(dave).await.unwrap(), dec!(0));

    system.shutdown().await;
}

#[tokio::test]
async fn identical_payloads_get_distinct_ids_in_creation_order() {
    let system = System::start().await;

    let first = system
        .orders
        .service
        .create_order(order("erin", dec!(1)))
        .await
        .unwrap();
    let second = system
        .orders
        .service
        .create_order(order("erin", dec!(1)))
        .await
        .unwrap();
    assert_ne!(first.id, second.id);

    let listed: Vec<OrderId> = system
        .orders
        .service
        .list_orders()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(listed, [first.id, second.id]);

    system.shutdown().await;
}

#[tokio::test]
async fn invalid_orders_are_rejected_and_not_stored() {
    let system = System::start().await;

    for bad in [order("", dec!(10)), order("frank", dec!(0)), order("frank", dec!(-2))] {
        let err = system.orders.service.create_order(bad).await.unwrap_err();
        assert!(matches!(err, OrderServiceError::Validation(_)), "{err:?}");
        assert_eq!(err.status_code(), 400);
    }
    assert!(system.orders.service.list_orders().await.unwrap().is_empty());

    let missing = system.orders.service.get_order(OrderId(99)).await.unwrap_err();
    assert_eq!(missing, OrderServiceError::NotFound(OrderId(99)));
    assert_eq!(missing.status_code(), 404);

    system.shutdown().await;
}

#[tokio::test]
async fn duplicate_account_is_a_conflict() {
    let system = System::start().await;
    system.fund("gina", dec!(1)).await;

    let err = system
        .payments
        .service
        .open_account("gina".into())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);

    let bad_deposit = system
        .payments
        .service
        .deposit("gina".into(), dec!(0))
        .await
        .unwrap_err();
    assert_eq!(bad_deposit.status_code(), 400);

    let overflow = system
        .payments
        .service
        .deposit("gina".into(), Decimal::MAX)
        .await
        .unwrap_err();
    assert!(matches!(overflow, PaymentServiceError::Validation(_)), "{overflow:?}");

    let account = system.payments.service.account("gina".into()).await.unwrap();
    assert_eq!((account.id.as_str(), account.balance), ("acc_gina", dec!(1)));

    system.shutdown().await;
}

#[tokio::test]
async fn malformed_messages_are_dropped_without_stopping_the_loops() {
    let system = System::start().await;
    let hank = system.fund("hank", dec!(30)).await;

    for topic in [Topic::PaymentTasks, Topic::PaymentResults] {
        system.bus.publish(topic, b"{not json".to_vec()).await.unwrap();
        system
            .bus
            .publish(topic, br#"{"order_id":"ord_1"}"#.to_vec())
            .await
            .unwrap();
    }

    let created = system
        .orders
        .service
        .create_order(order("hank", dec!(30)))
        .await
        .unwrap();
    assert_eq!(
        settled(&system.orders.service, created.id).await.status,
        OrderStatus::Paid
    );
    assert_eq!(system.payments.service.balance(hank).await.unwrap(), dec!(0));

    system.shutdown().await;
}

#[tokio::test]
async fn first_result_wins() {
    let config = SystemConfig::default();
    let bus: Arc<dyn MessageBus> = Arc::new(InMemoryBus::new());
    // No payment service: results are injected by hand.
    let orders = OrderServiceRuntime::start(bus.clone(), &config).await.unwrap();

    let target = orders.service.create_order(order("ivy", dec!(8))).await.unwrap();
    let marker = orders.service.create_order(order("ivy", dec!(9))).await.unwrap();

    for result in [
        PaymentResult::failed(target.id, REASON_INSUFFICIENT_FUNDS),
        PaymentResult::paid(target.id),
        PaymentResult::paid(OrderId(404)),
        PaymentResult::paid(marker.id),
    ] {
        bus.publish_json(Topic::PaymentResults, &result).await.unwrap();
    }

    // Results on one topic are applied in order, so the marker settling means the rest did.
    settled(&orders.service, marker.id).await;
    let target = orders.service.get_order(target.id).await.unwrap();
    assert_eq!(target.status, OrderStatus::Failed);
    assert_eq!(target.failure_reason.as_deref(), Some(REASON_INSUFFICIENT_FUNDS));

    orders.shutdown().await.unwrap();
}

#[tokio::test]
async fn publish_failure_keeps_the_order_new() {
    let system = System::start().await;
    system.bus.close().await;

    let err = system
        .orders
        .service
        .create_order(order("jack", dec!(3)))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderServiceError::Transport(_)));
    assert_eq!(err.status_code(), 503);

    let stored = system.orders.service.list_orders().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, OrderStatus::New);

    assert_eq!(system.orders.service.health().await.unwrap_err().status_code(), 503);
    assert_eq!(system.payments.service.health().await.unwrap_err().status_code(), 503);

    system.shutdown().await;
}

#[tokio::test]
async fn shutdown_drains_delivered_tasks() {
    let config = SystemConfig::default();
    let bus: Arc<dyn MessageBus> = Arc::new(InMemoryBus::new());
    let mut results = bus.subscribe(Topic::PaymentResults).await.unwrap();
    let payments = PaymentServiceRuntime::start(bus.clone(), &config).await.unwrap();
    assert!(payments.service.health().await.is_ok());

    for n in 1..=3 {
        let task = PaymentTask {
            order_id: OrderId(n),
            user_id: "nobody".into(),
            amount: dec!(1),
            description: None,
        };
        bus.publish_json(Topic::PaymentTasks, &task).await.unwrap();
    }
    payments.shutdown().await.unwrap();

    for n in 1..=3 {
        let result: PaymentResult = results.next_json().await.unwrap().unwrap();
        assert_eq!(result, PaymentResult::failed(OrderId(n), REASON_ACCOUNT_NOT_FOUND));
    }
}
