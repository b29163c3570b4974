use rust_decimal::Decimal;
use shop_settlement::bus::{InMemoryBus, MessageBus};
use shop_settlement::lifecycle::{
    setup_tracing, OrderServiceRuntime, PaymentServiceRuntime, SystemConfig,
};
use shop_settlement::model::{OrderCreate, OrderId, OrderStatusView, UserId};
use shop_settlement::order_service::OrderService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    info!("Starting settlement demo");

    let config = SystemConfig::default();
    let bus: Arc<dyn MessageBus> = Arc::new(InMemoryBus::new());
    let payments = PaymentServiceRuntime::start(bus.clone(), &config).await?;
    let orders = OrderServiceRuntime::start(bus.clone(), &config).await?;

    // alice can pay: PAID, balance 100 - 40
    async {
        let alice = UserId::from("alice");
        payments.service.open_account(alice.clone()).await?;
        payments.service.deposit(alice.clone(), Decimal::from(100)).await?;
        let order = orders.service.create_order(order_for(&alice, 40, "book")).await?;
        let view = wait_settled(&orders.service, order.id).await?;
        let balance = payments.service.balance(alice).await?;
        info!(order_id = %order.id, status = %view.status, %balance, "Scenario done");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(info_span!("scenario_alice"))
    .await?;

    // bob has no account: FAILED, "Account not found"
    async {
        let bob = UserId::from("bob");
        let order = orders.service.create_order(order_for(&bob, 10, "pen")).await?;
        let view = wait_settled(&orders.service, order.id).await?;
        let settled = orders.service.get_order(order.id).await?;
        info!(order_id = %order.id, status = %view.status, reason = ?settled.failure_reason, "Scenario done");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(info_span!("scenario_bob"))
    .await?;

    // carol cannot cover the amount: FAILED, balance unchanged
    async {
        let carol = UserId::from("carol");
        payments.service.open_account(carol.clone()).await?;
        payments.service.deposit(carol.clone(), Decimal::from(5)).await?;
        let order = orders.service.create_order(order_for(&carol, 20, "lamp")).await?;
        let view = wait_settled(&orders.service, order.id).await?;
        let settled = orders.service.get_order(order.id).await?;
        let balance = payments.service.balance(carol).await?;
        info!(order_id = %order.id, status = %view.status, reason = ?settled.failure_reason, %balance, "Scenario done");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(info_span!("scenario_carol"))
    .await?;

    for order in orders.service.list_orders().await? {
        info!(order_id = %order.id, user_id = %order.user_id, status = %order.status, "Order");
    }

    orders.shutdown().await?;
    payments.shutdown().await?;
    bus.close().await;

    info!("Demo completed successfully");
    Ok(())
}

fn order_for(user_id: &UserId, amount: i64, description: &str) -> OrderCreate {
    OrderCreate {
        user_id: user_id.clone(),
        amount: Decimal::from(amount),
        description: description.to_string(),
    }
}

/// Polls the status projection until the order leaves `NEW`, giving up after two seconds.
async fn wait_settled(
    service: &OrderService,
    id: OrderId,
) -> Result<OrderStatusView, Box<dyn std::error::Error>> {
    for _ in 0..200 {
        let view = service.order_status(id).await?;
        if view.status.is_terminal() {
            return Ok(view);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    warn!(order_id = %id, "Order still NEW");
    Ok(service.order_status(id).await?)
}
