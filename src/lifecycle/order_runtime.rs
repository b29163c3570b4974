use super::{await_tasks, RuntimeError, SystemConfig};
use crate::bus::{MessageBus, Topic};
use crate::order_service::{OrderResultConsumer, OrderService};
use crate::shutdown::{self, ShutdownTrigger};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// The running Order service: order actor and result consumer.
pub struct OrderServiceRuntime {
    /// Request-side API of the service.
    pub service: OrderService,
    shutdown: ShutdownTrigger,
    consumer: JoinHandle<()>,
    actor: JoinHandle<()>,
}

impl OrderServiceRuntime {
    /// Spawns the service with its `payment_results` subscription already open.
    pub async fn start(
        bus: Arc<dyn MessageBus>,
        config: &SystemConfig,
    ) -> Result<Self, RuntimeError> {
        let subscription = bus.subscribe(Topic::PaymentResults).await?;

        let (order_actor, orders) = crate::order_actor::new(config.mailbox_capacity);
        let actor = tokio::spawn(order_actor.run(()));

        let (trigger, signal) = shutdown::channel();
        let consumer =
            tokio::spawn(OrderResultConsumer::new(orders.clone()).run(subscription, signal));

        info!("Order service started");
        Ok(Self {
            service: OrderService::new(orders, bus),
            shutdown: trigger,
            consumer,
            actor,
        })
    }

    /// Stops the consumer (draining delivered results), then lets the order actor exit.
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        info!("Shutting down order service...");
        self.shutdown.trigger();
        await_tasks(vec![("result_consumer", self.consumer)]).await?;

        drop(self.service);
        await_tasks(vec![("orders", self.actor)]).await?;
        info!("Order service stopped");
        Ok(())
    }
}
