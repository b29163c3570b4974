//! # Order Service
//!
//! Owns the order store. [`OrderService`] creates orders and publishes their payment tasks;
//! [`OrderResultConsumer`] settles them when the Payment service answers.

pub mod consumer;
pub mod error;

pub use consumer::{OrderResultConsumer, ResultDisposition};
pub use error::OrderServiceError;

use crate::bus::{MessageBus, Topic};
use crate::clients::OrderClient;
use crate::model::{Order, OrderCreate, OrderId, OrderStatusView, PaymentTask};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Request-side facade of the Order service. Each method backs one HTTP route.
#[derive(Clone)]
pub struct OrderService {
    orders: OrderClient,
    bus: Arc<dyn MessageBus>,
}

impl OrderService {
    pub fn new(orders: OrderClient, bus: Arc<dyn MessageBus>) -> Self {
        Self { orders, bus }
    }

    /// `POST /orders`: stores a `NEW` order and publishes its payment task.
    ///
    /// When the publish fails the order stays stored as `NEW` and the caller gets
    /// `Transport`; nothing retries the task.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderServiceError> {
        let order = self.orders.create_order(params).await?;
        info!(order_id = %order.id, "Order created");

        let task = PaymentTask::from(&order);
        if let Err(e) = self.bus.publish_json(Topic::PaymentTasks, &task).await {
            error!(order_id = %order.id, error = %e, "Payment task not published");
            return Err(OrderServiceError::Transport(e.to_string()));
        }
        Ok(order)
    }

    /// `GET /orders`
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderServiceError> {
        Ok(self.orders.list_orders().await?)
    }

    /// `GET /orders/{id}`
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderServiceError> {
        Ok(self.orders.get_order(id).await?)
    }

    /// `GET /orders/{id}/status`
    pub async fn order_status(&self, id: OrderId) -> Result<OrderStatusView, OrderServiceError> {
        Ok(self.orders.order_status(id).await?)
    }

    /// `GET /health`: the bus must be reachable.
    pub async fn health(&self) -> Result<(), OrderServiceError> {
        self.bus
            .ping()
            .await
            .map_err(|e| OrderServiceError::Transport(e.to_string()))
    }
}
