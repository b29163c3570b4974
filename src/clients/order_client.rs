//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
use crate::model::{Order, OrderCreate, OrderId, OrderStatusView, PaymentResult};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores a new `NEW` order and returns it with its generated id.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.find(id).await?.ok_or(OrderError::NotFound(id))
    }

    /// All orders in creation order.
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list().await
    }

    pub async fn order_status(&self, id: OrderId) -> Result<OrderStatusView, OrderError> {
        Ok(self.get_order(id).await?.status_view())
    }

    /// Settles the order named by `result`.
    ///
    /// Fails with `AlreadySettled` (order untouched) when the order is already terminal.
    #[instrument(skip(self, result), fields(order_id = %result.order_id))]
    pub async fn apply_result(&self, result: &PaymentResult) -> Result<Order, OrderError> {
        debug!(outcome = ?result.outcome, "Sending request");
        self.inner
            .perform_action(
                result.order_id,
                OrderAction::ApplyResult(result.outcome.clone()),
            )
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(order_error) => order_error,
            Err(FrameworkError::NotFound(id)) => match id.parse() {
                Ok(id) => OrderError::NotFound(id),
                Err(_) => OrderError::ActorCommunicationError(format!("unknown order key {id}")),
            },
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
