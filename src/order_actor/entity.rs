//! [`ActorEntity`] implementation for [`Order`].
//!
//! Order ids come from the actor's own sequence, so two identical create payloads still get
//! distinct ids. The store is keyed by [`OrderId`], which makes `List` return creation order.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    fn assign_id(seq: u64, _params: &OrderCreate) -> OrderId {
        OrderId(seq)
    }

    /// Rejects an empty `user_id` or a non-positive `amount`.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.user_id.as_str().trim().is_empty() {
            return Err(OrderError::ValidationError("user_id is required".into()));
        }
        if params.amount <= Decimal::ZERO {
            return Err(OrderError::ValidationError(format!(
                "amount must be positive, got {}",
                params.amount
            )));
        }
        Ok(Self::new(id, params.user_id, params.amount, params.description))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::ApplyResult(outcome) => {
                if self.status.is_terminal() {
                    return Err(OrderError::AlreadySettled {
                        id: self.id,
                        status: self.status,
                    });
                }
                self.settle(&outcome);
                info!(order_id = %self.id, status = %self.status, "Order settled");
                Ok(self.clone())
            }
        }
    }
}
