//! The Order service's consumer loop: payment results in, order transitions out.
//!
//! Nothing here retries. A result for an unknown order, or for one that is already settled,
//! is logged and dropped.

use crate::bus::{BusError, Subscription};
use crate::clients::OrderClient;
use crate::model::{OrderStatus, PaymentResult};
use crate::order_actor::OrderError;
use crate::shutdown::ShutdownSignal;
use tracing::{error, info, warn};

/// What happened to one payment result.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultDisposition {
    /// The order moved to this terminal status.
    Applied(OrderStatus),
    UnknownOrder,
    /// The order had already settled with this status and was left alone.
    AlreadySettled(OrderStatus),
    /// The order store could not be reached; the result is lost.
    Failed(String),
}

pub struct OrderResultConsumer {
    orders: OrderClient,
}

impl OrderResultConsumer {
    pub fn new(orders: OrderClient) -> Self {
        Self { orders }
    }

    /// Consumes `subscription` until it ends or `shutdown` fires, draining delivered results
    /// on shutdown.
    pub async fn run(self, mut subscription: Subscription, mut shutdown: ShutdownSignal) {
        info!(topic = %subscription.topic(), "Result consumer started");
        loop {
            tokio::select! {
                biased;
                _ = shutdown.triggered() => {
                    subscription.close();
                    while let Some(message) = subscription.next_json::<PaymentResult>().await {
                        self.on_message(message).await;
                    }
                    break;
                }
                message = subscription.next_json::<PaymentResult>() => match message {
                    Some(message) => self.on_message(message).await,
                    None => break,
                },
            }
        }
        info!("Result consumer stopped");
    }

    async fn on_message(&self, message: Result<PaymentResult, BusError>) {
        match message {
            Ok(result) => {
                self.handle_result(&result).await;
            }
            Err(e) => warn!(error = %e, "Dropping malformed payment result"),
        }
    }

    pub async fn handle_result(&self, result: &PaymentResult) -> ResultDisposition {
        let order_id = result.order_id;
        match self.orders.apply_result(result).await {
            Ok(order) => {
                info!(%order_id, status = %order.status, reason = ?order.failure_reason, "Order settled");
                ResultDisposition::Applied(order.status)
            }
            Err(OrderError::NotFound(_)) => {
                warn!(%order_id, "Result for unknown order dropped");
                ResultDisposition::UnknownOrder
            }
            Err(OrderError::AlreadySettled { status, .. }) => {
                warn!(%order_id, %status, "Duplicate result dropped");
                ResultDisposition::AlreadySettled(status)
            }
            Err(e) => {
                error!(%order_id, error = %e, "Result not applied");
                ResultDisposition::Failed(e.to_string())
            }
        }
    }
}
