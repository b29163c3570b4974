use crate::model::OrderId;
use crate::order_actor::OrderError;
use thiserror::Error;

/// Errors returned by [`OrderService`](super::OrderService).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderServiceError {
    #[error("Invalid order: {0}")]
    Validation(String),

    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The order store or the bus could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl OrderServiceError {
    /// HTTP status an HTTP front end answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            OrderServiceError::Validation(_) => 400,
            OrderServiceError::NotFound(_) => 404,
            OrderServiceError::Transport(_) => 503,
        }
    }
}

impl From<OrderError> for OrderServiceError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => OrderServiceError::NotFound(id),
            OrderError::ValidationError(msg) => OrderServiceError::Validation(msg),
            OrderError::AlreadySettled { .. } | OrderError::ActorCommunicationError(_) => {
                OrderServiceError::Transport(e.to_string())
            }
        }
    }
}
