use crate::ledger_actor::LedgerError;
use crate::model::UserId;
use thiserror::Error;

/// Errors returned by [`PaymentService`](super::PaymentService).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentServiceError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Account not found: {0}")]
    NotFound(UserId),

    #[error("Account already exists: {0}")]
    Conflict(UserId),

    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

impl PaymentServiceError {
    /// HTTP status an HTTP front end answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentServiceError::Validation(_) => 400,
            PaymentServiceError::NotFound(_) => 404,
            PaymentServiceError::Conflict(_) => 409,
            PaymentServiceError::Unavailable(_) => 503,
        }
    }
}

impl From<LedgerError> for PaymentServiceError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::NotFound(user_id) => PaymentServiceError::NotFound(user_id),
            LedgerError::AlreadyExists(user_id) => PaymentServiceError::Conflict(user_id),
            LedgerError::InvalidAmount(_)
            | LedgerError::InsufficientFunds { .. }
            | LedgerError::BalanceOverflow { .. } => {
                PaymentServiceError::Validation(e.to_string())
            }
            LedgerError::ActorCommunicationError(msg) => PaymentServiceError::Unavailable(msg),
        }
    }
}
