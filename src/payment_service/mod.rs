//! # Payment Service
//!
//! Owns the ledger. Synchronous requests (open account, deposit, balance) go through
//! [`PaymentService`]; payment tasks arrive on the bus and are handled by [`PaymentProcessor`].

pub mod error;
pub mod processor;

pub use error::PaymentServiceError;
pub use processor::{PaymentProcessor, ResultRepublisher};

use crate::bus::MessageBus;
use crate::clients::LedgerClient;
use crate::model::{Account, UserId};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};

/// Request-side facade of the Payment service. Each method backs one HTTP route.
#[derive(Clone)]
pub struct PaymentService {
    ledger: LedgerClient,
    bus: Arc<dyn MessageBus>,
}

impl PaymentService {
    pub fn new(ledger: LedgerClient, bus: Arc<dyn MessageBus>) -> Self {
        Self { ledger, bus }
    }

    /// `POST /accounts`
    #[instrument(skip(self))]
    pub async fn open_account(&self, user_id: UserId) -> Result<Account, PaymentServiceError> {
        if user_id.as_str().trim().is_empty() {
            return Err(PaymentServiceError::Validation("user_id is required".into()));
        }
        let account = self.ledger.open_account(user_id).await?;
        info!(account_id = %account.id, "Account opened");
        Ok(account)
    }

    /// `POST /accounts/{id}/deposit`, returns the new balance.
    #[instrument(skip(self))]
    pub async fn deposit(
        &self,
        user_id: UserId,
        amount: Decimal,
    ) -> Result<Decimal, PaymentServiceError> {
        let balance = self.ledger.credit(user_id, amount).await?;
        info!(%balance, "Deposit accepted");
        Ok(balance)
    }

    /// `GET /accounts/{id}/balance`
    pub async fn balance(&self, user_id: UserId) -> Result<Decimal, PaymentServiceError> {
        Ok(self.ledger.balance(user_id).await?)
    }

    pub async fn account(&self, user_id: UserId) -> Result<Account, PaymentServiceError> {
        Ok(self.ledger.account(user_id).await?)
    }

    /// `GET /health`: the bus must be reachable.
    pub async fn health(&self) -> Result<(), PaymentServiceError> {
        self.bus
            .ping()
            .await
            .map_err(|e| PaymentServiceError::Unavailable(e.to_string()))
    }
}
