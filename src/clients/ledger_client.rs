//! # Ledger Client
//!
//! High-level API over a `ResourceClient<Account>`. Framework errors are translated back into
//! [`LedgerError`] so callers can match on `InsufficientFunds` and friends.
use crate::ledger_actor::{LedgerAction, LedgerError};
use crate::model::{Account, AccountOpen, UserId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Ledger actor.
#[derive(Clone)]
pub struct LedgerClient {
    inner: ResourceClient<Account>,
}

impl LedgerClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }

    /// Opens an empty account. Fails with `AlreadyExists` if the user already has one.
    #[instrument(skip(self))]
    pub async fn open_account(&self, user_id: UserId) -> Result<Account, LedgerError> {
        debug!("Sending request");
        self.inner
            .create(AccountOpen { user_id })
            .await
            .map_err(Self::map_error)
    }

    /// Adds `amount` and returns the new balance.
    #[instrument(skip(self))]
    pub async fn credit(&self, user_id: UserId, amount: Decimal) -> Result<Decimal, LedgerError> {
        debug!("Sending request");
        self.inner
            .perform_action(user_id, LedgerAction::Credit(amount))
            .await
            .map_err(Self::map_error)
    }

    /// Subtracts `amount` if the balance covers it and returns the new balance.
    ///
    /// The sufficiency check and the subtraction run as one step inside the actor.
    #[instrument(skip(self))]
    pub async fn debit(&self, user_id: UserId, amount: Decimal) -> Result<Decimal, LedgerError> {
        debug!("Sending request");
        self.inner
            .perform_action(user_id, LedgerAction::Debit(amount))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn account(&self, user_id: UserId) -> Result<Account, LedgerError> {
        self.find(user_id.clone())
            .await?
            .ok_or(LedgerError::NotFound(user_id))
    }

    /// Point-in-time balance.
    pub async fn balance(&self, user_id: UserId) -> Result<Decimal, LedgerError> {
        Ok(self.account(user_id).await?.balance)
    }
}

#[async_trait]
impl ActorClient<Account> for LedgerClient {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<LedgerError>() {
            Ok(ledger_error) => ledger_error,
            Err(FrameworkError::NotFound(id)) => LedgerError::NotFound(id.into()),
            Err(FrameworkError::AlreadyExists(id)) => LedgerError::AlreadyExists(id.into()),
            Err(other) => LedgerError::ActorCommunicationError(other.to_string()),
        }
    }
}
