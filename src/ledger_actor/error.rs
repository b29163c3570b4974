//! Error types for the Ledger actor.

use crate::model::UserId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// No account is open for this user.
    #[error("Account not found: {0}")]
    NotFound(UserId),

    /// An account is already open for this user.
    #[error("Account already exists: {0}")]
    AlreadyExists(UserId),

    /// Credit and debit amounts must be strictly positive.
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// The balance does not cover the requested debit.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Decimal, available: Decimal },

    /// The credit would take the balance past the largest representable amount.
    #[error("Balance overflow: {balance} + {amount}")]
    BalanceOverflow { balance: Decimal, amount: Decimal },

    /// An error occurred while communicating with the ledger actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
