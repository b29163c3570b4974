//! A user's ledger account.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be owned by a [`ResourceActor`](actor_framework::ResourceActor).
//! Accounts are keyed by [`UserId`]; see [`crate::ledger_actor`] for the actions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifies the owner of an account (and the payer of an order).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: UserId,
    pub balance: Decimal,
}

impl Account {
    /// Opens an empty account for `user_id`.
    pub fn open(user_id: UserId) -> Self {
        Self {
            id: format!("acc_{user_id}"),
            user_id,
            balance: Decimal::ZERO,
        }
    }
}

/// Payload for opening an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOpen {
    pub user_id: UserId,
}
