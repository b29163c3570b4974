//! A customer order awaiting (or settled by) a payment outcome.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be owned by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`crate::order_actor`] for creation rules and the `ApplyResult` action.

use crate::model::{PaymentOutcome, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Orders, rendered as `ord_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ord_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order id: {0:?}")]
pub struct ParseOrderIdError(pub String);

impl FromStr for OrderId {
    type Err = ParseOrderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("ord_")
            .and_then(|n| n.parse().ok())
            .map(Self)
            .ok_or_else(|| ParseOrderIdError(s.to_string()))
    }
}

impl TryFrom<String> for OrderId {
    type Error = ParseOrderIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.to_string()
    }
}

/// `NEW → {PAID, FAILED}`; both targets are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    Paid,
    Failed,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::New)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OrderStatus::New => "NEW",
            OrderStatus::Paid => "PAID",
            OrderStatus::Failed => "FAILED",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub amount: Decimal,
    pub description: String,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl Order {
    /// Creates a new order in status `NEW`.
    pub fn new(id: OrderId, user_id: UserId, amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            amount,
            description: description.into(),
            status: OrderStatus::New,
            failure_reason: None,
        }
    }

    /// Moves the order to the terminal status described by `outcome`.
    ///
    /// Callers must check [`OrderStatus::is_terminal`] first; settling twice is a bug.
    pub(crate) fn settle(&mut self, outcome: &PaymentOutcome) {
        debug_assert!(!self.status.is_terminal(), "order {} settled twice", self.id);
        match outcome {
            PaymentOutcome::Paid => {
                self.status = OrderStatus::Paid;
                self.failure_reason = None;
            }
            PaymentOutcome::Failed { reason } => {
                self.status = OrderStatus::Failed;
                self.failure_reason = Some(reason.clone());
            }
        }
    }

    /// The `{status, amount}` projection served by the status endpoint.
    pub fn status_view(&self) -> OrderStatusView {
        OrderStatusView {
            status: self.status,
            amount: self.amount,
        }
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusView {
    pub status: OrderStatus,
    pub amount: Decimal,
}
