//! Bus payloads exchanged between the Order and Payment services.
//!
//! These two types are the whole contract between the services; neither side sees the
//! other's stores. Both are JSON on the wire:
//!
//! ```text
//! payment_tasks:   {"order_id":"ord_1","user_id":"alice","amount":"40","description":"book"}
//! payment_results: {"order_id":"ord_1","status":"PAID"}
//!                  {"order_id":"ord_2","status":"FAILED","reason":"Account not found"}
//! ```

use crate::model::{Order, OrderId, OrderStatus, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Failure reason when the payer has no account.
pub const REASON_ACCOUNT_NOT_FOUND: &str = "Account not found";
/// Failure reason when the balance does not cover the amount.
pub const REASON_INSUFFICIENT_FUNDS: &str = "Insufficient funds";
/// Failure reason for a non-positive amount.
pub const REASON_INVALID_AMOUNT: &str = "Invalid amount";
/// Failure reason when the ledger could not be reached.
pub const REASON_LEDGER_UNAVAILABLE: &str = "Ledger unavailable";

/// Request to charge `user_id` for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTask {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Order> for PaymentTask {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            user_id: order.user_id.clone(),
            amount: order.amount,
            description: Some(order.description.clone()).filter(|d| !d.is_empty()),
        }
    }
}

/// Outcome of a payment task, correlated by `order_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub order_id: OrderId,
    #[serde(flatten)]
    pub outcome: PaymentOutcome,
}

impl PaymentResult {
    pub fn paid(order_id: OrderId) -> Self {
        Self {
            order_id,
            outcome: PaymentOutcome::Paid,
        }
    }

    pub fn failed(order_id: OrderId, reason: impl Into<String>) -> Self {
        Self {
            order_id,
            outcome: PaymentOutcome::Failed {
                reason: reason.into(),
            },
        }
    }
}

/// `status` on the wire; `reason` exists only on `FAILED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentOutcome {
    Paid,
    Failed { reason: String },
}

impl PaymentOutcome {
    /// The terminal order status this outcome settles to.
    pub fn status(&self) -> OrderStatus {
        match self {
            PaymentOutcome::Paid => OrderStatus::Paid,
            PaymentOutcome::Failed { .. } => OrderStatus::Failed,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            PaymentOutcome::Paid => None,
            PaymentOutcome::Failed { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_wire_shape() {
        let paid = serde_json::to_value(PaymentResult::paid(OrderId(1))).unwrap();
        assert_eq!(paid, json!({"order_id": "ord_1", "status": "PAID"}));

        let failed =
            serde_json::to_value(PaymentResult::failed(OrderId(2), REASON_ACCOUNT_NOT_FOUND))
                .unwrap();
        assert_eq!(
            failed,
            json!({"order_id": "ord_2", "status": "FAILED", "reason": "Account not found"})
        );
    }

    #[test]
    fn failed_result_requires_reason() {
        let missing = r#"{"order_id":"ord_3","status":"FAILED"}"#;
        assert!(serde_json::from_str::<PaymentResult>(missing).is_err());

        let unknown = r#"{"order_id":"ord_3","status":"REFUNDED"}"#;
        assert!(serde_json::from_str::<PaymentResult>(unknown).is_err());
    }

    #[test]
    fn task_accepts_numeric_amounts_and_extra_fields() {
        let raw = r#"{"order_id":"ord_9","user_id":"alice","amount":40,"description":"book","coupon":null}"#;
        let task: PaymentTask = serde_json::from_str(raw).unwrap();
        assert_eq!(task.order_id, OrderId(9));
        assert_eq!(task.amount, Decimal::new(40, 0));
        assert_eq!(task.description.as_deref(), Some("book"));
    }

    #[test]
    fn outcome_maps_to_terminal_status() {
        assert_eq!(PaymentOutcome::Paid.status(), OrderStatus::Paid);
        let failed = PaymentOutcome::Failed {
            reason: REASON_INSUFFICIENT_FUNDS.into(),
        };
        assert_eq!(failed.status(), OrderStatus::Failed);
        assert_eq!(failed.reason(), Some(REASON_INSUFFICIENT_FUNDS));
    }
}
