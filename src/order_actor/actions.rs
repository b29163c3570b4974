use crate::model::PaymentOutcome;

/// Custom actions for Order entities.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Settles a `NEW` order with a payment outcome. Resolves to the settled order.
    ApplyResult(PaymentOutcome),
}
