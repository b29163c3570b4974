//! The Payment service's consumer loop.
//!
//! One [`PaymentTask`] in, one [`PaymentResult`] out. The decision is a single ledger `Debit`,
//! so "look up, check, subtract" cannot interleave with another debit for the same account.

use crate::bus::{BusError, MessageBus, Subscription, Topic};
use crate::clients::LedgerClient;
use crate::inbox::{Inbox, InboxHandler};
use crate::ledger_actor::LedgerError;
use crate::model::{
    PaymentResult, PaymentTask, REASON_ACCOUNT_NOT_FOUND, REASON_INSUFFICIENT_FUNDS,
    REASON_INVALID_AMOUNT, REASON_LEDGER_UNAVAILABLE,
};
use crate::shutdown::ShutdownSignal;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

pub struct PaymentProcessor {
    ledger: LedgerClient,
    bus: Arc<dyn MessageBus>,
    pending_results: Inbox<PaymentResult>,
}

impl PaymentProcessor {
    /// `pending_results` receives results whose publish failed, for an
    /// [`InboxRetryLoop`](crate::inbox::InboxRetryLoop) to re-send.
    pub fn new(
        ledger: LedgerClient,
        bus: Arc<dyn MessageBus>,
        pending_results: Inbox<PaymentResult>,
    ) -> Self {
        Self {
            ledger,
            bus,
            pending_results,
        }
    }

    /// Consumes `subscription` until it ends or `shutdown` fires.
    ///
    /// On shutdown the subscription is closed and the tasks already delivered to it are still
    /// processed before returning.
    pub async fn run(self, mut subscription: Subscription, mut shutdown: ShutdownSignal) {
        info!(topic = %subscription.topic(), "Payment processor started");
        loop {
            tokio::select! {
                biased;
                _ = shutdown.triggered() => {
                    subscription.close();
                    while let Some(message) = subscription.next_json::<PaymentTask>().await {
                        self.on_message(message).await;
                    }
                    break;
                }
                message = subscription.next_json::<PaymentTask>() => match message {
                    Some(message) => self.on_message(message).await,
                    None => break,
                },
            }
        }
        info!("Payment processor stopped");
    }

    async fn on_message(&self, message: Result<PaymentTask, BusError>) {
        match message {
            Ok(task) => {
                let span = info_span!("payment_task", order_id = %task.order_id, user_id = %task.user_id);
                async {
                    let result = self.handle_task(&task).await;
                    self.publish_result(result).await;
                }
                .instrument(span)
                .await
            }
            Err(e) => warn!(error = %e, "Dropping malformed payment task"),
        }
    }

    /// Charges the task's account and builds the result. Never fails: every ledger outcome maps
    /// to `PAID` or to `FAILED` with a reason.
    pub async fn handle_task(&self, task: &PaymentTask) -> PaymentResult {
        match self.ledger.debit(task.user_id.clone(), task.amount).await {
            Ok(balance) => {
                info!(amount = %task.amount, %balance, "Payment captured");
                PaymentResult::paid(task.order_id)
            }
            Err(e) => {
                let reason = match &e {
                    LedgerError::NotFound(_) => REASON_ACCOUNT_NOT_FOUND,
                    LedgerError::InsufficientFunds { .. } => REASON_INSUFFICIENT_FUNDS,
                    LedgerError::InvalidAmount(_) | LedgerError::BalanceOverflow { .. } => {
                        REASON_INVALID_AMOUNT
                    }
                    LedgerError::AlreadyExists(_) | LedgerError::ActorCommunicationError(_) => {
                        error!(error = %e, "Ledger unavailable");
                        REASON_LEDGER_UNAVAILABLE
                    }
                };
                info!(reason, error = %e, "Payment declined");
                PaymentResult::failed(task.order_id, reason)
            }
        }
    }

    async fn publish_result(&self, result: PaymentResult) {
        match self.bus.publish_json(Topic::PaymentResults, &result).await {
            Ok(()) => debug!(outcome = ?result.outcome, "Result published"),
            Err(e) => {
                warn!(error = %e, "Result publish failed, parked for retry");
                self.pending_results.push(result);
            }
        }
    }
}

/// Re-publishes parked results on `payment_results`.
pub struct ResultRepublisher {
    bus: Arc<dyn MessageBus>,
}

impl ResultRepublisher {
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl InboxHandler<PaymentResult> for ResultRepublisher {
    type Error = BusError;

    async fn handle(&self, result: &PaymentResult) -> Result<(), BusError> {
        self.bus.publish_json(Topic::PaymentResults, result).await
    }
}
