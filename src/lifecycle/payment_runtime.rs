use super::{await_tasks, RuntimeError, SystemConfig};
use crate::bus::{MessageBus, Topic};
use crate::inbox::{Inbox, InboxRetryLoop};
use crate::model::PaymentResult;
use crate::payment_service::{PaymentProcessor, PaymentService, ResultRepublisher};
use crate::shutdown::{self, ShutdownTrigger};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The running Payment service: ledger actor, payment processor and result retry loop.
pub struct PaymentServiceRuntime {
    /// Request-side API of the service.
    pub service: PaymentService,
    pending: Inbox<PaymentResult>,
    dead_letters: Inbox<PaymentResult>,
    processor_shutdown: ShutdownTrigger,
    processor: JoinHandle<()>,
    retry_shutdown: ShutdownTrigger,
    retry: JoinHandle<()>,
    actors: Vec<(&'static str, JoinHandle<()>)>,
}

impl PaymentServiceRuntime {
    /// Spawns the service. The `payment_tasks` subscription is open when this returns, so
    /// tasks published afterwards are seen.
    pub async fn start(
        bus: Arc<dyn MessageBus>,
        config: &SystemConfig,
    ) -> Result<Self, RuntimeError> {
        let subscription = bus.subscribe(Topic::PaymentTasks).await?;

        let (ledger_actor, ledger) = crate::ledger_actor::new(config.mailbox_capacity);
        let ledger_handle = tokio::spawn(ledger_actor.run(()));

        let pending = Inbox::new("pending_results");
        let dead_letters = Inbox::new("dead_results");
        // The retry loop outlives the processor's drain, so it gets its own signal.
        let (processor_shutdown, processor_signal) = shutdown::channel();
        let (retry_shutdown, retry_signal) = shutdown::channel();

        let processor = PaymentProcessor::new(ledger.clone(), bus.clone(), pending.clone());
        let processor_handle = tokio::spawn(processor.run(subscription, processor_signal));

        let retry = InboxRetryLoop::new(
            pending.clone(),
            dead_letters.clone(),
            ResultRepublisher::new(bus.clone()),
            config.results_retry.clone(),
        );
        let retry_handle = tokio::spawn(retry.run(retry_signal));

        info!("Payment service started");
        Ok(Self {
            service: PaymentService::new(ledger, bus),
            pending,
            dead_letters,
            processor_shutdown,
            processor: processor_handle,
            retry_shutdown,
            retry: retry_handle,
            actors: vec![("ledger", ledger_handle)],
        })
    }

    /// Results whose publish failed and that are waiting for the retry loop. Whatever is still
    /// here after [`shutdown`](Self::shutdown) was never delivered.
    pub fn pending_results(&self) -> &Inbox<PaymentResult> {
        &self.pending
    }

    /// Results that exhausted their re-publish attempts.
    pub fn dead_letters(&self) -> &Inbox<PaymentResult> {
        &self.dead_letters
    }

    /// Stops the processor (draining delivered tasks), then the retry loop, then lets the
    /// ledger actor exit. Results parked during the drain stay in
    /// [`pending_results`](Self::pending_results).
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        info!("Shutting down payment service...");
        self.processor_shutdown.trigger();
        await_tasks(vec![("payment_processor", self.processor)]).await?;

        self.retry_shutdown.trigger();
        await_tasks(vec![("result_retry", self.retry)]).await?;
        if !self.pending.is_empty() {
            warn!(undelivered = self.pending.len(), "Payment results left undelivered");
        }

        // The loops held the other ledger clients; this is the last one.
        drop(self.service);
        await_tasks(self.actors).await?;
        info!("Payment service stopped");
        Ok(())
    }
}
