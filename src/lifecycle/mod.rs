//! # Service Lifecycle
//!
//! Starting, wiring and stopping the two services.
//!
//! ## Wiring
//!
//! Each runtime creates its store actor first and spawns it with its context, then hands clones
//! of the store's client to the loops that need it:
//!
//! ```text
//! OrderServiceRuntime    order actor  <- OrderService, OrderResultConsumer  <- payment_results
//! PaymentServiceRuntime  ledger actor <- PaymentService, PaymentProcessor   <- payment_tasks
//!                                        InboxRetryLoop (pending results)   -> payment_results
//! ```
//!
//! Runtimes only share the bus. Subscriptions are opened inside `start`, so anything published
//! after `start` returns reaches the consumer.
//!
//! ## Graceful Shutdown
//!
//! 1. **Signal the loops** - a `watch`-based [`ShutdownSignal`](crate::shutdown::ShutdownSignal)
//!    fires; consumers close their subscription and drain what was already delivered.
//! 2. **Await the loops** - they return and drop their store clients. The Payment service stops
//!    its result retry loop only after the processor has drained, and keeps whatever is still
//!    parked in `pending_results()`.
//! 3. **Drop the facade** - the last client goes, the actor's `recv()` returns `None`.
//! 4. **Await the actors** - a panicked task is reported as [`RuntimeError::TaskFailed`].
//!
//! The dependency graph is acyclic, so dropping clients is enough to stop every actor.

pub mod config;
pub mod error;
pub mod order_runtime;
pub mod payment_runtime;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use order_runtime::*;
pub use payment_runtime::*;
pub use self::tracing::setup_tracing;

use tokio::task::JoinHandle;

/// Awaits every handle, failing on the first task that panicked or was cancelled.
async fn await_tasks(handles: Vec<(&'static str, JoinHandle<()>)>) -> Result<(), RuntimeError> {
    for (task, handle) in handles {
        if let Err(source) = handle.await {
            ::tracing::error!(task, error = %source, "Task failed");
            return Err(RuntimeError::TaskFailed { task, source });
        }
    }
    Ok(())
}
