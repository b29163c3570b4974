//! # Shop Settlement
//!
//! > **Order/payment settlement between two services that only talk over a message bus.**
//!
//! The Order service stores orders and publishes a payment task for each one. The Payment
//! service owns the ledger, charges the account and publishes a result. The Order service
//! settles the order when the result arrives. Neither service calls the other; the bus is the
//! only coupling.
//!
//! ```text
//! OrderService::create_order ──> order actor (NEW)
//!        │ publish PaymentTask
//!        ▼
//!   payment_tasks ──> PaymentProcessor ──Debit──> ledger actor
//!                            │ publish PaymentResult (or park it in the retry inbox)
//!                            ▼
//!   payment_results ──> OrderResultConsumer ──ApplyResult──> order actor (PAID | FAILED)
//! ```
//!
//! ## 🏗️ Design
//!
//! ### One owner per store
//! The ledger and the order table are each a [`ResourceActor`](actor_framework::ResourceActor)
//! from the `actor-framework` crate. The actor's mailbox is the store's only exclusion point:
//! a debit's lookup, sufficiency check and subtraction run as one request, so concurrent debits
//! can never overdraw an account.
//!
//! ### Typed errors end to end
//! Each actor has its own `thiserror` enum ([`LedgerError`](ledger_actor::LedgerError),
//! [`OrderError`](order_actor::OrderError)). Clients recover it from the framework error by
//! downcasting, and the service facades map it to an HTTP status with `status_code()`.
//!
//! ### Delivery
//! The bus is fire-and-forget with live subscriptions. A payment result that fails to publish
//! is parked in an [`Inbox`](inbox::Inbox) and re-sent by an
//! [`InboxRetryLoop`](inbox::InboxRetryLoop). Nothing reconciles an order whose task or result
//! was lost; it stays `NEW`.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: accounts, orders and the two bus messages.
//! - [`ledger_actor`], [`order_actor`]: the store entities and their actions.
//! - [`clients`]: typed wrappers over the generic client.
//! - [`bus`]: the [`MessageBus`](bus::MessageBus) trait and the in-memory transport.
//! - [`inbox`]: the retry queue.
//! - [`payment_service`], [`order_service`]: facades and consumer loops.
//! - [`lifecycle`]: runtimes, configuration and tracing setup.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod bus;
pub mod clients;
pub mod inbox;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod order_service;
pub mod payment_service;
pub mod shutdown;
