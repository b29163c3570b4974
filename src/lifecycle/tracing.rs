//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber once per process.
//!
//! ## Configuration
//!
//! Levels come from `RUST_LOG` through `EnvFilter`. The output is compact and hides module
//! paths (`with_target(false)`); actor events carry an `entity_type` field instead, and
//! consumer events run inside a `payment_task` span carrying `order_id` and `user_id`.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle, settlements, declines
//! RUST_LOG=debug cargo run    # plus every actor request and bus publish
//! ```
//!
//! ## Settlement Trace Example
//!
//! **With `RUST_LOG=info`**, the alice scenario of the demo reads:
//!
//! ```text
//! INFO scenario_alice: Created entity_type="Account" id=alice size=1
//! INFO scenario_alice:create_order: Order created order_id=ord_1
//! INFO payment_task: Payment captured order_id=ord_1 user_id=alice amount=40 balance=60
//! INFO Order settled order_id=ord_1 status=PAID reason=None
//! ```
//!
//! Declines are logged at `info` with the reason; malformed messages, duplicate results and
//! failed publishes at `warn`; a ledger that cannot be reached at `error`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and spans identify the source
        .compact()
        .init();
}
