//! # Inbox
//!
//! At-least-once redelivery for work that must survive a transient failure: a queue of
//! [`InboxEntry`]s plus an [`InboxRetryLoop`] that pops one entry at a time, hands it to an
//! [`InboxHandler`], and requeues it when the handler fails.
//!
//! The queue is in memory. A failed entry goes back to the pop end, so it is retried before
//! anything queued after it. With [`RetryPolicy::default`] retries are unbounded at a fixed
//! interval; an entry that can never succeed is retried forever, and a handler that partly
//! succeeds before failing will repeat its side effects.

pub mod queue;
pub mod retry;

pub use queue::{Inbox, InboxEntry};
pub use retry::{InboxHandler, InboxRetryLoop, RetryPolicy};
