//! Typed runtime configuration.

use crate::inbox::RetryPolicy;
use std::time::Duration;

/// Settings shared by both service runtimes.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Capacity of each store actor's mailbox. Callers wait when it is full.
    pub mailbox_capacity: usize,
    /// Policy for re-publishing payment results whose first publish failed.
    pub results_retry: RetryPolicy,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            results_retry: RetryPolicy {
                interval: Duration::from_secs(1),
                backoff_factor: 2,
                max_interval: Duration::from_secs(30),
                max_attempts: Some(10),
            },
        }
    }
}
