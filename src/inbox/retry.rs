use super::queue::{Inbox, InboxEntry};
use crate::shutdown::ShutdownSignal;
use async_trait::async_trait;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// How often to retry and when to give up.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Sleep between pops while nothing is failing.
    pub interval: Duration,
    /// Multiplier applied to the sleep after each consecutive failure. `1` keeps it fixed.
    pub backoff_factor: u32,
    /// Ceiling for the grown sleep.
    pub max_interval: Duration,
    /// Failed attempts after which an entry is dead-lettered. `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    /// One second, fixed, unbounded.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            backoff_factor: 1,
            max_interval: Duration::from_secs(1),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Sleep before the next pop after `consecutive_failures` failures in a row.
    pub fn delay(&self, consecutive_failures: u32) -> Duration {
        let factor = self
            .backoff_factor
            .max(1)
            .saturating_pow(consecutive_failures);
        self.interval
            .saturating_mul(factor)
            .min(self.max_interval.max(self.interval))
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

/// Processes one inbox item. An `Err` sends the item back for another attempt.
#[async_trait]
pub trait InboxHandler<T>: Send + Sync {
    type Error: Display + Send;

    async fn handle(&self, item: &T) -> Result<(), Self::Error>;
}

/// Pops one entry per tick and hands it to the handler until shutdown.
pub struct InboxRetryLoop<T, H> {
    inbox: Inbox<T>,
    dead_letters: Inbox<T>,
    handler: H,
    policy: RetryPolicy,
}

impl<T, H> InboxRetryLoop<T, H>
where
    T: Send + Sync + 'static,
    H: InboxHandler<T>,
{
    pub fn new(inbox: Inbox<T>, dead_letters: Inbox<T>, handler: H, policy: RetryPolicy) -> Self {
        Self {
            inbox,
            dead_letters,
            handler,
            policy,
        }
    }

    /// Runs until `shutdown` fires. Entries still queued at that point stay in the inbox.
    pub async fn run(self, mut shutdown: ShutdownSignal) {
        let inbox = self.inbox.name();
        info!(inbox, policy = ?self.policy, "Retry loop started");
        let mut consecutive_failures = 0;

        loop {
            let delay = self.policy.delay(consecutive_failures);
            tokio::select! {
                biased;
                _ = shutdown.triggered() => break,
                _ = tokio::time::sleep(delay) => {}
            }

            let Some(entry) = self.inbox.pop() else {
                consecutive_failures = 0;
                continue;
            };
            if self.process(entry).await {
                consecutive_failures = 0;
            } else {
                consecutive_failures = consecutive_failures.saturating_add(1);
            }
        }

        info!(inbox, remaining = self.inbox.len(), "Retry loop stopped");
    }

    /// Returns whether the handler succeeded.
    async fn process(&self, mut entry: InboxEntry<T>) -> bool {
        let inbox = self.inbox.name();
        match self.handler.handle(&entry.item).await {
            Ok(()) => {
                debug!(inbox, attempts = entry.attempts, "Inbox item processed");
                true
            }
            Err(e) => {
                entry.attempts += 1;
                if self.policy.exhausted(entry.attempts) {
                    error!(inbox, attempts = entry.attempts, error = %e, "Giving up, dead-lettered");
                    self.dead_letters.push_entry(entry);
                } else {
                    warn!(inbox, attempts = entry.attempts, error = %e, "Inbox item failed, requeued");
                    self.inbox.requeue(entry);
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_fixed_and_unbounded() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(50), Duration::from_secs(1));
        assert!(!policy.exhausted(u32::MAX));
    }

    #[test]
    fn backoff_grows_to_the_ceiling() {
        let policy = RetryPolicy {
            interval: Duration::from_millis(100),
            backoff_factor: 2,
            max_interval: Duration::from_millis(500),
            max_attempts: Some(3),
        };
        let delays: Vec<_> = (0..5).map(|n| policy.delay(n).as_millis()).collect();
        assert_eq!(delays, [100, 200, 400, 500, 500]);
        assert!(!policy.exhausted(2));
        assert!(policy.exhausted(3));
    }
}
