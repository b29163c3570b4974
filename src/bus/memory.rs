//! In-process [`MessageBus`] built on unbounded Tokio channels.

use super::{BusError, MessageBus, Subscription, Topic};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Fan-out bus: every open subscription on a topic gets its own copy of each message.
#[derive(Debug, Default)]
pub struct InMemoryBus {
    state: Mutex<BusState>,
}

#[derive(Debug, Default)]
struct BusState {
    closed: bool,
    subscribers: HashMap<Topic, Vec<mpsc::UnboundedSender<Vec<u8>>>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open subscriptions on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        let mut state = self.state.lock();
        let senders = state.subscribers.entry(topic).or_default();
        senders.retain(|tx| !tx.is_closed());
        senders.len()
    }
}

#[async_trait]
impl MessageBus for InMemoryBus {
    async fn publish(&self, topic: Topic, payload: Vec<u8>) -> Result<(), BusError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BusError::Closed);
        }
        let senders = state.subscribers.entry(topic).or_default();
        // Closed subscriptions are pruned lazily here.
        senders.retain(|tx| tx.send(payload.clone()).is_ok());
        debug!(%topic, receivers = senders.len(), bytes = payload.len(), "Published");
        Ok(())
    }

    async fn subscribe(&self, topic: Topic) -> Result<Subscription, BusError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BusError::Closed);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        state.subscribers.entry(topic).or_default().push(tx);
        info!(%topic, "Subscribed");
        Ok(Subscription::new(topic, rx))
    }

    async fn ping(&self) -> Result<(), BusError> {
        if self.state.lock().closed {
            return Err(BusError::Closed);
        }
        Ok(())
    }

    async fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        // Dropping the senders ends every subscription after its buffer drains.
        state.subscribers.clear();
        info!("Bus closed");
    }
}
