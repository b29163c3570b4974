//! # Message Bus
//!
//! Publish/subscribe between the two services. The bus is the only thing the Order and Payment
//! services share; everything they exchange goes through one of the [`Topic`]s as JSON.
//!
//! Delivery semantics:
//! - a subscription is live: it sees messages published after it was opened, never earlier ones;
//! - messages on one topic arrive in publish order;
//! - there is no acknowledgement and no redelivery. A message published while nobody listens is
//!   gone.
//!
//! [`InMemoryBus`] is the in-process transport. Consumers only see the [`MessageBus`] trait and
//! [`Subscription`], so a networked transport can replace it without touching them.

pub mod error;
pub mod memory;

pub use error::BusError;
pub use memory::InMemoryBus;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use tokio::sync::mpsc;

/// The two named channels of the settlement protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Order service → Payment service.
    PaymentTasks,
    /// Payment service → Order service.
    PaymentResults,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::PaymentTasks => "payment_tasks",
            Topic::PaymentResults => "payment_results",
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A publish/subscribe transport.
#[async_trait]
pub trait MessageBus: Send + Sync + 'static {
    /// Hands `payload` to the topic's current subscribers. Fire-and-forget: success means the
    /// transport accepted it, not that anyone received it.
    async fn publish(&self, topic: Topic, payload: Vec<u8>) -> Result<(), BusError>;

    /// Opens a live subscription on `topic`.
    async fn subscribe(&self, topic: Topic) -> Result<Subscription, BusError>;

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), BusError>;

    /// Closes the bus. Open subscriptions end once they have drained what was already
    /// delivered to them; later publishes and subscribes fail with [`BusError::Closed`].
    async fn close(&self);
}

impl dyn MessageBus {
    /// Encodes `message` as JSON and publishes it.
    pub async fn publish_json<M>(&self, topic: Topic, message: &M) -> Result<(), BusError>
    where
        M: Serialize + Sync + ?Sized,
    {
        let payload = serde_json::to_vec(message)?;
        self.publish(topic, payload).await
    }
}

/// The receiving end of a subscription. Messages are buffered without bound until read.
#[derive(Debug)]
pub struct Subscription {
    topic: Topic,
    receiver: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl Subscription {
    pub fn new(topic: Topic, receiver: mpsc::UnboundedReceiver<Vec<u8>>) -> Self {
        Self { topic, receiver }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Waits for the next raw payload. `None` once the subscription or the bus is closed and
    /// the buffer is empty.
    pub async fn next(&mut self) -> Option<Vec<u8>> {
        self.receiver.recv().await
    }

    /// Like [`next`](Self::next), decoding the payload as JSON.
    ///
    /// A payload that does not decode yields `Some(Err(BusError::Serialization))`; the
    /// subscription stays usable.
    pub async fn next_json<T: DeserializeOwned>(&mut self) -> Option<Result<T, BusError>> {
        let payload = self.next().await?;
        Some(serde_json::from_slice(&payload).map_err(BusError::from))
    }

    /// Stops accepting new messages. Messages already delivered can still be read.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
