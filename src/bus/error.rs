use super::Topic;
use thiserror::Error;

/// Errors surfaced by a [`MessageBus`](super::MessageBus) or a subscription.
#[derive(Debug, Error)]
pub enum BusError {
    /// The bus has been closed; nothing can be published or subscribed any more.
    #[error("Message bus closed")]
    Closed,

    /// The transport refused the message.
    #[error("Publish to {topic} failed: {reason}")]
    Publish { topic: Topic, reason: String },

    /// A payload could not be encoded or decoded as JSON.
    #[error("Malformed payload: {0}")]
    Serialization(#[from] serde_json::Error),
}
