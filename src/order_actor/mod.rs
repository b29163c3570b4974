//! Order store: creation with a store-owned sequence and the single `NEW → terminal` transition.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, OrderClient::new(generic_client))
}
