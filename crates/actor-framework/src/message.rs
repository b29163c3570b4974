//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants cover the whole surface an owned store exposes:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize and store a new entity.
/// - **Get**: Fetches a snapshot of one entity by key.
/// - **List**: Fetches snapshots of every entity, in key order.
/// - **Action**: Executes an [`ActorEntity::Action`] against one entity.
///
/// There is no raw access to the underlying map; every mutation goes through `Create` or
/// `Action`, and both run to completion before the actor takes the next message.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
