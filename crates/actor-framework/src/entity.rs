//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract every owned store entry (an account, an order, …)
//! implements to be managed by the generic `ResourceActor`. It specifies associated types for keys,
//! creation DTOs, actions, context, and errors, and provides the lifecycle hooks (`on_create`,
//! `handle_action`). Implementing it gives the entity a uniform Create/Get/List/Action API.
//!
//! # Keys
//! Entities decide their own key strategy through [`ActorEntity::assign_id`]. The actor passes a
//! monotonic sequence number it owns, so an entity that keys on that number gets ids that cannot
//! collide. An entity that keys on a natural key (a user id, say) ignores the sequence and the
//! actor rejects a second create for the same key with `FrameworkError::AlreadyExists`.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] defaults to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any store entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may await other actors. The `Context` type is injected
/// into every hook, which allows "late binding" of dependencies (passing clients to `run()`
/// instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique key for this entity. `Ord` keeps `List` results in key order.
    type Id: Ord + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Entity-specific mutations (e.g., `Debit`). Each action runs atomically inside the actor.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per action; clients recover it by downcasting
    /// `FrameworkError::EntityError`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Derive the key for a new entity.
    ///
    /// `seq` is the actor's next sequence number, strictly increasing for the actor's lifetime.
    fn assign_id(seq: u64, params: &Self::Create) -> Self::Id;

    /// Construct the full entity from its key and the creation payload.
    /// Called synchronously before `on_create`; returning an error rejects the create.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle an entity-specific action.
    ///
    /// The actor holds exclusive access to the entity for the whole call, so any
    /// check-then-mutate sequence inside it is atomic with respect to every other request.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
