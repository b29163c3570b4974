//! # Actor Framework
//!
//! Building blocks for owned, in-memory stores driven by the **Actor Model**: each store lives
//! in exactly one Tokio task, and every caller talks to it through a cloneable, type-safe client.
//!
//! ## Why an actor per store?
//!
//! - **Single exclusion point**: the mailbox serialises every request, so an entity's
//!   check-then-mutate logic (e.g. "debit only if the balance covers it") is atomic without
//!   any lock visible to callers.
//! - **No raw map access**: the store's map never leaves the actor; callers only see
//!   Create/Get/List/Action and snapshots.
//! - **Late binding**: dependencies are injected when the loop starts (`run(context)`), not at
//!   construction.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain state, key strategy and actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and the owned store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//!
//! ## Quick Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Seat { id: String, taken: bool }
//!
//! #[derive(Debug)] struct SeatCreate { code: String }
//! #[derive(Debug)] enum SeatAction { Take }
//! #[derive(Debug, thiserror::Error)] #[error("seat already taken")] struct SeatTaken;
//!
//! #[async_trait]
//! impl ActorEntity for Seat {
//!     type Id = String;
//!     type Create = SeatCreate;
//!     type Action = SeatAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = SeatTaken;
//!
//!     // Natural key: the seat code, not the sequence.
//!     fn assign_id(_seq: u64, params: &SeatCreate) -> String { params.code.clone() }
//!
//!     fn from_create_params(id: String, _: SeatCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, taken: false })
//!     }
//!
//!     async fn handle_action(&mut self, _: SeatAction, _: &()) -> Result<(), Self::Error> {
//!         if self.taken { return Err(SeatTaken); }
//!         self.taken = true;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Seat>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.create(SeatCreate { code: "12A".into() }).await.unwrap();
//!     let dup = client.create(SeatCreate { code: "12A".into() }).await;
//!     assert!(matches!(dup, Err(FrameworkError::AlreadyExists(_))));
//!
//!     client.perform_action("12A".into(), SeatAction::Take).await.unwrap();
//!     let again = client.perform_action("12A".into(), SeatAction::Take).await;
//!     assert!(again.unwrap_err().downcast_entity::<SeatTaken>().is_ok());
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from scripted expectations, so code
//! that consumes a client can be tested without the store behind it.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
