//! # ActorClient Trait
//!
//! Provides a common interface for store-specific clients, adding default `find` and `list`
//! methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit the read-only projections.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u64 }
/// #[derive(Debug)] struct NoteCreate;
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct NoteError(String);
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u64; type Create = NoteCreate; type Action = NoteAction;
///     type ActionResult = (); type Context = (); type Error = NoteError;
///     fn assign_id(seq: u64, _: &NoteCreate) -> u64 { seq }
///     fn from_create_params(id: u64, _: NoteCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// struct NoteClient { inner: ResourceClient<Note> }
///
/// #[async_trait]
/// impl ActorClient<Note> for NoteClient {
///     type Error = NoteError;
///     fn inner(&self) -> &ResourceClient<Note> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { NoteError(e.to_string()) }
/// }
///
/// async fn usage(client: NoteClient) {
///     // find() and list() are provided automatically
///     let _ = client.find(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The store-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the store-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by key, `None` when absent.
    #[tracing::instrument(skip(self))]
    async fn find(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, in key order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
