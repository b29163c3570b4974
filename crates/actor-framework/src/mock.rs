//! # Mock Framework
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue of
//! expectations instead of a running `ResourceActor`. Use it to test code that *uses* a client
//! (a consumer loop, a service facade) without spinning up the store behind it.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Determinism** | Scripted replies | Real state |
//! | **Error Injection** | Easy (`return_err`) | Needs specific state |
//! | **Use Case** | Logic *around* the client | The actor itself, full flows |
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Wallet { id: u64, cents: i64 }
//! #[derive(Debug)] struct WalletCreate;
//! #[derive(Debug)] enum WalletAction { Spend(i64) }
//! #[derive(Debug, thiserror::Error)] #[error("broke")] struct WalletError;
//!
//! #[async_trait]
//! impl ActorEntity for Wallet {
//!     type Id = u64; type Create = WalletCreate; type Action = WalletAction;
//!     type ActionResult = i64; type Context = (); type Error = WalletError;
//!     fn assign_id(seq: u64, _: &WalletCreate) -> u64 { seq }
//!     fn from_create_params(id: u64, _: WalletCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, cents: 0 })
//!     }
//!     async fn handle_action(&mut self, _: WalletAction, _: &()) -> Result<i64, Self::Error> {
//!         Ok(self.cents)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Wallet>::new();
//!     mock.expect_action(7).return_err(FrameworkError::EntityError(Box::new(WalletError)));
//!
//!     let client = mock.client();
//!     let result = client.perform_action(7, WalletAction::Spend(5)).await;
//!     assert!(result.is_err());
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Represents an expected request to the mock client.
enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in the order they were registered. A request that
/// does not match the next expectation (wrong kind or wrong key) is recorded and its caller sees
/// `FrameworkError::ActorDropped`; [`MockClient::verify`] then fails the test.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: Arc<Mutex<MockState<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut state = task_state.lock().unwrap();
                let expectation = state.expectations.pop_front();

                match (request, expectation) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        // Dropping the responder surfaces as ActorDropped to the caller.
                        state.mismatches.push(describe(&request));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Expects an `action` operation on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Verifies that every expectation was consumed and no unexpected request arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { params, .. } => format!("Create {params:?}"),
        ResourceRequest::Get { id, .. } => format!("Get {id}"),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Action { id, action, .. } => format!("Action {id} {action:?}"),
    }
}

fn push<T: ActorEntity>(state: &Arc<Mutex<MockState<T>>>, expectation: Expectation<T>) {
    state.lock().unwrap().expectations.push_back(expectation);
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    state: Arc<Mutex<MockState<T>>>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    /// Replies with the given created entity.
    pub fn return_ok(self, created: T) {
        push(&self.state, Expectation::Create { response: Ok(created) });
    }

    /// Replies with an error.
    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Create { response: Err(error) });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    state: Arc<Mutex<MockState<T>>>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Replies with the given snapshot.
    pub fn return_ok(self, value: Option<T>) {
        push(&self.state, Expectation::Get { id: self.id, response: Ok(value) });
    }

    /// Replies with an error.
    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Get { id: self.id, response: Err(error) });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    state: Arc<Mutex<MockState<T>>>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    /// Replies with the given snapshots.
    pub fn return_ok(self, values: Vec<T>) {
        push(&self.state, Expectation::List { response: Ok(values) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    state: Arc<Mutex<MockState<T>>>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    /// Replies with the given action result.
    pub fn return_ok(self, result: T::ActionResult) {
        push(&self.state, Expectation::Action { id: self.id, response: Ok(result) });
    }

    /// Replies with an error.
    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Action { id: self.id, response: Err(error) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u64,
        title: String,
    }

    #[derive(Debug)]
    struct TicketCreate {
        title: String,
    }

    #[derive(Debug)]
    enum TicketAction {
        Close,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("ticket error")]
    struct TicketError;

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = u64;
        type Create = TicketCreate;
        type Action = TicketAction;
        type ActionResult = bool;
        type Context = ();
        type Error = TicketError;

        fn assign_id(seq: u64, _params: &TicketCreate) -> u64 {
            seq
        }

        fn from_create_params(id: u64, params: TicketCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                title: params.title,
            })
        }

        async fn handle_action(
            &mut self,
            _action: TicketAction,
            _ctx: &Self::Context,
        ) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Ticket>::new();
        let ticket = Ticket {
            id: 1,
            title: "Printer".to_string(),
        };
        mock.expect_create().return_ok(ticket.clone());
        mock.expect_get(1).return_ok(Some(ticket.clone()));
        mock.expect_list().return_ok(vec![ticket.clone()]);
        mock.expect_action(1).return_ok(true);

        let client = mock.client();
        let created = client
            .create(TicketCreate {
                title: "Printer".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created, ticket);
        assert_eq!(client.get(1).await.unwrap(), Some(ticket.clone()));
        assert_eq!(client.list().await.unwrap(), vec![ticket]);
        assert!(client.perform_action(1, TicketAction::Close).await.unwrap());

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_records_wrong_key() {
        let mut mock = MockClient::<Ticket>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        let verdict = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verdict.is_err());
    }
}
