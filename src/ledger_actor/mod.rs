//! Ledger: per-user balances with a sufficiency invariant on every debit.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::LedgerClient;
use crate::model::Account;
use actor_framework::ResourceActor;

/// Creates a new Ledger actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Account>, LedgerClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, LedgerClient::new(generic_client))
}
