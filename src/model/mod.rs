//! Pure data structures shared by the stores and the wire.
//!
//! [`account`] and [`order`] are owned by the Payment and Order services respectively;
//! [`messages`] is the only schema both services agree on.

pub mod account;
pub mod messages;
pub mod order;

pub use account::*;
pub use messages::*;
pub use order::*;
