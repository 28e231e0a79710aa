//! Token collaborator interface and an in-memory implementation.
//!
//! Pairs never hold token logic of their own.  They describe each
//! operation's fund movements as a [`Settlement`] and hand it to a
//! [`TokenLedger`], which applies every leg or none.

mod ledger;
mod memory;

pub use ledger::{Settlement, TokenError, TokenLedger, TransferLeg};
pub use memory::InMemoryLedger;
