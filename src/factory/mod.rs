//! Pair deployment and lookup.
//!
//! The [`Factory`] is the single entry point for creating pairs.  It
//! canonicalises every token pair into a [`PairKey`](crate::domain::PairKey)
//! so `(a, b)` and `(b, a)` always resolve to the same pair, and refuses to
//! create a second one.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use minimal_dex::domain::Address;
//! use minimal_dex::events::{DexEvent, EventLog};
//! use minimal_dex::factory::Factory;
//! use minimal_dex::token::InMemoryLedger;
//!
//! let log = Arc::new(EventLog::new());
//! let factory = Factory::new(Address::from_bytes([9u8; 32]), Arc::new(InMemoryLedger::new()), log.clone());
//!
//! let pair = factory
//!     .create_pair(Address::from_bytes([1u8; 32]), Address::from_bytes([2u8; 32]))
//!     .expect("new pair");
//! assert_eq!(factory.pair_count(), 1);
//! assert!(matches!(log.last(), Some(DexEvent::PairCreated { pair_count: 1, .. })));
//! assert!(pair.is_empty());
//! ```

mod pair_factory;
mod registry;

pub use pair_factory::Factory;
