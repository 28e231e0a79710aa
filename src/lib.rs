//! # Minimal DEX
//!
//! A minimal constant-product automated market maker: a [`Factory`] that
//! deploys one liquidity [`Pair`] per unordered token pair, and the pair
//! logic itself (reserves, liquidity shares, fee-charging swaps).
//!
//! Tokens are external.  Pairs move funds through a [`TokenLedger`]
//! collaborator and report every committed change to an [`EventSink`].
//! [`InMemoryLedger`] and [`EventLog`] are ready-made in-memory
//! implementations.
//!
//! ## Create a pair, deposit and swap
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use minimal_dex::prelude::*;
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! let log = Arc::new(EventLog::new());
//! let owner = Address::from_bytes([0xee; 32]);
//! let factory = Factory::new(owner, ledger.clone(), log.clone());
//!
//! // 1. Two tokens and a pair for them
//! let usd = Address::from_bytes([1u8; 32]);
//! let eth = Address::from_bytes([2u8; 32]);
//! let pair = factory.create_pair(eth, usd).expect("new pair");
//!
//! // 2. A liquidity provider funds the pool
//! let lp = Address::from_bytes([0xa1; 32]);
//! for (token, amount) in [(usd, 500_000), (eth, 1_000)] {
//!     ledger.mint(&token, &lp, Amount::new(amount)).expect("mint");
//!     ledger.approve(&token, &lp, &pair.address(), Amount::new(amount)).expect("approve");
//! }
//! let shares = pair
//!     .add_liquidity(&lp, Amount::new(500_000), Amount::new(1_000))
//!     .expect("deposit");
//! assert_eq!(shares.get(), 22_360); // ⌊√(500 000 × 1 000)⌋
//!
//! // 3. A trader sells 10 eth (token1) for usd (token0)
//! let trader = Address::from_bytes([0xb0; 32]);
//! ledger.mint(&eth, &trader, Amount::new(10)).expect("mint");
//! ledger.approve(&eth, &trader, &pair.address(), Amount::new(10)).expect("approve");
//! let result = pair.swap(&trader, Amount::ZERO, Amount::new(10)).expect("swap");
//!
//! assert_eq!(result.amount_out(), ledger.balance_of(&usd, &trader));
//! assert_eq!(log.len(), 3);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller    │  create_pair / get_pair
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │   Factory   │  canonical PairKey → PairHandle registry
//! └──────┬──────┘
//!        │ PairHandle (Arc<Mutex<Pair>>)
//!        ▼
//! ┌─────────────┐
//! │    Pair     │  reserves, shares, x · y = k pricing
//! └──────┬──────┘
//!        │ Settlement (all-or-nothing)      DexEvent
//!        ▼                                     ▼
//! ┌─────────────┐                       ┌─────────────┐
//! │ TokenLedger │                       │  EventSink  │
//! └─────────────┘                       └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`PairKey`](domain::PairKey), … |
//! | [`config`] | [`FactoryConfig`](config::FactoryConfig) and [`PairConfig`](config::PairConfig) |
//! | [`factory`] | [`Factory`](factory::Factory): pair creation and lookup |
//! | [`pair`] | [`Pair`](pair::Pair) pool logic and the shared [`PairHandle`](pair::PairHandle) |
//! | [`token`] | [`TokenLedger`](token::TokenLedger) collaborator and [`InMemoryLedger`](token::InMemoryLedger) |
//! | [`events`] | [`DexEvent`](events::DexEvent) notifications and sinks |
//! | [`math`] | Checked and 256-bit arithmetic |
//! | [`error`] | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! [`Factory`]: factory::Factory
//! [`Pair`]: pair::Pair
//! [`TokenLedger`]: token::TokenLedger
//! [`InMemoryLedger`]: token::InMemoryLedger
//! [`EventSink`]: events::EventSink
//! [`EventLog`]: events::EventLog

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod factory;
pub mod math;
pub mod pair;
pub mod prelude;
pub mod token;
