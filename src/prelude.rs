//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use minimal_dex::prelude::*;
//! ```

pub use crate::config::{FactoryConfig, PairConfig};
pub use crate::domain::{
    Address, Amount, BasisPoints, FeeTier, PairKey, Rounding, Shares, SwapDirection, SwapResult,
};
pub use crate::error::{DexError, Result};
pub use crate::events::{DexEvent, EventLog, EventSink};
pub use crate::factory::Factory;
pub use crate::math::CheckedArithmetic;
pub use crate::pair::{Pair, PairHandle};
pub use crate::token::{InMemoryLedger, TokenError, TokenLedger};
