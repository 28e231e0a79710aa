//! Canonical, unordered pair of distinct tokens.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Address;
use crate::error::DexError;

/// An unordered pair of distinct tokens, stored as `(min, max)`.
///
/// Canonicalisation happens here and only here: both
/// [`Factory::create_pair`](crate::factory::Factory::create_pair) and
/// [`Factory::get_pair`](crate::factory::Factory::get_pair) build a
/// `PairKey` before touching the registry, so `(x, y)` and `(y, x)` always
/// land on the same entry.
///
/// # Examples
///
/// ```
/// use minimal_dex::domain::{Address, PairKey};
///
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
///
/// let key = PairKey::new(y, x).expect("distinct tokens");
/// assert_eq!(key.token0(), x);
/// assert_eq!(key.token1(), y);
/// assert_eq!(key, PairKey::new(x, y).expect("distinct tokens"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    token0: Address,
    token1: Address,
}

impl PairKey {
    /// Creates the canonical key for `token_a` and `token_b`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::IdenticalTokenAddresses`] if both tokens are the
    /// same.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self, DexError> {
        match token_a.cmp(&token_b) {
            core::cmp::Ordering::Less => Ok(Self {
                token0: token_a,
                token1: token_b,
            }),
            core::cmp::Ordering::Greater => Ok(Self {
                token0: token_b,
                token1: token_a,
            }),
            core::cmp::Ordering::Equal => Err(DexError::IdenticalTokenAddresses),
        }
    }

    /// Returns the lower token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Returns the higher token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if `token` is one of the two.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0, self.token1)
    }
}
