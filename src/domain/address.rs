//! Opaque 32-byte identity for tokens, accounts and pairs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque identifier: a token contract, an account, or a pair.
///
/// The DEX never dereferences an address; it only compares, hashes and
/// hands it to the [`TokenLedger`](crate::token::TokenLedger).  The derived
/// ordering is lexicographic over the bytes and is the total order used to
/// canonicalise token pairs.
///
/// # Examples
///
/// ```
/// use minimal_dex::domain::Address;
///
/// let a = Address::from_bytes([1u8; 32]);
/// let b = Address::from_bytes([2u8; 32]);
/// assert!(a < b);
/// assert_eq!(a.as_bytes(), [1u8; 32]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero address. Never assigned to a pair.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Derives the address of the factory owned by `owner`.
    #[must_use]
    pub fn derive_factory(owner: &Self) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"minimal-dex/factory");
        hasher.update(&owner.0);
        Self(*hasher.finalize().as_bytes())
    }

    /// Derives the address of the pair deployed by `factory` for the
    /// canonical `(token0, token1)`.
    ///
    /// `blake3(factory ‖ token0 ‖ token1)`: deterministic per factory and
    /// key, independent of creation order.
    #[must_use]
    pub fn derive_pair(factory: &Self, token0: &Self, token1: &Self) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"minimal-dex/pair");
        hasher.update(&factory.0);
        hasher.update(&token0.0);
        hasher.update(&token1.0);
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First four bytes are enough to tell addresses apart in logs.
        write!(f, "Address(0x{}…)", hex::encode(&self.0[..4]))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}
