//! Unified error types for the minimal DEX.
//!
//! Every fallible operation on a [`Factory`](crate::factory::Factory) or a
//! [`Pair`](crate::pair::Pair) returns [`DexError`].  Each precondition
//! failure maps to exactly one variant, so callers can branch on the kind
//! without parsing messages.

use thiserror::Error;

use crate::token::TokenError;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, DexError>;

/// All the ways a factory or pair operation can fail.
///
/// A returned error always means the operation was aborted as a whole:
/// no reserve, share balance, registry entry or token balance changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// `create_pair` was called with the same token twice.
    #[error("identical token addresses")]
    IdenticalTokenAddresses,

    /// A pair for this token combination is already registered.
    #[error("pair already exists")]
    PairAlreadyExists,

    /// A deposit or swap input is zero, or too small to produce any
    /// shares or output.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// A swap supplied input on both sides at once.
    #[error("invalid input amount: exactly one swap side may be positive")]
    InvalidInputAmount,

    /// A withdrawal or share transfer exceeds the caller's share balance,
    /// or asks for zero shares.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A delegated share transfer exceeds the spender's allowance.
    #[error("insufficient share allowance")]
    InsufficientAllowance,

    /// The token collaborator refused to move funds.
    #[error("token transfer failed: {0}")]
    Token(#[from] TokenError),

    /// Checked arithmetic overflowed or underflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// The constant product would have decreased; the swap was rejected.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
