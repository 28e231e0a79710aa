//! Swap direction and outcome.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::DexError;

/// Which side of a pair a swap sells into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// token0 in, token1 out.
    ZeroForOne,
    /// token1 in, token0 out.
    OneForZero,
}

impl SwapDirection {
    /// Resolves the direction from the two raw swap inputs.
    ///
    /// Exactly one side must be positive.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientInputAmount`] if both inputs are zero.
    /// - [`DexError::InvalidInputAmount`] if both inputs are positive.
    pub fn from_inputs(amount_in0: Amount, amount_in1: Amount) -> Result<(Self, Amount), DexError> {
        match (amount_in0.is_zero(), amount_in1.is_zero()) {
            (true, true) => Err(DexError::InsufficientInputAmount),
            (false, false) => Err(DexError::InvalidInputAmount),
            (false, true) => Ok((Self::ZeroForOne, amount_in0)),
            (true, false) => Ok((Self::OneForZero, amount_in1)),
        }
    }

    /// Returns `true` for [`ZeroForOne`](Self::ZeroForOne).
    #[must_use]
    pub const fn is_zero_for_one(&self) -> bool {
        matches!(self, Self::ZeroForOne)
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "token0->token1"),
            Self::OneForZero => write!(f, "token1->token0"),
        }
    }
}

/// The priced outcome of a swap, whether quoted or executed.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee <= amount_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapResult {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientInputAmount`] if either amount is
    /// zero or the fee exceeds the input.
    pub fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() || amount_out.is_zero() || fee > amount_in {
            return Err(DexError::InsufficientInputAmount);
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the raw input amount (fee included).
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount paid to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee portion of the input, rounded up.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({}, in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}
