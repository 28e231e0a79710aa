//! The fungible-token collaborator a pair moves funds through.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Address, Amount};

/// Why a token collaborator refused a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TokenError {
    /// The sender does not hold enough of the token.
    #[error("insufficient balance")]
    InsufficientBalance,
    /// The spender was not authorised for enough of the owner's tokens.
    #[error("insufficient allowance")]
    InsufficientAllowance,
    /// A balance or supply would exceed `u128`.
    #[error("balance overflow")]
    Overflow,
}

/// One movement of tokens inside a [`Settlement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLeg {
    /// Token being moved.
    pub token: Address,
    /// Account debited.
    pub from: Address,
    /// Account credited.
    pub to: Address,
    /// Quantity moved.
    pub amount: Amount,
    /// When set, the leg consumes `from`'s allowance granted to this
    /// spender (a `transfer_from`); when `None` it is a plain transfer
    /// authorised by `from` itself.
    pub spender: Option<Address>,
}

/// An ordered batch of transfer legs applied all-or-nothing.
///
/// A pair builds one settlement per operation: pulls from the caller
/// (allowance-checked, the pair being the spender) and pushes to the
/// caller (plain transfers out of the pair's own balance).
///
/// # Examples
///
/// ```
/// use minimal_dex::domain::{Address, Amount};
/// use minimal_dex::token::Settlement;
///
/// let token = Address::from_bytes([1u8; 32]);
/// let user = Address::from_bytes([2u8; 32]);
/// let pair = Address::from_bytes([3u8; 32]);
///
/// let batch = Settlement::new().pull(token, pair, user, Amount::new(10));
/// assert_eq!(batch.legs().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    legs: Vec<TransferLeg>,
}

impl Settlement {
    /// Creates an empty settlement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `transfer_from(from → spender)` leg: `spender` pulls
    /// `amount` of `token` from `from` into itself.
    #[must_use]
    pub fn pull(mut self, token: Address, spender: Address, from: Address, amount: Amount) -> Self {
        self.legs.push(TransferLeg {
            token,
            from,
            to: spender,
            amount,
            spender: Some(spender),
        });
        self
    }

    /// Adds a plain `transfer(from → to)` leg.
    #[must_use]
    pub fn push(mut self, token: Address, from: Address, to: Address, amount: Amount) -> Self {
        self.legs.push(TransferLeg {
            token,
            from,
            to,
            amount,
            spender: None,
        });
        self
    }

    /// Returns the legs in execution order.
    #[must_use]
    pub fn legs(&self) -> &[TransferLeg] {
        &self.legs
    }
}

/// Capability interface of the external fungible tokens.
///
/// The DEX never implements token semantics itself; a pair only asks the
/// ledger to move funds.  Implementations must be thread-safe because
/// several pairs settle concurrently, and must not call back into the pair
/// that is settling.
pub trait TokenLedger: Send + Sync {
    /// Returns `owner`'s balance of `token`.
    fn balance_of(&self, token: &Address, owner: &Address) -> Amount;

    /// Returns how much of `owner`'s `token` the `spender` may move.
    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount;

    /// Sets `spender`'s allowance over `owner`'s `token` to `amount`.
    ///
    /// # Errors
    ///
    /// Implementations may refuse the approval.
    fn approve(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Moves `amount` of `token` from `from` to `to`, authorised by `from`.
    ///
    /// # Errors
    ///
    /// [`TokenError::InsufficientBalance`] if `from` holds too little.
    fn transfer(
        &self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.settle(&Settlement::new().push(*token, *from, *to, amount))
    }

    /// Moves `amount` of `token` from `from` to `to` on behalf of
    /// `spender`, consuming allowance.
    ///
    /// # Errors
    ///
    /// [`TokenError::InsufficientAllowance`] or
    /// [`TokenError::InsufficientBalance`].
    fn transfer_from(
        &self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let leg = TransferLeg {
            token: *token,
            from: *from,
            to: *to,
            amount,
            spender: Some(*spender),
        };
        self.settle(&Settlement { legs: vec![leg] })
    }

    /// Applies every leg of `settlement` in order, or none of them.
    ///
    /// # Errors
    ///
    /// The first leg that cannot be applied determines the error; no
    /// balance or allowance changes in that case.
    fn settle(&self, settlement: &Settlement) -> Result<(), TokenError>;
}
