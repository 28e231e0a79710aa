//! Liquidity pairs and the shared handle the factory hands out.

mod pool;
#[cfg(test)]
mod proptest_properties;
mod share_ledger;

use std::sync::{Arc, Mutex, MutexGuard};

pub use pool::Pair;

use crate::domain::{Address, Amount, FeeTier, PairKey, Shares, SwapResult};
use crate::error::Result;

/// Cheaply clonable, thread-safe reference to one [`Pair`].
///
/// Every call locks the pair for its whole duration, so operations on the
/// same pair are serialised while different pairs proceed in parallel.
/// Handles compare equal when they point at the same pair address.
///
/// The lock is still held while the pair settles with its
/// [`TokenLedger`](crate::token::TokenLedger) and emits to its
/// [`EventSink`](crate::events::EventSink).  Those callbacks may use other
/// pairs but must never call back into the handle that invoked them: the
/// lock is not reentrant and the call would deadlock.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use minimal_dex::domain::{Address, Amount};
/// use minimal_dex::events::EventLog;
/// use minimal_dex::factory::Factory;
/// use minimal_dex::token::{InMemoryLedger, TokenLedger};
///
/// let ledger = Arc::new(InMemoryLedger::new());
/// let factory = Factory::new(Address::from_bytes([9u8; 32]), ledger.clone(), Arc::new(EventLog::new()));
/// let (usd, eth) = (Address::from_bytes([1u8; 32]), Address::from_bytes([2u8; 32]));
/// let pair = factory.create_pair(usd, eth).expect("new pair");
///
/// let lp = Address::from_bytes([7u8; 32]);
/// for token in [usd, eth] {
///     ledger.mint(&token, &lp, Amount::new(10)).expect("mint");
///     ledger.approve(&token, &lp, &pair.address(), Amount::new(10)).expect("approve");
/// }
/// let shares = pair.add_liquidity(&lp, Amount::new(10), Amount::new(10)).expect("deposit");
/// assert_eq!(shares.get(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct PairHandle {
    address: Address,
    key: PairKey,
    inner: Arc<Mutex<Pair>>,
}

impl PairHandle {
    pub(crate) fn new(pair: Pair) -> Self {
        Self {
            address: pair.address(),
            key: pair.key(),
            inner: Arc::new(Mutex::new(pair)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pair> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs `f` with shared access to the pair, for reading several
    /// values under one lock.
    pub fn read<R>(&self, f: impl FnOnce(&Pair) -> R) -> R {
        f(&self.lock())
    }

    /// Returns the pair address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the canonical token pair.
    #[must_use]
    pub const fn key(&self) -> PairKey {
        self.key
    }

    /// Returns the lower-ordered token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.key.token0()
    }

    /// Returns the higher-ordered token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.key.token1()
    }

    /// Returns the swap fee.
    #[must_use]
    pub fn fee_tier(&self) -> FeeTier {
        self.lock().fee_tier()
    }

    /// Returns `(reserve0, reserve1)`.
    #[must_use]
    pub fn reserves(&self) -> (Amount, Amount) {
        self.lock().reserves()
    }

    /// Returns the outstanding liquidity shares.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        self.lock().total_shares()
    }

    /// Returns `holder`'s liquidity shares.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> Shares {
        self.lock().balance_of(holder)
    }

    /// Returns how many of `owner`'s shares `spender` may move.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.lock().allowance(owner, spender)
    }

    /// Returns `true` while no liquidity is deposited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// See [`Pair::add_liquidity`].
    ///
    /// # Errors
    ///
    /// As [`Pair::add_liquidity`].
    pub fn add_liquidity(&self, caller: &Address, amount0: Amount, amount1: Amount) -> Result<Shares> {
        self.lock().add_liquidity(caller, amount0, amount1)
    }

    /// See [`Pair::remove_liquidity`].
    ///
    /// # Errors
    ///
    /// As [`Pair::remove_liquidity`].
    pub fn remove_liquidity(&self, caller: &Address, shares: Shares) -> Result<(Amount, Amount)> {
        self.lock().remove_liquidity(caller, shares)
    }

    /// See [`Pair::quote_add_liquidity`].
    ///
    /// # Errors
    ///
    /// As [`Pair::quote_add_liquidity`].
    pub fn quote_add_liquidity(&self, amount0: Amount, amount1: Amount) -> Result<Shares> {
        self.lock().quote_add_liquidity(amount0, amount1)
    }

    /// See [`Pair::quote_remove_liquidity`].
    ///
    /// # Errors
    ///
    /// As [`Pair::quote_remove_liquidity`].
    pub fn quote_remove_liquidity(&self, shares: Shares) -> Result<(Amount, Amount)> {
        self.lock().quote_remove_liquidity(shares)
    }

    /// See [`Pair::swap`].
    ///
    /// # Errors
    ///
    /// As [`Pair::swap`].
    pub fn swap(&self, caller: &Address, amount_in0: Amount, amount_in1: Amount) -> Result<SwapResult> {
        self.lock().swap(caller, amount_in0, amount_in1)
    }

    /// See [`Pair::quote_swap`].
    ///
    /// # Errors
    ///
    /// As [`Pair::quote_swap`].
    pub fn quote_swap(&self, amount_in0: Amount, amount_in1: Amount) -> Result<SwapResult> {
        self.lock().quote_swap(amount_in0, amount_in1)
    }

    /// See [`Pair::approve_shares`].
    pub fn approve_shares(&self, owner: &Address, spender: &Address, shares: Shares) {
        self.lock().approve_shares(owner, spender, shares);
    }

    /// See [`Pair::transfer_shares`].
    ///
    /// # Errors
    ///
    /// As [`Pair::transfer_shares`].
    pub fn transfer_shares(&self, from: &Address, to: &Address, shares: Shares) -> Result<()> {
        self.lock().transfer_shares(from, to, shares)
    }

    /// See [`Pair::transfer_shares_from`].
    ///
    /// # Errors
    ///
    /// As [`Pair::transfer_shares_from`].
    pub fn transfer_shares_from(
        &self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        shares: Shares,
    ) -> Result<()> {
        self.lock().transfer_shares_from(spender, owner, to, shares)
    }
}

impl PartialEq for PairHandle {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for PairHandle {}
