//! Constant-product pair (Uniswap V2 style).
//!
//! The swap invariant is `reserve0 × reserve1 = k`.  The fee is taken out
//! of the input **before** pricing and stays in the pool, so `k` grows with
//! every charged swap.
//!
//! # Swap pricing (token0 → token1)
//!
//! 1. `in_with_fee = amount_in × (10 000 − fee_bps)`
//! 2. `amount_out = ⌊reserve1 × in_with_fee / (reserve0 × 10 000 + in_with_fee)⌋`
//! 3. `reserve0 += amount_in` (fee included)
//! 4. `reserve1 -= amount_out`
//!
//! # Liquidity shares
//!
//! - First deposit: `⌊√(amount0 × amount1)⌋`.
//! - Later deposits: `min(amount0 × total / reserve0, amount1 × total / reserve1)`;
//!   the surplus of the over-supplied side is kept by the pool.
//! - Withdrawal: `amount_i = ⌊shares × reserve_i / total⌋`.
//!
//! All rounding is toward the pool.
//!
//! # Atomicity
//!
//! Every mutating operation validates and prices first, then updates the
//! reserves and shares, then asks the [`TokenLedger`] to settle all token
//! movements as one batch.  If settlement fails the reserves and shares are
//! restored from a checkpoint, so a returned error never leaves a trace.

use core::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::share_ledger::ShareLedger;
use crate::config::PairConfig;
use crate::domain::{
    Address, Amount, FeeTier, PairKey, Rounding, Shares, SwapDirection, SwapResult,
};
use crate::error::{DexError, Result};
use crate::events::{DexEvent, EventSink};
use crate::math::{
    constant_product_out, mul_div, product, sqrt_product, CheckedArithmetic, U256,
};
use crate::token::{Settlement, TokenLedger};

/// Pair state captured before a mutation, for rollback.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    reserve0: Amount,
    reserve1: Amount,
    holder: Address,
    holder_shares: Shares,
    total_shares: Shares,
}

/// A liquidity pool for one canonical token pair.
///
/// Created by the [`Factory`](crate::factory::Factory) and shared through a
/// [`PairHandle`](super::PairHandle).  The pair is also the ledger of its
/// own liquidity shares, which holders can transfer and delegate.
///
/// # State
///
/// - `reserve0` / `reserve1`: tokens the pool owns, fees included.
/// - share balances per holder and their total.
///
/// `reserve0 == 0 ⇔ reserve1 == 0 ⇔ total_shares == 0` holds between
/// operations.
pub struct Pair {
    address: Address,
    key: PairKey,
    config: PairConfig,
    reserve0: Amount,
    reserve1: Amount,
    shares: ShareLedger,
    ledger: Arc<dyn TokenLedger>,
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pair")
            .field("address", &self.address)
            .field("key", &self.key)
            .field("fee_tier", &self.config.fee_tier())
            .field("reserve0", &self.reserve0)
            .field("reserve1", &self.reserve1)
            .field("total_shares", &self.shares.total())
            .finish_non_exhaustive()
    }
}

impl Pair {
    pub(crate) fn new(
        address: Address,
        key: PairKey,
        config: PairConfig,
        ledger: Arc<dyn TokenLedger>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            address,
            key,
            config,
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            shares: ShareLedger::default(),
            ledger,
            sink,
        }
    }

    /// Returns the pair's own address (spender and custodian of reserves).
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
    pub const fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }

    /// Returns `(reserve0, reserve1)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve0, self.reserve1)
    }

    /// Returns the outstanding liquidity shares.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.shares.total()
    }

    /// Returns `holder`'s liquidity shares.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> Shares {
        self.shares.balance_of(holder)
    }

    /// Returns how many of `owner`'s shares `spender` may move.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.shares.allowance(owner, spender)
    }

    /// Returns `true` while no liquidity is deposited.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shares.total().is_zero()
    }

    /// `k = reserve0 × reserve1` at full width.
    #[must_use]
    pub fn invariant(&self) -> U256 {
        product(self.reserve0.get(), self.reserve1.get())
    }

    // -- liquidity -------------------------------------------------------------

    /// Deposits both tokens from `caller` and mints liquidity shares to them.
    ///
    /// The pair pulls the tokens with the caller's allowance, so the caller
    /// must have approved the pair's [`address`](Self::address) on both
    /// tokens beforehand.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientInputAmount`] if either amount is zero or
    ///   the deposit is too small to mint a single share.
    /// - [`DexError::Token`] if the tokens cannot be pulled.
    /// - [`DexError::Overflow`] if a reserve or the share supply overflows.
    pub fn add_liquidity(
        &mut self,
        caller: &Address,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Shares> {
        let minted = self.quote_add_liquidity(amount0, amount1)?;
        let reserve0 = self.reserve0.safe_add(&amount0)?;
        let reserve1 = self.reserve1.safe_add(&amount1)?;

        let checkpoint = self.checkpoint(caller);
        self.shares.mint(caller, minted)?;
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;

        let settlement = Settlement::new()
            .pull(self.token0(), self.address, *caller, amount0)
            .pull(self.token1(), self.address, *caller, amount1);
        self.settle(&settlement, checkpoint, "add_liquidity")?;

        info!(
            pair = %self.address,
            provider = %caller,
            %amount0,
            %amount1,
            shares = %minted,
            "liquidity added"
        );
        self.sink.emit(DexEvent::Mint {
            pair: self.address,
            provider: *caller,
            amount0,
            amount1,
            shares: minted,
        });
        Ok(minted)
    }

    /// Burns `shares` of `caller` and pays out the proportional reserves.
    ///
    /// Burning every outstanding share empties the pool exactly.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientLiquidity`] if `shares` is zero, exceeds
    ///   the caller's balance, or is worth nothing of either token.
    /// - [`DexError::Token`] if the payout cannot be settled.
    pub fn remove_liquidity(
        &mut self,
        caller: &Address,
        shares: Shares,
    ) -> Result<(Amount, Amount)> {
        let (amount0, amount1) = self.payout(shares, self.shares.balance_of(caller))?;
        let reserve0 = self.reserve0.safe_sub(&amount0)?;
        let reserve1 = self.reserve1.safe_sub(&amount1)?;

        let checkpoint = self.checkpoint(caller);
        self.shares.burn(caller, shares)?;
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;

        let settlement = Settlement::new()
            .push(self.token0(), self.address, *caller, amount0)
            .push(self.token1(), self.address, *caller, amount1);
        self.settle(&settlement, checkpoint, "remove_liquidity")?;

        info!(
            pair = %self.address,
            provider = %caller,
            %amount0,
            %amount1,
            %shares,
            "liquidity removed"
        );
        self.sink.emit(DexEvent::Burn {
            pair: self.address,
            provider: *caller,
            amount0,
            amount1,
            shares,
        });
        Ok((amount0, amount1))
    }

    /// Shares a deposit of `(amount0, amount1)` would mint right now.
    ///
    /// # Errors
    ///
    /// [`DexError::InsufficientInputAmount`] if either amount is zero or
    /// nothing would be minted.
    pub fn quote_add_liquidity(&self, amount0: Amount, amount1: Amount) -> Result<Shares> {
        if amount0.is_zero() || amount1.is_zero() {
            debug!(pair = %self.address, %amount0, %amount1, "deposit needs both tokens");
            return Err(DexError::InsufficientInputAmount);
        }

        let total = self.shares.total();
        let minted = if total.is_zero() {
            sqrt_product(amount0.get(), amount1.get())
        } else {
            let by0 = mul_div(amount0.get(), total.get(), self.reserve0.get(), Rounding::Down)
                .ok_or(DexError::Overflow("share quote for token0"))?;
            let by1 = mul_div(amount1.get(), total.get(), self.reserve1.get(), Rounding::Down)
                .ok_or(DexError::Overflow("share quote for token1"))?;
            by0.min(by1)
        };

        if minted == 0 {
            debug!(pair = %self.address, %amount0, %amount1, "deposit too small to mint shares");
            return Err(DexError::InsufficientInputAmount);
        }
        Ok(Shares::new(minted))
    }

    /// Reserves that burning `shares` would pay out right now.
    ///
    /// # Errors
    ///
    /// [`DexError::InsufficientLiquidity`] if `shares` is zero, exceeds the
    /// outstanding total, or rounds down to nothing on either side.
    pub fn quote_remove_liquidity(&self, shares: Shares) -> Result<(Amount, Amount)> {
        self.payout(shares, self.shares.total())
    }

    /// Prices burning `shares` out of at most `held`.
    fn payout(&self, shares: Shares, held: Shares) -> Result<(Amount, Amount)> {
        if shares.is_zero() || shares > held {
            debug!(pair = %self.address, %shares, %held, "withdrawal exceeds held shares");
            return Err(DexError::InsufficientLiquidity);
        }
        let total = self.shares.total();
        let amount0 = mul_div(shares.get(), self.reserve0.get(), total.get(), Rounding::Down)
            .ok_or(DexError::Overflow("withdrawal of token0"))?;
        let amount1 = mul_div(shares.get(), self.reserve1.get(), total.get(), Rounding::Down)
            .ok_or(DexError::Overflow("withdrawal of token1"))?;
        if amount0 == 0 || amount1 == 0 {
            debug!(pair = %self.address, %shares, "withdrawal rounds to zero");
            return Err(DexError::InsufficientLiquidity);
        }
        Ok((Amount::new(amount0), Amount::new(amount1)))
    }

    // -- swaps -----------------------------------------------------------------

    /// Prices a swap without executing it.
    ///
    /// Exactly one of `amount_in0` / `amount_in1` must be positive; it is
    /// the quantity sold.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientInputAmount`] if both inputs are zero, or
    ///   the output rounds to zero (including any swap on an empty pool).
    /// - [`DexError::InvalidInputAmount`] if both inputs are positive.
    pub fn quote_swap(&self, amount_in0: Amount, amount_in1: Amount) -> Result<SwapResult> {
        let (direction, amount_in) = SwapDirection::from_inputs(amount_in0, amount_in1)?;
        let (reserve_in, reserve_out) = self.oriented(direction);

        let fee_tier = self.config.fee_tier();
        let complement = fee_tier
            .basis_points()
            .complement()
            .filter(|c| *c > 0)
            .ok_or(DexError::InvalidConfiguration(
                "fee must be below 10000 basis points",
            ))?;

        let amount_out = constant_product_out(
            amount_in.get(),
            reserve_in.get(),
            reserve_out.get(),
            complement,
            FeeTier::SCALE,
        )
        .ok_or(DexError::Overflow("swap output"))?;

        if amount_out == 0 {
            debug!(pair = %self.address, %direction, %amount_in, "swap output rounds to zero");
            return Err(DexError::InsufficientInputAmount);
        }

        let fee = fee_tier.fee_on(amount_in)?;
        SwapResult::new(direction, amount_in, Amount::new(amount_out), fee)
    }

    /// Sells one token for the other on behalf of `caller`.
    ///
    /// The input is pulled with the caller's allowance and the output is
    /// sent to the caller in the same settlement.
    ///
    /// # Errors
    ///
    /// - Everything [`quote_swap`](Self::quote_swap) returns.
    /// - [`DexError::InvariantViolation`] if the new reserves would not
    ///   grow `k` (strictly, when a fee is charged).
    /// - [`DexError::Token`] if the input cannot be pulled.
    pub fn swap(
        &mut self,
        caller: &Address,
        amount_in0: Amount,
        amount_in1: Amount,
    ) -> Result<SwapResult> {
        let result = self.quote_swap(amount_in0, amount_in1)?;
        let direction = result.direction();
        let (reserve_in, reserve_out) = self.oriented(direction);

        let new_in = reserve_in.safe_add(&result.amount_in())?;
        let new_out = reserve_out.safe_sub(&result.amount_out())?;
        let (reserve0, reserve1) = if direction.is_zero_for_one() {
            (new_in, new_out)
        } else {
            (new_out, new_in)
        };

        let k_before = self.invariant();
        let k_after = product(reserve0.get(), reserve1.get());
        let preserved = if self.config.fee_tier().is_charged() {
            k_after > k_before
        } else {
            k_after >= k_before
        };
        if !preserved {
            error!(pair = %self.address, %direction, "swap would shrink the constant product");
            return Err(DexError::InvariantViolation);
        }

        let checkpoint = self.checkpoint(caller);
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;

        let (token_in, token_out) = if direction.is_zero_for_one() {
            (self.token0(), self.token1())
        } else {
            (self.token1(), self.token0())
        };
        let settlement = Settlement::new()
            .pull(token_in, self.address, *caller, result.amount_in())
            .push(token_out, self.address, *caller, result.amount_out());
        self.settle(&settlement, checkpoint, "swap")?;

        info!(
            pair = %self.address,
            trader = %caller,
            %direction,
            amount_in = %result.amount_in(),
            amount_out = %result.amount_out(),
            "swap executed"
        );
        self.sink.emit(DexEvent::Swap {
            pair: self.address,
            trader: *caller,
            direction,
            amount_in: result.amount_in(),
            amount_out: result.amount_out(),
        });
        Ok(result)
    }

    // -- share token -----------------------------------------------------------

    /// Lets `spender` move up to `shares` of `owner`'s liquidity shares.
    pub fn approve_shares(&mut self, owner: &Address, spender: &Address, shares: Shares) {
        self.shares.approve(owner, spender, shares);
        self.sink.emit(DexEvent::SharesApproved {
            pair: self.address,
            owner: *owner,
            spender: *spender,
            shares,
        });
    }

    /// Moves liquidity shares between holders.  Reserves are untouched.
    ///
    /// # Errors
    ///
    /// [`DexError::InsufficientLiquidity`] if `from` holds fewer than
    /// `shares`.
    pub fn transfer_shares(&mut self, from: &Address, to: &Address, shares: Shares) -> Result<()> {
        self.shares.transfer(from, to, shares)?;
        self.sink.emit(DexEvent::SharesTransferred {
            pair: self.address,
            from: *from,
            to: *to,
            shares,
        });
        Ok(())
    }

    /// Moves `owner`'s shares to `to` using `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAllowance`] if the allowance is too low.
    /// - [`DexError::InsufficientLiquidity`] if `owner` holds too few shares.
    pub fn transfer_shares_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        shares: Shares,
    ) -> Result<()> {
        self.shares.transfer_from(spender, owner, to, shares)?;
        self.sink.emit(DexEvent::SharesTransferred {
            pair: self.address,
            from: *owner,
            to: *to,
            shares,
        });
        Ok(())
    }

    // -- internals -------------------------------------------------------------

    #[cfg(test)]
    pub(crate) fn share_ledger(&self) -> &ShareLedger {
        &self.shares
    }

    fn oriented(&self, direction: SwapDirection) -> (Amount, Amount) {
        if direction.is_zero_for_one() {
            (self.reserve0, self.reserve1)
        } else {
            (self.reserve1, self.reserve0)
        }
    }

    fn checkpoint(&self, holder: &Address) -> Checkpoint {
        Checkpoint {
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            holder: *holder,
            holder_shares: self.shares.balance_of(holder),
            total_shares: self.shares.total(),
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        self.reserve0 = checkpoint.reserve0;
        self.reserve1 = checkpoint.reserve1;
        self.shares.restore(
            &checkpoint.holder,
            checkpoint.holder_shares,
            checkpoint.total_shares,
        );
    }

    fn settle(
        &mut self,
        settlement: &Settlement,
        checkpoint: Checkpoint,
        operation: &'static str,
    ) -> Result<()> {
        if let Err(err) = self.ledger.settle(settlement) {
            warn!(pair = %self.address, operation, error = %err, "settlement refused, rolling back");
            self.rollback(checkpoint);
            return Err(err.into());
        }
        Ok(())
    }
}
