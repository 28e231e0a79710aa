//! Liquidity-share bookkeeping of a single pair.

use std::collections::HashMap;

use crate::domain::{Address, Shares};
use crate::error::DexError;
use crate::math::CheckedArithmetic;

/// Share balances, allowances and the outstanding total.
///
/// Keeps `total == Σ balances` after every method, successful or not:
/// each method validates before it writes.  Holders whose balance drops
/// to zero are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShareLedger {
    total: Shares,
    balances: HashMap<Address, Shares>,
    allowances: HashMap<(Address, Address), Shares>,
}

impl ShareLedger {
    pub(crate) const fn total(&self) -> Shares {
        self.total
    }

    pub(crate) fn balance_of(&self, holder: &Address) -> Shares {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    pub(crate) fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Iterates over holders with a non-zero balance.
    #[cfg(test)]
    pub(crate) fn holders(&self) -> impl Iterator<Item = (&Address, &Shares)> {
        self.balances.iter()
    }

    pub(crate) fn mint(&mut self, to: &Address, shares: Shares) -> Result<(), DexError> {
        let total = self.total.safe_add(&shares)?;
        let balance = self.balance_of(to).safe_add(&shares)?;
        self.total = total;
        self.set_balance(to, balance);
        Ok(())
    }

    /// # Errors
    ///
    /// [`DexError::InsufficientLiquidity`] if `from` holds fewer than
    /// `shares`.
    pub(crate) fn burn(&mut self, from: &Address, shares: Shares) -> Result<(), DexError> {
        let balance = self
            .balance_of(from)
            .checked_sub(&shares)
            .ok_or(DexError::InsufficientLiquidity)?;
        let total = self.total.safe_sub(&shares)?;
        self.total = total;
        self.set_balance(from, balance);
        Ok(())
    }

    /// # Errors
    ///
    /// [`DexError::InsufficientLiquidity`] if `from` holds fewer than
    /// `shares`.
    pub(crate) fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        shares: Shares,
    ) -> Result<(), DexError> {
        let debited = self
            .balance_of(from)
            .checked_sub(&shares)
            .ok_or(DexError::InsufficientLiquidity)?;
        if from == to {
            return Ok(());
        }
        // Cannot overflow: the recipient and sender together hold at most `total`.
        let credited = self.balance_of(to).safe_add(&shares)?;
        self.set_balance(from, debited);
        self.set_balance(to, credited);
        Ok(())
    }

    pub(crate) fn approve(&mut self, owner: &Address, spender: &Address, shares: Shares) {
        if shares.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), shares);
        }
    }

    /// Moves `shares` from `owner` to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// [`DexError::InsufficientAllowance`] before any balance check, then
    /// [`DexError::InsufficientLiquidity`].
    pub(crate) fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        shares: Shares,
    ) -> Result<(), DexError> {
        let remaining = self
            .allowance(owner, spender)
            .checked_sub(&shares)
            .ok_or(DexError::InsufficientAllowance)?;
        self.transfer(owner, to, shares)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    /// Puts back `holder`'s balance and the total captured before a mint or
    /// burn for that holder.
    pub(crate) fn restore(&mut self, holder: &Address, balance: Shares, total: Shares) {
        self.total = total;
        self.set_balance(holder, balance);
    }

    fn set_balance(&mut self, holder: &Address, shares: Shares) {
        if shares.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, shares);
        }
    }
}
