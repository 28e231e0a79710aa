//! Thread-safe in-memory token ledger.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use super::{Settlement, TokenError, TokenLedger};
use crate::domain::{Address, Amount};

#[derive(Debug, Default)]
struct TokenBook {
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl TokenBook {
    fn balance(&self, owner: &Address) -> Amount {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }
}

/// A ledger for any number of mintable tokens, held in memory.
///
/// Tokens come into existence on first mint; an unknown token simply has
/// zero balances everywhere.  Settlements are applied under a single write
/// lock so they are atomic with respect to every other ledger call.
///
/// # Examples
///
/// ```
/// use minimal_dex::domain::{Address, Amount};
/// use minimal_dex::token::{InMemoryLedger, TokenLedger};
///
/// let ledger = InMemoryLedger::new();
/// let token = Address::from_bytes([1u8; 32]);
/// let alice = Address::from_bytes([2u8; 32]);
/// let bob = Address::from_bytes([3u8; 32]);
///
/// ledger.mint(&token, &alice, Amount::new(100)).expect("mint");
/// ledger.transfer(&token, &alice, &bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(&token, &bob), Amount::new(40));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    books: RwLock<HashMap<Address, TokenBook>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` new units of `token` for `to`.
    ///
    /// # Errors
    ///
    /// [`TokenError::Overflow`] if the supply or balance would overflow.
    pub fn mint(&self, token: &Address, to: &Address, amount: Amount) -> Result<(), TokenError> {
        let mut books = self.books.write().unwrap_or_else(|e| e.into_inner());
        let book = books.entry(*token).or_default();
        let supply = book
            .total_supply
            .checked_add(&amount)
            .ok_or(TokenError::Overflow)?;
        let balance = book
            .balance(to)
            .checked_add(&amount)
            .ok_or(TokenError::Overflow)?;
        book.total_supply = supply;
        book.balances.insert(*to, balance);
        Ok(())
    }

    /// Returns the total minted supply of `token`.
    pub fn total_supply(&self, token: &Address) -> Amount {
        let books = self.books.read().unwrap_or_else(|e| e.into_inner());
        books
            .get(token)
            .map(|book| book.total_supply)
            .unwrap_or_default()
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: &Address, owner: &Address) -> Amount {
        let books = self.books.read().unwrap_or_else(|e| e.into_inner());
        books
            .get(token)
            .map(|book| book.balance(owner))
            .unwrap_or_default()
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount {
        let books = self.books.read().unwrap_or_else(|e| e.into_inner());
        books
            .get(token)
            .map(|book| book.allowance(owner, spender))
            .unwrap_or_default()
    }

    fn approve(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let mut books = self.books.write().unwrap_or_else(|e| e.into_inner());
        books
            .entry(*token)
            .or_default()
            .allowances
            .insert((*owner, *spender), amount);
        Ok(())
    }

    fn settle(&self, settlement: &Settlement) -> Result<(), TokenError> {
        let mut books = self.books.write().unwrap_or_else(|e| e.into_inner());

        // Stage every touched balance and allowance, then commit at once.
        let mut balances: HashMap<(Address, Address), Amount> = HashMap::new();
        let mut allowances: HashMap<(Address, Address, Address), Amount> = HashMap::new();

        for leg in settlement.legs() {
            let book = books.get(&leg.token);
            let current = |owner: &Address| {
                book.map(|b| b.balance(owner)).unwrap_or_default()
            };

            if let Some(spender) = leg.spender {
                let key = (leg.token, leg.from, spender);
                let allowed = allowances
                    .get(&key)
                    .copied()
                    .unwrap_or_else(|| book.map(|b| b.allowance(&leg.from, &spender)).unwrap_or_default());
                let remaining = allowed.checked_sub(&leg.amount).ok_or_else(|| {
                    debug!(token = %leg.token, owner = %leg.from, spender = %spender, "allowance too low");
                    TokenError::InsufficientAllowance
                })?;
                allowances.insert(key, remaining);
            }

            let from_key = (leg.token, leg.from);
            let from_balance = balances
                .get(&from_key)
                .copied()
                .unwrap_or_else(|| current(&leg.from));
            let debited = from_balance.checked_sub(&leg.amount).ok_or_else(|| {
                debug!(token = %leg.token, owner = %leg.from, "balance too low");
                TokenError::InsufficientBalance
            })?;
            balances.insert(from_key, debited);

            let to_key = (leg.token, leg.to);
            let to_balance = balances
                .get(&to_key)
                .copied()
                .unwrap_or_else(|| current(&leg.to));
            let credited = to_balance
                .checked_add(&leg.amount)
                .ok_or(TokenError::Overflow)?;
            balances.insert(to_key, credited);
        }

        for ((token, owner), amount) in balances {
            books.entry(token).or_default().balances.insert(owner, amount);
        }
        for ((token, owner, spender), amount) in allowances {
            books
                .entry(token)
                .or_default()
                .allowances
                .insert((owner, spender), amount);
        }
        Ok(())
    }
}
