//! In-memory fungible token.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::FungibleToken;

/// A token contract held entirely in memory.
///
/// Balances and allowances default to zero for unknown accounts. Every
/// mutation validates first and writes afterwards, so a failed call
/// leaves the token unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryToken {
    symbol: String,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<Address, HashMap<Address, Amount>>,
}

impl InMemoryToken {
    /// Creates an empty token.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Sum of all balances.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Creates `amount` new units owned by `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the supply would exceed `u128`.
    pub fn mint(&mut self, to: &Address, amount: Amount) -> Result<(), AmmError> {
        let supply = self.total_supply.safe_add(&amount)?;
        let balance = self.balance_of(to).safe_add(&amount)?;
        self.total_supply = supply;
        self.balances.insert(*to, balance);
        Ok(())
    }

    /// Number of accounts holding a non-zero balance.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
        let available = self.balance_of(from);
        let debited = available
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance {
                account: *from,
                available,
                requested: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self.balance_of(to).safe_add(&amount)?;
        self.balances.insert(*from, debited);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

impl FungibleToken for InMemoryToken {
    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|by_spender| by_spender.get(spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
        self.move_balance(from, to, amount)
    }

    fn approve(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let allowed = self.allowance(owner, spender);
        let remaining = allowed
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientAllowance {
                spender: *spender,
                allowed,
                requested: amount,
            })?;
        self.move_balance(owner, to, amount)?;
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, remaining);
        Ok(())
    }
}
