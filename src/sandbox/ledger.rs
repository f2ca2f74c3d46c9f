//! In-memory native currency ledger.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::NativeLedger;

/// Native balances held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: HashMap<Address, Amount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn credit(&mut self, account: &Address, amount: Amount) -> Result<(), AmmError> {
        let balance = self.balance_of(account).safe_add(&amount)?;
        self.balances.insert(*account, balance);
        Ok(())
    }
}

impl NativeLedger for InMemoryLedger {
    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
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
