//! Fungible token collaborator.
//!
//! A pool never owns token balances itself; it asks the token contract
//! paired with it to move funds. [`FungibleToken`] is the minimal surface
//! the pool needs from such a contract.
//!
//! # Transfer-on-behalf
//!
//! Deposits and token-in swaps pull funds with
//! [`transfer_from`](FungibleToken::transfer_from): the owner must first
//! [`approve`](FungibleToken::approve) the pool for at least the pulled
//! amount. The allowance is consumed by the pull.

use crate::domain::{Address, Amount};
use crate::error::AmmError;

/// Balance, allowance and transfer operations of a fungible token.
///
/// Every mutating method is atomic: it either applies completely or
/// returns an error and leaves balances and allowances untouched.
///
/// # Errors
///
/// - [`AmmError::InsufficientBalance`] if the debited account holds less
///   than `amount`.
/// - [`AmmError::InsufficientAllowance`] if a pull exceeds the spender's
///   allowance.
pub trait FungibleToken {
    /// Balance held by `account`.
    #[must_use]
    fn balance_of(&self, account: &Address) -> Amount;

    /// Amount `spender` may still pull from `owner`.
    #[must_use]
    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), AmmError>;

    /// Sets the allowance of `spender` over `owner`'s balance to `amount`.
    ///
    /// # Errors
    ///
    /// Implementations may reject approvals; the in-memory token never does.
    fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount)
        -> Result<(), AmmError>;

    /// `spender` moves `amount` from `owner` to `to`, consuming allowance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the allowance is below
    ///   `amount`.
    /// - [`AmmError::InsufficientBalance`] if `owner` holds less than
    ///   `amount`.
    fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError>;
}
