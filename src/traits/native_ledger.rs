//! Native currency collaborator.

use crate::domain::{Address, Amount};
use crate::error::AmmError;

/// Ledger of the chain's native currency.
///
/// Value attached to a payable call is moved to the callee before the
/// callee's logic runs (see
/// [`Environment::call_payable`](super::Environment::call_payable)), so a
/// pool observes its incoming native amount already credited.
pub trait NativeLedger {
    /// Native balance held by `account`.
    #[must_use]
    fn balance_of(&self, account: &Address) -> Amount;

    /// Moves `amount` from `from` to `to`. Atomic.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), AmmError>;
}
