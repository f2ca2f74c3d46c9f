//! Per-call execution context.

use super::{Address, Amount};

/// Who is calling a pool and how much native currency rides along.
///
/// By the time a pool sees a `CallContext`, `value` has already been
/// credited to the pool's ledger account; see
/// [`Environment::call_payable`](crate::traits::Environment::call_payable).
///
/// # Examples
///
/// ```
/// use cereal_swap::domain::{Address, Amount, CallContext};
///
/// let ctx = CallContext::new(Address::from_bytes([7u8; 32]), Amount::new(100));
/// assert_eq!(ctx.value(), Amount::new(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    caller: Address,
    value: Amount,
}

impl CallContext {
    /// Creates a context for `caller` attaching `value`.
    #[must_use]
    pub const fn new(caller: Address, value: Amount) -> Self {
        Self { caller, value }
    }

    /// Creates a context that attaches no native currency.
    #[must_use]
    pub const fn unpaid(caller: Address) -> Self {
        Self {
            caller,
            value: Amount::ZERO,
        }
    }

    /// The calling account.
    #[must_use]
    pub const fn caller(&self) -> Address {
        self.caller
    }

    /// Native currency attached to the call.
    pub const fn value(&self) -> Amount {
        self.value
    }
}
