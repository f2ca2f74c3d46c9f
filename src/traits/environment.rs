//! Execution environment: the collaborators a pool operation talks to.
//!
//! An [`Environment`] bundles the native ledger with every deployed token
//! contract. Pool methods take `&mut E` so that a single operation can
//! move native currency and tokens while the environment guarantees calls
//! are serialized.

use super::{FungibleToken, NativeLedger};
use crate::domain::{Address, Amount, CallContext};
use crate::error::AmmError;

/// Access to the native ledger and token contracts.
pub trait Environment {
    /// Token contract type.
    type Token: FungibleToken;
    /// Native ledger type.
    type Native: NativeLedger;

    /// Shared access to the native ledger.
    fn native(&self) -> &Self::Native;

    /// Exclusive access to the native ledger.
    fn native_mut(&mut self) -> &mut Self::Native;

    /// Shared access to the token contract at `contract`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownTokenContract`] if nothing is deployed
    /// at `contract`.
    fn token(&self, contract: &Address) -> Result<&Self::Token, AmmError>;

    /// Exclusive access to the token contract at `contract`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownTokenContract`] if nothing is deployed
    /// at `contract`.
    fn token_mut(&mut self, contract: &Address) -> Result<&mut Self::Token, AmmError>;

    /// Runs a payable operation.
    ///
    /// # Flow
    ///
    /// 1. Move `value` from `caller` to `callee` on the native ledger.
    /// 2. Run `op` with a [`CallContext`] describing the call.
    /// 3. If `op` fails, move `value` back to `caller` and return the
    ///    original error.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `caller` cannot pay `value`;
    ///   `op` is not run.
    /// - Any error returned by `op`.
    fn call_payable<T, F>(
        &mut self,
        caller: &Address,
        callee: &Address,
        value: Amount,
        op: F,
    ) -> Result<T, AmmError>
    where
        Self: Sized,
        F: FnOnce(&mut Self, &CallContext) -> Result<T, AmmError>,
    {
        self.native_mut().transfer(caller, callee, value)?;
        let ctx = CallContext::new(*caller, value);
        match op(self, &ctx) {
            Ok(out) => Ok(out),
            Err(err) => {
                if let Err(refund) = self.native_mut().transfer(callee, caller, value) {
                    tracing::error!(%caller, %callee, %value, error = %refund, "payable refund failed");
                }
                Err(err)
            }
        }
    }
}
