//! Point-in-time view of a pool's state.

use core::fmt;

use crate::domain::{Address, Amount, FeeTier, Shares};

/// Read-only copy of an [`ExchangePool`](super::ExchangePool)'s state.
///
/// Cheap to take and detached from the pool, so it can be logged or
/// serialized (with the `serde` feature) without holding a borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSnapshot {
    /// The pool's own account.
    pub address: Address,
    /// Paired token contract.
    pub token: Address,
    /// Swap fee tier.
    pub fee_tier: FeeTier,
    /// Native reserve.
    pub reserve_native: Amount,
    /// Token reserve.
    pub reserve_token: Amount,
    /// Outstanding shares.
    pub share_supply: Shares,
    /// Accounts holding a non-zero share balance.
    pub holders: usize,
    /// Lifetime fees retained from native inputs.
    pub accumulated_fees_native: Amount,
    /// Lifetime fees retained from token inputs.
    pub accumulated_fees_token: Amount,
}

impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool({}, token={}, native={}, token_reserve={}, shares={}, holders={})",
            self.address,
            self.token,
            self.reserve_native,
            self.reserve_token,
            self.share_supply,
            self.holders
        )
    }
}
