//! The native/token exchange pool.
//!
//! [`ExchangePool`] owns the reserves and share ledger of one pool and
//! implements deposits, withdrawals, quotes, single-hop swaps, and the
//! source side of token→token routing. [`PoolSnapshot`] is a detached copy
//! of its state for logging and serialization.

mod exchange_pool;
mod snapshot;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use exchange_pool::{ExchangePool, SHARE_NAME};
pub use snapshot::PoolSnapshot;
