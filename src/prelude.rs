//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use cereal_swap::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, CallContext, DepositReceipt, FeeTier, Rounding, Shares,
    SwapDirection, SwapReceipt, WithdrawalReceipt,
};

pub use crate::traits::{Environment, FromConfig, FungibleToken, NativeLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{PoolConfig, RegistryConfig};

pub use crate::error::{AmmError, Result};

pub use crate::factory::{PoolId, PoolRegistry};

pub use crate::pools::{ExchangePool, PoolSnapshot};
