//! Construction from a validated configuration.
//!
//! [`FromConfig`] gives the registry one way to build pools: it fills a
//! [`PoolConfig`](crate::config::PoolConfig) and calls
//! `ExchangePool::from_config`.
//!
//! # Validation Contract
//!
//! Implementations **must** validate the configuration before building.
//! A successfully constructed value is in a valid initial state.

use crate::error::AmmError;

/// Builds `Self` from a configuration of type `C`.
///
/// There is no blanket implementation; each pairing is explicit.
///
/// # Errors
///
/// - [`AmmError::InvalidToken`] if the configured token is invalid.
/// - [`AmmError::InvalidFee`] if the fee tier is unsupported.
/// - [`AmmError::InvalidConfiguration`] for any other inconsistency.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
