//! Configuration for a single exchange pool.

use crate::domain::{Address, FeeTier};
use crate::error::AmmError;

/// Immutable parameters of an [`ExchangePool`](crate::pools::ExchangePool).
///
/// A pool pairs the native currency with exactly one token. Its own
/// `address` is the account that holds its reserves on both ledgers; the
/// registry derives it with [`Address::for_pool`].
///
/// # Validation
///
/// - `token` must not be the null address.
/// - `address` must not be the null address and must differ from `token`.
/// - The fee tier must be below 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    address: Address,
    token: Address,
    #[cfg_attr(feature = "serde", serde(default))]
    fee_tier: FeeTier,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(address: Address, token: Address, fee_tier: FeeTier) -> Result<Self, AmmError> {
        let config = Self {
            address,
            token,
            fee_tier,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token` is null.
    /// - [`AmmError::InvalidConfiguration`] if `address` is null or equals
    ///   `token`.
    /// - [`AmmError::InvalidFee`] if the fee tier is 100% or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.token.is_zero() {
            return Err(AmmError::InvalidToken("token address must not be zero"));
        }
        if self.address.is_zero() {
            return Err(AmmError::InvalidConfiguration("pool address must not be zero"));
        }
        if self.address == self.token {
            return Err(AmmError::InvalidConfiguration(
                "pool address must differ from its token",
            ));
        }
        self.fee_tier.validate()
    }

    /// Returns the pool's own account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the paired token contract.
    #[must_use]
    pub const fn token(&self) -> Address {
        self.token
    }

    /// Returns the swap fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
