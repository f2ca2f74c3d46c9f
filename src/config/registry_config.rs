//! Registry-wide configuration.

use crate::domain::FeeTier;
use crate::error::AmmError;

/// Parameters shared by every pool a
/// [`PoolRegistry`](crate::factory::PoolRegistry) creates.
///
/// The default charges the 1% fee tier on every swap and places pools in
/// namespace `0`. Registries that share one environment must use distinct
/// namespaces, otherwise their pool accounts coincide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    fee_tier: FeeTier,
    namespace: u32,
}

impl RegistryConfig {
    /// Creates a new `RegistryConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee tier is 100% or more.
    pub fn new(fee_tier: FeeTier) -> Result<Self, AmmError> {
        let config = Self {
            fee_tier,
            namespace: 0,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee tier is 100% or more.
    pub const fn validate(&self) -> Result<(), AmmError> {
        self.fee_tier.validate()
    }

    /// Same configuration with pool accounts derived under `namespace`.
    #[must_use]
    pub const fn with_namespace(mut self, namespace: u32) -> Self {
        self.namespace = namespace;
        self
    }

    /// Fee tier applied by pools of this registry.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Namespace of this registry's pool accounts.
    #[must_use]
    pub const fn namespace(&self) -> u32 {
        self.namespace
    }
}
