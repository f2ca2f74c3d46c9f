//! Token → pool registry with two-hop routing.

use std::collections::HashMap;

use super::PoolId;
use crate::config::{PoolConfig, RegistryConfig};
use crate::domain::{Address, Amount, SwapReceipt};
use crate::error::AmmError;
use crate::pools::ExchangePool;
use crate::traits::{Environment, FromConfig};

/// Owns every pool and maps each token to exactly one of them.
///
/// `create_pool` is the only way to add an entry; entries are never
/// removed, so the mapping is injective and stable. Pool `n` lives at
/// [`Address::for_registry_pool`]`(namespace, n)` with the namespace from
/// [`RegistryConfig`]; registries sharing an environment need distinct
/// namespaces.
///
/// # Routing
///
/// [`swap_token_to_token`](Self::swap_token_to_token) resolves both pools
/// and borrows them mutably at the same time, which the pool-level
/// [`ExchangePool::swap_token_to_token`] requires.
///
/// # Example
///
/// ```rust
/// use cereal_swap::domain::Address;
/// use cereal_swap::factory::PoolRegistry;
///
/// let mut registry = PoolRegistry::default();
/// let token = Address::from_bytes([7u8; 32]);
/// let id = registry.create_pool(token).expect("created");
/// assert_eq!(registry.lookup_pool(&token), Some(id));
/// assert!(registry.create_pool(token).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    config: RegistryConfig,
    pools: Vec<ExchangePool>,
    by_token: HashMap<Address, PoolId>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            pools: Vec::new(),
            by_token: HashMap::new(),
        }
    }

    /// Registry-wide configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Creates the pool for `token`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token` is the null address.
    /// - [`AmmError::PoolAlreadyExists`] if `token` already has a pool.
    /// - [`AmmError::InvalidFee`] if the registry's fee tier is invalid.
    pub fn create_pool(&mut self, token: Address) -> Result<PoolId, AmmError> {
        if token.is_zero() {
            tracing::warn!("pool creation for null token rejected");
            return Err(AmmError::InvalidToken("token address must not be zero"));
        }
        if self.by_token.contains_key(&token) {
            tracing::warn!(%token, "duplicate pool rejected");
            return Err(AmmError::PoolAlreadyExists(token));
        }

        let id = PoolId::new(self.pools.len());
        let index =
            u64::try_from(id.index()).map_err(|_| AmmError::Overflow("pool index exceeds u64"))?;
        let address = Address::for_registry_pool(self.config.namespace(), index);
        let config = PoolConfig::new(address, token, self.config.fee_tier())?;
        let pool = ExchangePool::from_config(&config)?;

        tracing::info!(%token, pool = %pool.address(), %id, "pool created");
        self.pools.push(pool);
        self.by_token.insert(token, id);
        Ok(id)
    }

    /// Id of the pool for `token`, if any.
    #[must_use]
    pub fn lookup_pool(&self, token: &Address) -> Option<PoolId> {
        self.by_token.get(token).copied()
    }

    /// Shared access to a pool.
    #[must_use]
    pub fn pool(&self, id: PoolId) -> Option<&ExchangePool> {
        self.pools.get(id.index())
    }

    /// Exclusive access to a pool.
    pub fn pool_mut(&mut self, id: PoolId) -> Option<&mut ExchangePool> {
        self.pools.get_mut(id.index())
    }

    /// Pool for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if `token` has no pool.
    pub fn pool_by_token(&self, token: &Address) -> Result<&ExchangePool, AmmError> {
        self.lookup_pool(token)
            .and_then(|id| self.pool(id))
            .ok_or(AmmError::PoolNotFound(*token))
    }

    /// Exclusive access to the pool for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if `token` has no pool.
    pub fn pool_by_token_mut(&mut self, token: &Address) -> Result<&mut ExchangePool, AmmError> {
        let id = self
            .lookup_pool(token)
            .ok_or(AmmError::PoolNotFound(*token))?;
        self.pool_mut(id).ok_or(AmmError::PoolNotFound(*token))
    }

    /// Two distinct pools borrowed mutably at once, in argument order.
    ///
    /// Returns `None` if `a == b` or either id is out of range.
    pub fn pool_pair_mut(
        &mut self,
        a: PoolId,
        b: PoolId,
    ) -> Option<(&mut ExchangePool, &mut ExchangePool)> {
        let (lo, hi) = match a.index().cmp(&b.index()) {
            core::cmp::Ordering::Less => (a.index(), b.index()),
            core::cmp::Ordering::Greater => (b.index(), a.index()),
            core::cmp::Ordering::Equal => return None,
        };
        if hi >= self.pools.len() {
            return None;
        }
        let (left, right) = self.pools.split_at_mut(hi);
        let low = left.get_mut(lo)?;
        let high = right.first_mut()?;
        if a.index() < b.index() {
            Some((low, high))
        } else {
            Some((high, low))
        }
    }

    /// Sells `token_in` of `source_token` for `destination_token`, routing
    /// through the native currency of both pools.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if either token has no pool.
    /// - [`AmmError::InvalidToken`] if both tokens are the same.
    /// - Any error from [`ExchangePool::swap_token_to_token`]; in every
    ///   error case no state changes.
    pub fn swap_token_to_token<E: Environment>(
        &mut self,
        env: &mut E,
        caller: &Address,
        source_token: &Address,
        token_in: Amount,
        min_other_out: Amount,
        destination_token: &Address,
    ) -> Result<SwapReceipt, AmmError> {
        let source = self
            .lookup_pool(source_token)
            .ok_or(AmmError::PoolNotFound(*source_token))?;
        let Some(destination) = self.lookup_pool(destination_token) else {
            tracing::warn!(token = %destination_token, "no pool for destination token");
            return Err(AmmError::PoolNotFound(*destination_token));
        };
        let (src, dst) = self
            .pool_pair_mut(source, destination)
            .ok_or(AmmError::InvalidToken("source and destination tokens are the same"))?;
        src.swap_token_to_token(dst, env, caller, token_in, min_other_out)
    }

    /// Number of pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// `true` if no pool has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Registered tokens in creation order.
    pub fn tokens(&self) -> impl Iterator<Item = Address> + '_ {
        self.pools.iter().map(ExchangePool::token)
    }

    /// All pools in creation order.
    pub fn pools(&self) -> impl Iterator<Item = &ExchangePool> {
        self.pools.iter()
    }
}
