//! Pool creation and token → pool lookup.
//!
//! The [`PoolRegistry`] creates one [`ExchangePool`](crate::pools::ExchangePool)
//! per token, hands out [`PoolId`]s, and routes token→token swaps between
//! two of its pools.
//!
//! # Usage
//!
//! ```rust
//! use cereal_swap::config::RegistryConfig;
//! use cereal_swap::domain::{Address, FeeTier};
//! use cereal_swap::factory::PoolRegistry;
//!
//! let mut registry = PoolRegistry::new(RegistryConfig::default());
//! let id = registry.create_pool(Address::from_bytes([3u8; 32])).expect("created");
//! let pool = registry.pool(id).expect("exists");
//! assert_eq!(pool.fee_tier(), FeeTier::ONE_PERCENT);
//! ```

mod pool_id;
mod registry;

pub use pool_id::PoolId;
pub use registry::PoolRegistry;
