//! Pool and registry configuration.
//!
//! Configurations are validated at construction and are immutable
//! afterwards. With the `serde` feature they can be loaded from any
//! serde format.

mod pool_config;
mod registry_config;

pub use pool_config::PoolConfig;
pub use registry_config::RegistryConfig;
