//! # CerealSwap
//!
//! Native/token automated market maker: liquidity pools that pair a
//! chain's native currency with one fungible token, a registry that keeps
//! exactly one pool per token, and token→token swaps routed through the
//! native currency of two pools.
//!
//! Every formula is integer arithmetic with 256-bit intermediates and
//! floor rounding. Swaps charge a fee (1% by default) on the input before
//! applying the constant-product rule:
//!
//! ```text
//! net_in     = floor(amount_in × 99 / 100)
//! amount_out = floor(net_in × reserve_out / (reserve_in + net_in))
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for domain, config and snapshot types |
//!
//! # Quick Start
//!
//! ```rust
//! use cereal_swap::prelude::*;
//! use cereal_swap::sandbox::InMemoryEnvironment;
//!
//! let mut env = InMemoryEnvironment::new();
//! let mut registry = PoolRegistry::default();
//! let alice = Address::from_bytes([1u8; 32]);
//!
//! // 1. Deploy a token and create its pool
//! let token = env.deploy_token("CRL");
//! let id = registry.create_pool(token).expect("pool created");
//! let pool = registry.pool_mut(id).expect("pool exists");
//!
//! // 2. Fund the provider and approve the pool
//! env.fund(&alice, Amount::new(1_000)).expect("funded");
//! env.mint(&token, &alice, Amount::new(2_000)).expect("minted");
//! env.approve(&token, &alice, &pool.address(), Amount::new(2_000)).expect("approved");
//!
//! // 3. Seed the pool and trade against it
//! pool.add_liquidity(&mut env, &alice, Amount::new(1_000), Amount::new(2_000))
//!     .expect("seeded");
//! let receipt = pool
//!     .swap_native_for_token(&mut env, &alice, Amount::ZERO, Amount::ZERO)
//!     .expect("zero swap is a no-op");
//! assert!(receipt.amount_out().is_zero());
//! assert_eq!(pool.quote_token_out(Amount::new(100)), Ok(Amount::new(180)));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller     │  PoolRegistry + Environment
//! └──────┬───────┘
//!        │ create_pool / swap_token_to_token
//!        ▼
//! ┌──────────────┐
//! │   Registry    │  token → PoolId, disjoint &mut pool pairs
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Pools      │  reserves, shares, swaps, quotes
//! └──────┬───────┘
//!        │ FungibleToken + NativeLedger traits
//!        ▼
//! ┌──────────────┐
//! │ Collaborators │  token contracts, native ledger
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Address`](domain::Address), receipts |
//! | [`math`]   | Checked arithmetic, 256-bit `mul_div`, the pricing function |
//! | [`traits`] | Collaborator seams: [`FungibleToken`](traits::FungibleToken), [`NativeLedger`](traits::NativeLedger), [`Environment`](traits::Environment) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and [`RegistryConfig`](config::RegistryConfig) |
//! | [`pools`]  | [`ExchangePool`](pools::ExchangePool) |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry) |
//! | [`sandbox`] | In-memory collaborators for tests and simulations |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod sandbox;
pub mod traits;
