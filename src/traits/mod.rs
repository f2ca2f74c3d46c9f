//! Collaborator and construction traits.
//!
//! Pools talk to the outside world only through these seams:
//! [`FungibleToken`] and [`NativeLedger`] for balances, [`Environment`]
//! to reach both during one call, and [`FromConfig`] for construction.

mod environment;
mod from_config;
mod fungible_token;
mod native_ledger;

pub use environment::Environment;
pub use from_config::FromConfig;
pub use fungible_token::FungibleToken;
pub use native_ledger::NativeLedger;
