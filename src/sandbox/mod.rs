//! In-memory collaborators for tests, demos and simulations.
//!
//! [`InMemoryEnvironment`] holds an [`InMemoryLedger`] for native
//! currency and any number of [`InMemoryToken`] contracts.

mod environment;
mod ledger;
mod token;

pub use environment::InMemoryEnvironment;
pub use ledger::InMemoryLedger;
pub use token::InMemoryToken;
