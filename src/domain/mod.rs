//! Fundamental domain value types used throughout the exchange.
//!
//! Amounts, shares, identities, fees, call contexts, and operation
//! receipts. All types are newtypes or small records with validated
//! constructors; arithmetic on them is checked.

mod address;
mod amount;
mod basis_points;
mod call_context;
mod fee_tier;
mod receipts;
mod rounding;
mod shares;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use call_context::CallContext;
pub use fee_tier::FeeTier;
pub use receipts::{DepositReceipt, SwapDirection, SwapReceipt, WithdrawalReceipt};
pub use rounding::Rounding;
pub use shares::Shares;
