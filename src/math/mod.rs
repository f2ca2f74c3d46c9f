//! Arithmetic utilities for reserve and share calculations.
//!
//! [`CheckedArithmetic`] wraps overflow-checked operations on domain types,
//! [`div_round`] and [`mul_div`] provide explicit-rounding division (the
//! latter with a 256-bit intermediate product), and [`amount_out`] is the
//! fee-adjusted constant-product pricing function shared by every swap.

mod checked;
mod pricing;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use pricing::{amount_out, quote, SwapQuote};
pub use rounding::div_round;
pub use wide::mul_div;
pub(crate) use wide::wide_mul;
