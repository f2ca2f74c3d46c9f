//! Rounding helpers for `u128` division.
//!
//! [`div_round`] is the low-level building block behind
//! [`Amount::checked_div`](crate::domain::Amount::checked_div). Divisions
//! whose numerator is a product of two reserves go through
//! [`mul_div`](super::mul_div) instead.
//!
//! # Examples
//!
//! ```
//! use cereal_swap::domain::Rounding;
//! use cereal_swap::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use crate::domain::Rounding;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Some(quotient),
        // quotient + 1 cannot overflow: a non-zero remainder means
        // numerator > quotient * denominator, so quotient < u128::MAX.
        Rounding::Up if numerator % denominator != 0 => Some(quotient + 1),
        Rounding::Up => Some(quotient),
    }
}
