//! 256-bit intermediate arithmetic.
//!
//! Reserve math multiplies two `u128` quantities before dividing (for
//! example `reserve_token * native_in / reserve_native`). With 18-decimal
//! assets those products pass `u128::MAX` at around 10^19 whole units, so
//! every such expression is evaluated in [`U256`] and only the quotient is
//! narrowed back.

use ethnum::U256;

use crate::domain::Rounding;
use crate::error::AmmError;

/// Computes `a * b / denominator` with the product held in 256 bits.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use cereal_swap::domain::Rounding;
/// use cereal_swap::math::mul_div;
///
/// // (2^127 * 4) / 8 overflows u128 in the product but not in the result.
/// let half = 1u128 << 127;
/// assert_eq!(mul_div(half, 4, 8, Rounding::Down).ok(), Some(1u128 << 127 >> 1));
/// ```
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = wide_mul(a, b);
    let denominator = U256::from(denominator);
    let mut quotient = product / denominator;
    if rounding.is_up() && product % denominator != U256::ZERO {
        quotient += U256::ONE;
    }
    narrow(quotient)
}

/// Computes `a * b` in 256 bits. Never overflows.
#[must_use]
pub(crate) fn wide_mul(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

fn narrow(value: U256) -> Result<u128, AmmError> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow("mul_div result exceeds u128"));
    }
    Ok(value.as_u128())
}
