//! Fee-adjusted constant-product pricing.
//!
//! # Formula
//!
//! ```text
//! net_in     = floor(amount_in × (10 000 − fee_bps) / 10 000)
//! amount_out = floor(net_in × reserve_out / (reserve_in + net_in))
//! ```
//!
//! With the default 1% tier, `net_in = floor(amount_in × 99 / 100)`.
//!
//! Both divisions floor. The fee portion enters the input reserve without
//! buying output and the floor on `amount_out` leaves the remainder in the
//! output reserve, so `reserve_in × reserve_out` never decreases across a
//! swap. Because `reserve_in > 0`, the denominator is strictly larger than
//! `net_in`, hence `amount_out < reserve_out`: no swap can drain a reserve.

use super::{mul_div, CheckedArithmetic};
use crate::domain::{Amount, FeeTier, Rounding};
use crate::error::AmmError;

/// Output and retained fee for a prospective swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapQuote {
    /// Amount the pool would pay out.
    pub amount_out: Amount,
    /// Input retained as fee (`amount_in − net_in`).
    pub fee: Amount,
}

/// Prices a swap of `amount_in` against `(reserve_in, reserve_out)`.
///
/// Pure: no state is read or written besides the arguments.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is zero.
/// - [`AmmError::InvalidFee`] if `fee_tier` is above 100%.
/// - [`AmmError::Overflow`] if `reserve_in + net_in` exceeds `u128`.
pub fn quote(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee_tier: FeeTier,
) -> Result<SwapQuote, AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }

    let net_in = fee_tier.net_input(amount_in)?;
    let denominator = reserve_in.safe_add(&net_in)?;
    let amount_out = Amount::new(mul_div(
        net_in.get(),
        reserve_out.get(),
        denominator.get(),
        Rounding::Down,
    )?);
    debug_assert!(amount_out < reserve_out);

    Ok(SwapQuote {
        amount_out,
        fee: amount_in.safe_sub(&net_in)?,
    })
}

/// Output amount for `amount_in` against `(reserve_in, reserve_out)`.
///
/// # Errors
///
/// Same as [`quote`].
///
/// # Examples
///
/// ```
/// use cereal_swap::domain::{Amount, FeeTier};
/// use cereal_swap::math::amount_out;
///
/// let e18 = 1_000_000_000_000_000_000u128;
/// let out = amount_out(
///     Amount::new(e18),
///     Amount::new(1_000 * e18),
///     Amount::new(2_000 * e18),
///     FeeTier::ONE_PERCENT,
/// );
/// assert_eq!(out.ok(), Some(Amount::new(1_978_041_738_678_708_079)));
/// ```
pub fn amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee_tier: FeeTier,
) -> Result<Amount, AmmError> {
    quote(amount_in, reserve_in, reserve_out, fee_tier).map(|q| q.amount_out)
}
