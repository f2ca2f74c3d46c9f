//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;

/// The fee a pool charges on the input leg of every swap.
///
/// The fee is never transferred anywhere: it is the part of the input that
/// enters the reserves without buying any output, which is what makes the
/// reserve product grow on every swap.
///
/// # Examples
///
/// ```
/// use cereal_swap::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::ONE_PERCENT;
/// assert_eq!(tier.net_input(Amount::new(1_000)).ok(), Some(Amount::new(990)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.30% fee (30 bp).
    pub const POINT_THREE_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp), the exchange default.
    pub const ONE_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Checks that the tier leaves some input to trade with.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for fees of 100% or more.
    pub const fn validate(&self) -> crate::error::Result<()> {
        if self.0.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(AmmError::InvalidFee("fee must be below 100%"));
        }
        Ok(())
    }

    /// Portion of `amount_in` that reaches the pricing curve:
    /// `floor(amount_in * (10_000 - bps) / 10_000)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the tier exceeds 100%.
    pub fn net_input(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        let keep = self
            .0
            .complement()
            .ok_or(AmmError::InvalidFee("fee exceeds 100%"))?;
        keep.apply(amount_in, Rounding::Down)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::ONE_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
