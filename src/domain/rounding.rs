//! Explicit rounding direction for integer division.

/// Rounding direction for every division in the engine.
///
/// Exchange math always rounds in the pool's favour, which for every
/// quantity the pool computes (swap output, tokens required by a deposit,
/// shares minted, assets returned by a withdrawal) means [`Rounding::Down`].
/// [`Rounding::Up`] exists for callers sizing inputs, such as an approval
/// that must cover a deposit.
///
/// # Examples
///
/// ```
/// use cereal_swap::domain::Rounding;
///
/// assert!(Rounding::Down.is_down());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
