//! Outcomes of pool operations.

use core::fmt;

use super::{Amount, Shares};
use crate::error::AmmError;

/// Which asset a swap consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Native currency in, token out.
    NativeToToken,
    /// Token in, native currency out.
    TokenToNative,
    /// Token in, another pool's token out, routed through native currency.
    TokenToToken,
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeToToken => write!(f, "native->token"),
            Self::TokenToNative => write!(f, "token->native"),
            Self::TokenToToken => write!(f, "token->token"),
        }
    }
}

/// Outcome of a swap.
///
/// Zero-amount swaps are legal, so unlike a strict trade record every field
/// may be zero. The only structural rule is `fee <= amount_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapReceipt {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapReceipt {
    /// Creates a receipt.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `fee > amount_in`.
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if fee.get() > amount_in.get() {
            return Err(AmmError::InvalidConfiguration(
                "swap fee cannot exceed the input amount",
            ));
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Direction of the trade.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Input the caller paid.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output the caller received.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Part of the input retained by the (first) pool as fee.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swap({}, in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}

/// Outcome of `add_liquidity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositReceipt {
    /// Native currency added to the reserve.
    pub native_in: Amount,
    /// Tokens pulled from the caller (never more than the offered ceiling).
    pub token_in: Amount,
    /// Shares credited to the caller.
    pub shares_minted: Shares,
}

/// Outcome of `remove_liquidity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithdrawalReceipt {
    /// Native currency paid to the caller.
    pub native_out: Amount,
    /// Tokens paid to the caller.
    pub token_out: Amount,
    /// Shares burned from the caller.
    pub shares_burned: Shares,
}

impl WithdrawalReceipt {
    /// Receipt for a withdrawal that burns nothing and pays nothing.
    pub const EMPTY: Self = Self {
        native_out: Amount::ZERO,
        token_out: Amount::ZERO,
        shares_burned: Shares::ZERO,
    };
}
