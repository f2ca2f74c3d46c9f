//! Unified error types for the exchange engine.
//!
//! All fallible operations across the crate return [`AmmError`], so a
//! caller sees one taxonomy whether a failure came from pricing, share
//! accounting, the registry, or an asset collaborator.

use crate::domain::{Address, Amount, Shares};

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every failure an exchange operation can surface.
///
/// Operations are all-or-nothing: whenever one of these is returned, the
/// pool, registry, and collaborator balances are exactly as they were
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// The deposit's token ceiling is below what the current ratio requires.
    #[error("insufficient amount: deposit requires {required} tokens, ceiling was {offered}")]
    InsufficientAmount {
        /// Tokens the current reserve ratio demands.
        required: Amount,
        /// Ceiling offered by the caller.
        offered: Amount,
    },

    /// A withdrawal asked for more shares than the caller holds.
    #[error("insufficient shares: requested {requested}, held {held}")]
    InsufficientShares {
        /// Shares the caller tried to burn.
        requested: Shares,
        /// Shares the caller actually holds.
        held: Shares,
    },

    /// The swap output fell below the caller's slippage floor.
    #[error("minimum not met: expected at least {minimum}, swap yields {actual}")]
    MinimumNotMet {
        /// Caller-specified floor.
        minimum: Amount,
        /// Output the swap would have produced.
        actual: Amount,
    },

    /// No pool is registered for the token.
    #[error("no pool registered for token {0}")]
    PoolNotFound(Address),

    /// A pool is already registered for the token.
    #[error("a pool already exists for token {0}")]
    PoolAlreadyExists(Address),

    /// The token identity is unusable for the requested operation.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// The first deposit supplied only one side of the pair.
    #[error("unbalanced seed: first deposit needs both native ({native}) and token ({token}) or neither")]
    UnbalancedSeed {
        /// Native amount attached to the seeding call.
        native: Amount,
        /// Token amount offered by the seeding call.
        token: Amount,
    },

    /// The environment has no contract for the token.
    #[error("no token contract deployed at {0}")]
    UnknownTokenContract(Address),

    /// A ledger debit exceeded the account balance.
    #[error("insufficient balance: {account} holds {available}, needs {requested}")]
    InsufficientBalance {
        /// Account being debited.
        account: Address,
        /// Current balance.
        available: Amount,
        /// Amount the transfer required.
        requested: Amount,
    },

    /// A transfer-on-behalf exceeded the spender's allowance.
    #[error("insufficient allowance: {spender} may move {allowed}, needs {requested}")]
    InsufficientAllowance {
        /// Account attempting the transfer.
        spender: Address,
        /// Remaining allowance.
        allowed: Amount,
        /// Amount the transfer required.
        requested: Amount,
    },

    /// The pricing function was called against an empty reserve.
    #[error("pool reserves are empty")]
    ZeroReserve,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Fee tier outside the usable range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

impl AmmError {
    /// Returns `true` for failures raised by an asset collaborator rather
    /// than by the exchange's own rules.
    #[must_use]
    pub const fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::UnknownTokenContract(_)
                | Self::InsufficientBalance { .. }
                | Self::InsufficientAllowance { .. }
        )
    }
}
