//! Native/token exchange pool.
//!
//! Each pool pairs the chain's native currency with a single token and
//! prices swaps with the fee-adjusted constant-product rule in
//! [`math::amount_out`](crate::math::amount_out). Liquidity providers
//! receive non-transferable shares proportional to their native deposit.
//!
//! # Swap Algorithm (native → token)
//!
//! 1. `net_in = floor(native_in × (10 000 − fee_bps) / 10 000)`
//! 2. `token_out = floor(net_in × reserve_token / (reserve_native + net_in))`
//! 3. `reserve_native += native_in` (fee stays in the pool)
//! 4. `reserve_token -= token_out`
//!
//! # Commit Order
//!
//! Every operation computes all new values first, then performs the
//! collaborator transfers, and only writes its own state after every
//! transfer succeeded. When a later transfer fails, the earlier ones are
//! moved back before the error is returned.
//!
//! # Invariants
//!
//! - `reserve_native == 0` ⇔ `reserve_token == 0` ⇔ `share_supply == 0`.
//! - `reserve_native × reserve_token` never decreases across a swap.
//! - The sum of all share balances equals `share_supply`.

use std::collections::HashMap;

use super::PoolSnapshot;
use crate::config::PoolConfig;
use crate::domain::{
    Address, Amount, CallContext, DepositReceipt, FeeTier, Rounding, Shares, SwapDirection,
    SwapReceipt, WithdrawalReceipt,
};
use crate::error::AmmError;
use crate::math::{mul_div, quote, CheckedArithmetic, SwapQuote};
use crate::traits::{Environment, FromConfig, FungibleToken, NativeLedger};

/// Display name of the pool's share token.
pub const SHARE_NAME: &str = "CerealSwap LP-Token";

/// A native/token constant-product pool.
///
/// Created from a [`PoolConfig`] via [`FromConfig`], normally by a
/// [`PoolRegistry`](crate::factory::PoolRegistry). A new pool is empty;
/// the first deposit sets the price.
///
/// # State
///
/// - `reserve_native` / `reserve_token`: balances owned by the pool, fees
///   included. They mirror what the ledgers hold for the pool's account.
/// - `share_supply` / `share_balances`: outstanding shares per provider.
/// - `accumulated_fees_native` / `accumulated_fees_token`: lifetime fee
///   counters.
///
/// # Example
///
/// ```rust
/// use cereal_swap::config::PoolConfig;
/// use cereal_swap::domain::{Address, Amount, FeeTier};
/// use cereal_swap::pools::ExchangePool;
/// use cereal_swap::sandbox::InMemoryEnvironment;
/// use cereal_swap::traits::FromConfig;
///
/// let mut env = InMemoryEnvironment::new();
/// let token = env.deploy_token("CRL");
/// let alice = Address::from_bytes([1; 32]);
/// let cfg = PoolConfig::new(Address::for_pool(0), token, FeeTier::ONE_PERCENT).expect("valid");
/// let mut pool = ExchangePool::from_config(&cfg).expect("pool created");
///
/// env.fund(&alice, Amount::new(1_000)).expect("funded");
/// env.mint(&token, &alice, Amount::new(2_000)).expect("minted");
/// env.approve(&token, &alice, &pool.address(), Amount::new(2_000)).expect("approved");
///
/// pool.add_liquidity(&mut env, &alice, Amount::new(100), Amount::new(200))
///     .expect("seeded");
/// let receipt = pool
///     .swap_native_for_token(&mut env, &alice, Amount::new(10), Amount::ZERO)
///     .expect("swap ok");
/// assert_eq!(receipt.amount_out(), Amount::new(16));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangePool {
    address: Address,
    token: Address,
    fee_tier: FeeTier,
    reserve_native: Amount,
    reserve_token: Amount,
    share_supply: Shares,
    share_balances: HashMap<Address, Shares>,
    accumulated_fees_native: Amount,
    accumulated_fees_token: Amount,
}

impl FromConfig<PoolConfig> for ExchangePool {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            address: config.address(),
            token: config.token(),
            fee_tier: config.fee_tier(),
            reserve_native: Amount::ZERO,
            reserve_token: Amount::ZERO,
            share_supply: Shares::ZERO,
            share_balances: HashMap::new(),
            accumulated_fees_native: Amount::ZERO,
            accumulated_fees_token: Amount::ZERO,
        })
    }
}

impl ExchangePool {
    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The pool's own account on both ledgers.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The paired token contract.
    #[must_use]
    pub const fn token(&self) -> Address {
        self.token
    }

    /// Swap fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Native reserve.
    #[must_use]
    pub const fn reserve_native(&self) -> Amount {
        self.reserve_native
    }

    /// Token reserve.
    #[must_use]
    pub const fn reserve_token(&self) -> Amount {
        self.reserve_token
    }

    /// Total shares outstanding.
    #[must_use]
    pub const fn share_supply(&self) -> Shares {
        self.share_supply
    }

    /// Shares held by `account`.
    #[must_use]
    pub fn share_balance(&self, account: &Address) -> Shares {
        self.share_balances
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    /// Display name of the share token.
    #[must_use]
    pub const fn share_name(&self) -> &'static str {
        SHARE_NAME
    }

    /// Fees retained from native inputs since creation.
    #[must_use]
    pub const fn accumulated_fees_native(&self) -> Amount {
        self.accumulated_fees_native
    }

    /// Fees retained from token inputs since creation.
    #[must_use]
    pub const fn accumulated_fees_token(&self) -> Amount {
        self.accumulated_fees_token
    }

    /// `true` until the first non-empty deposit, and again after the last
    /// share is withdrawn.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.share_supply.is_zero()
    }

    /// Copies the current state into a [`PoolSnapshot`].
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            address: self.address,
            token: self.token,
            fee_tier: self.fee_tier,
            reserve_native: self.reserve_native,
            reserve_token: self.reserve_token,
            share_supply: self.share_supply,
            holders: self.share_balances.len(),
            accumulated_fees_native: self.accumulated_fees_native,
            accumulated_fees_token: self.accumulated_fees_token,
        }
    }

    /// Tokens a swap of `native_in` would pay out at current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroReserve`] if the pool is empty and `native_in > 0`.
    /// - [`AmmError::Overflow`] on arithmetic overflow.
    pub fn quote_token_out(&self, native_in: Amount) -> Result<Amount, AmmError> {
        let q = self.price(native_in, self.reserve_native, self.reserve_token)?;
        tracing::debug!(pool = %self.address, %native_in, token_out = %q.amount_out, "quote native->token");
        Ok(q.amount_out)
    }

    /// Native currency a swap of `token_in` would pay out at current
    /// reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroReserve`] if the pool is empty and `token_in > 0`.
    /// - [`AmmError::Overflow`] on arithmetic overflow.
    pub fn quote_native_out(&self, token_in: Amount) -> Result<Amount, AmmError> {
        let q = self.price(token_in, self.reserve_token, self.reserve_native)?;
        tracing::debug!(pool = %self.address, %token_in, native_out = %q.amount_out, "quote token->native");
        Ok(q.amount_out)
    }

    /// Tokens a deposit of `native_in` would pull:
    /// `floor(reserve_token × native_in / reserve_native)`.
    ///
    /// Lets a provider size its approval before calling
    /// [`add_liquidity`](Self::add_liquidity).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroReserve`] on an empty pool, where the
    /// depositor chooses the ratio.
    pub fn quote_required_token(&self, native_in: Amount) -> Result<Amount, AmmError> {
        if self.is_empty() {
            return Err(AmmError::ZeroReserve);
        }
        self.reserve_token
            .scale(native_in.get(), self.reserve_native.get(), Rounding::Down)
    }

    // -----------------------------------------------------------------------
    // Liquidity
    // -----------------------------------------------------------------------

    /// Deposits `native_in` plus at most `token_max` tokens and mints shares
    /// to `caller`.
    ///
    /// - On an empty pool the deposit seeds the reserves with
    ///   `(native_in, token_max)` and mints `native_in` shares. Both amounts
    ///   must be zero or both non-zero. A one-sided seed is intentionally
    ///   rejected with `UnbalancedSeed`, keeping both reserves and the share
    ///   supply empty or non-empty together.
    /// - Otherwise the pool pulls
    ///   `required = floor(reserve_token × native_in / reserve_native)` and
    ///   mints `floor(share_supply × native_in / reserve_native)`.
    ///
    /// The pool pulls tokens with `transfer_from`, so `caller` must have
    /// approved the pool's address beforehand.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAmount`] if `token_max < required`.
    /// - [`AmmError::UnbalancedSeed`] for a one-sided first deposit.
    /// - Collaborator failures (`InsufficientBalance`,
    ///   `InsufficientAllowance`, `UnknownTokenContract`).
    ///
    /// On error nothing changes: the attached native amount is refunded.
    pub fn add_liquidity<E: Environment>(
        &mut self,
        env: &mut E,
        caller: &Address,
        native_in: Amount,
        token_max: Amount,
    ) -> Result<DepositReceipt, AmmError> {
        let pool = self.address;
        env.call_payable(caller, &pool, native_in, |env, ctx| {
            self.deposit_paid(env, ctx, token_max)
        })
    }

    fn deposit_paid<E: Environment>(
        &mut self,
        env: &mut E,
        ctx: &CallContext,
        token_max: Amount,
    ) -> Result<DepositReceipt, AmmError> {
        let caller = ctx.caller();
        let native_in = ctx.value();

        let (token_in, minted) = if self.is_empty() {
            if native_in.is_zero() != token_max.is_zero() {
                tracing::warn!(pool = %self.address, %native_in, %token_max, "one-sided seed rejected");
                return Err(AmmError::UnbalancedSeed {
                    native: native_in,
                    token: token_max,
                });
            }
            (token_max, Shares::from_amount(native_in))
        } else {
            let required = self.quote_required_token(native_in)?;
            if token_max < required {
                tracing::warn!(pool = %self.address, %required, %token_max, "deposit ceiling too low");
                return Err(AmmError::InsufficientAmount {
                    required,
                    offered: token_max,
                });
            }
            let minted = mul_div(
                self.share_supply.get(),
                native_in.get(),
                self.reserve_native.get(),
                Rounding::Down,
            )?;
            (required, Shares::new(minted))
        };

        let reserve_native = self.reserve_native.safe_add(&native_in)?;
        let reserve_token = self.reserve_token.safe_add(&token_in)?;
        let share_supply = self.share_supply.safe_add(&minted)?;
        let balance = self.share_balance(&caller).safe_add(&minted)?;

        env.token_mut(&self.token)?
            .transfer_from(&self.address, &caller, &self.address, token_in)?;

        self.reserve_native = reserve_native;
        self.reserve_token = reserve_token;
        self.share_supply = share_supply;
        self.set_share_balance(caller, balance);

        tracing::info!(
            pool = %self.address,
            provider = %caller,
            %native_in,
            %token_in,
            shares = %minted,
            "liquidity added"
        );
        Ok(DepositReceipt {
            native_in,
            token_in,
            shares_minted: minted,
        })
    }

    /// Burns `shares` from `caller` and pays out the proportional part of
    /// both reserves, rounded down.
    ///
    /// Burning the entire supply empties the pool exactly; it can then be
    /// re-seeded at any ratio. Burning zero shares is a no-op.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShares`] if `shares` exceeds the caller's
    ///   balance.
    /// - Collaborator failures from the payouts.
    pub fn remove_liquidity<E: Environment>(
        &mut self,
        env: &mut E,
        caller: &Address,
        shares: Shares,
    ) -> Result<WithdrawalReceipt, AmmError> {
        if shares.is_zero() {
            return Ok(WithdrawalReceipt::EMPTY);
        }
        let held = self.share_balance(caller);
        if shares > held {
            tracing::warn!(pool = %self.address, provider = %caller, %shares, %held, "withdrawal exceeds balance");
            return Err(AmmError::InsufficientShares {
                requested: shares,
                held,
            });
        }

        let supply = self.share_supply.get();
        let native_out = self
            .reserve_native
            .scale(shares.get(), supply, Rounding::Down)?;
        let token_out = self
            .reserve_token
            .scale(shares.get(), supply, Rounding::Down)?;

        let reserve_native = self.reserve_native.safe_sub(&native_out)?;
        let reserve_token = self.reserve_token.safe_sub(&token_out)?;
        let share_supply = self.share_supply.safe_sub(&shares)?;
        let balance = held.safe_sub(&shares)?;

        env.native_mut()
            .transfer(&self.address, caller, native_out)?;
        if let Err(err) = env
            .token_mut(&self.token)
            .and_then(|t| t.transfer(&self.address, caller, token_out))
        {
            tracing::warn!(pool = %self.address, error = %err, "token payout failed, returning native");
            move_native(env, caller, &self.address, native_out);
            return Err(err);
        }

        self.reserve_native = reserve_native;
        self.reserve_token = reserve_token;
        self.share_supply = share_supply;
        self.set_share_balance(*caller, balance);

        tracing::info!(
            pool = %self.address,
            provider = %caller,
            %shares,
            %native_out,
            %token_out,
            "liquidity removed"
        );
        Ok(WithdrawalReceipt {
            native_out,
            token_out,
            shares_burned: shares,
        })
    }

    // -----------------------------------------------------------------------
    // Swaps
    // -----------------------------------------------------------------------

    /// Sells `native_in` for tokens, paying at least `min_token_out` to
    /// `caller`.
    ///
    /// A zero input succeeds with a zero output and changes nothing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MinimumNotMet`] if the output is below `min_token_out`.
    /// - [`AmmError::ZeroReserve`] if the pool is empty.
    /// - Collaborator failures.
    ///
    /// On error the native input is refunded.
    pub fn swap_native_for_token<E: Environment>(
        &mut self,
        env: &mut E,
        caller: &Address,
        native_in: Amount,
        min_token_out: Amount,
    ) -> Result<SwapReceipt, AmmError> {
        let pool = self.address;
        env.call_payable(caller, &pool, native_in, |env, ctx| {
            self.fill_native_for_token(env, &ctx.caller(), ctx.value(), min_token_out)
        })
    }

    /// Native→token leg over native that already sits in the pool account.
    ///
    /// Pays the tokens to `recipient`. Entry point for both the payable
    /// swap and the second leg of a token→token swap.
    pub(crate) fn fill_native_for_token<E: Environment>(
        &mut self,
        env: &mut E,
        recipient: &Address,
        native_in: Amount,
        min_token_out: Amount,
    ) -> Result<SwapReceipt, AmmError> {
        let q = self.price(native_in, self.reserve_native, self.reserve_token)?;
        self.check_minimum(min_token_out, q.amount_out)?;

        let reserve_native = self.reserve_native.safe_add(&native_in)?;
        let reserve_token = self.reserve_token.safe_sub(&q.amount_out)?;
        let fees = self.accumulated_fees_native.safe_add(&q.fee)?;
        let receipt = SwapReceipt::new(SwapDirection::NativeToToken, native_in, q.amount_out, q.fee)?;

        env.token_mut(&self.token)?
            .transfer(&self.address, recipient, q.amount_out)?;

        self.reserve_native = reserve_native;
        self.reserve_token = reserve_token;
        self.accumulated_fees_native = fees;

        tracing::info!(pool = %self.address, %recipient, %receipt, "swap executed");
        Ok(receipt)
    }

    /// Sells `token_in` for native currency, paying at least
    /// `min_native_out` to `caller`.
    ///
    /// The pool pulls `token_in` with `transfer_from`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MinimumNotMet`] if the output is below
    ///   `min_native_out`.
    /// - [`AmmError::ZeroReserve`] if the pool is empty.
    /// - Collaborator failures.
    pub fn swap_token_for_native<E: Environment>(
        &mut self,
        env: &mut E,
        caller: &Address,
        token_in: Amount,
        min_native_out: Amount,
    ) -> Result<SwapReceipt, AmmError> {
        let q = self.price(token_in, self.reserve_token, self.reserve_native)?;
        self.check_minimum(min_native_out, q.amount_out)?;

        let reserve_token = self.reserve_token.safe_add(&token_in)?;
        let reserve_native = self.reserve_native.safe_sub(&q.amount_out)?;
        let fees = self.accumulated_fees_token.safe_add(&q.fee)?;
        let receipt = SwapReceipt::new(SwapDirection::TokenToNative, token_in, q.amount_out, q.fee)?;

        let allowance = self.pull_tokens(env, caller, token_in)?;
        if let Err(err) = env
            .native_mut()
            .transfer(&self.address, caller, q.amount_out)
        {
            tracing::warn!(pool = %self.address, error = %err, "native payout failed, returning tokens");
            return_pull(env, &self.token, &self.address, caller, token_in, allowance);
            return Err(err);
        }

        self.reserve_token = reserve_token;
        self.reserve_native = reserve_native;
        self.accumulated_fees_token = fees;

        tracing::info!(pool = %self.address, recipient = %caller, %receipt, "swap executed");
        Ok(receipt)
    }

    /// Sells `token_in` of this pool's token for `destination`'s token.
    ///
    /// # Flow
    ///
    /// 1. Price `token_in` against this pool:
    ///    `native_leg = amount_out(token_in, reserve_token, reserve_native)`,
    ///    then price `native_leg` against `destination` and check
    ///    `min_other_out`. Nothing has moved yet if either fails.
    /// 2. Pull `token_in` from `caller` and move `native_leg` from this
    ///    pool's account straight to `destination`'s account.
    /// 3. `destination` runs its native→token leg, paying `caller` directly.
    /// 4. If a transfer in step 2 or 3 fails, the native leg goes back to
    ///    this pool, `token_in` goes back to `caller` and the caller's
    ///    allowance is reset to its prior value; this pool's reserves are
    ///    untouched.
    ///
    /// The receipt reports `token_in`, the destination token paid out, and
    /// the fee retained by this pool in its own token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `destination` trades the same token.
    /// - [`AmmError::MinimumNotMet`] if the final output is below
    ///   `min_other_out`.
    /// - [`AmmError::ZeroReserve`] if either pool is empty.
    /// - Collaborator failures.
    pub fn swap_token_to_token<E: Environment>(
        &mut self,
        destination: &mut Self,
        env: &mut E,
        caller: &Address,
        token_in: Amount,
        min_other_out: Amount,
    ) -> Result<SwapReceipt, AmmError> {
        if destination.token == self.token {
            return Err(AmmError::InvalidToken(
                "destination pool trades the source token",
            ));
        }

        let leg = self.price(token_in, self.reserve_token, self.reserve_native)?;
        let native_leg = leg.amount_out;
        let reserve_token = self.reserve_token.safe_add(&token_in)?;
        let reserve_native = self.reserve_native.safe_sub(&native_leg)?;
        let fees = self.accumulated_fees_token.safe_add(&leg.fee)?;

        // second leg priced up front so a slippage failure touches nothing
        let quoted = destination.price(
            native_leg,
            destination.reserve_native,
            destination.reserve_token,
        )?;
        destination.check_minimum(min_other_out, quoted.amount_out)?;

        let allowance = self.pull_tokens(env, caller, token_in)?;
        if let Err(err) = env
            .native_mut()
            .transfer(&self.address, &destination.address, native_leg)
        {
            tracing::warn!(pool = %self.address, error = %err, "native leg transfer failed, returning tokens");
            return_pull(env, &self.token, &self.address, caller, token_in, allowance);
            return Err(err);
        }
        tracing::debug!(
            source = %self.address,
            destination = %destination.address,
            %token_in,
            %native_leg,
            "first leg priced"
        );

        let filled = destination
            .fill_native_for_token(env, caller, native_leg, min_other_out)
            .and_then(|second| {
                SwapReceipt::new(
                    SwapDirection::TokenToToken,
                    token_in,
                    second.amount_out(),
                    leg.fee,
                )
            });
        let receipt = match filled {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(
                    source = %self.address,
                    destination = %destination.address,
                    error = %err,
                    "second leg failed, unwinding first leg"
                );
                move_native(env, &destination.address, &self.address, native_leg);
                return_pull(env, &self.token, &self.address, caller, token_in, allowance);
                return Err(err);
            }
        };

        self.reserve_token = reserve_token;
        self.reserve_native = reserve_native;
        self.accumulated_fees_token = fees;

        tracing::info!(
            source = %self.address,
            destination = %destination.address,
            recipient = %caller,
            %receipt,
            "token-to-token swap executed"
        );
        Ok(receipt)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn price(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<SwapQuote, AmmError> {
        if amount_in.is_zero() {
            return Ok(SwapQuote {
                amount_out: Amount::ZERO,
                fee: Amount::ZERO,
            });
        }
        quote(amount_in, reserve_in, reserve_out, self.fee_tier)
    }

    fn check_minimum(&self, minimum: Amount, actual: Amount) -> Result<(), AmmError> {
        if actual < minimum {
            tracing::warn!(pool = %self.address, %minimum, %actual, "swap output below minimum");
            return Err(AmmError::MinimumNotMet { minimum, actual });
        }
        Ok(())
    }

    /// Pulls `amount` from `owner` on behalf of the pool and returns the
    /// allowance the pull started from, for [`return_pull`].
    fn pull_tokens<E: Environment>(
        &self,
        env: &mut E,
        owner: &Address,
        amount: Amount,
    ) -> Result<Amount, AmmError> {
        let token = env.token_mut(&self.token)?;
        let allowance = token.allowance(owner, &self.address);
        token.transfer_from(&self.address, owner, &self.address, amount)?;
        Ok(allowance)
    }

    fn set_share_balance(&mut self, account: Address, balance: Shares) {
        if balance.is_zero() {
            self.share_balances.remove(&account);
        } else {
            self.share_balances.insert(account, balance);
        }
    }
}

/// Moves native back during an unwind. A failure here leaves the ledgers
/// out of step with the pool, so it is reported at error level.
fn move_native<E: Environment>(env: &mut E, from: &Address, to: &Address, amount: Amount) {
    if let Err(err) = env.native_mut().transfer(from, to, amount) {
        tracing::error!(%from, %to, %amount, error = %err, "native compensation failed");
    }
}

/// Undoes a [`ExchangePool::pull_tokens`]: sends `amount` back to `owner`
/// and resets the pool's allowance to what it was before the pull.
fn return_pull<E: Environment>(
    env: &mut E,
    token: &Address,
    pool: &Address,
    owner: &Address,
    amount: Amount,
    allowance: Amount,
) {
    let restored = env.token_mut(token).and_then(|t| {
        t.transfer(pool, owner, amount)?;
        t.approve(owner, pool, allowance)
    });
    if let Err(err) = restored {
        tracing::error!(%token, %pool, %owner, %amount, error = %err, "token compensation failed");
    }
}
