//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Output bound**: `amount_out < reserve_out` for any input.
//! 2. **Product growth**: `reserve_native × reserve_token` strictly grows
//!    across every swap with non-zero input.
//! 3. **Swap reversibility**: native→token→native returns ≤ original.
//! 4. **Deposit proportionality**: later deposits keep the reserve ratio
//!    within one unit of rounding.
//! 5. **Liquidity round trip**: deposit then withdraw never returns more
//!    than was deposited.
//! 6. **Zero operations**: zero-amount calls succeed and change nothing.
//! 7. **Two-hop atomicity**: a failed token→token swap leaves both pools,
//!    all balances and the caller's allowance untouched.

use proptest::prelude::*;

use super::ExchangePool;
use crate::config::PoolConfig;
use crate::domain::{Address, Amount, FeeTier, Shares};
use crate::math::{amount_out, wide_mul};
use crate::sandbox::InMemoryEnvironment;
use crate::traits::{Environment, FromConfig, FungibleToken, NativeLedger};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const FUNDS: u128 = 1_000_000_000_000_000_000_000_000;

fn lp() -> Address {
    Address::from_bytes([0x11; 32])
}

fn trader() -> Address {
    Address::from_bytes([0x22; 32])
}

fn make_pool(env: &mut InMemoryEnvironment, index: u64) -> ExchangePool {
    let token = env.deploy_token("PRP");
    let Ok(cfg) = PoolConfig::new(Address::for_pool(index), token, FeeTier::ONE_PERCENT) else {
        panic!("valid config");
    };
    let Ok(pool) = ExchangePool::from_config(&cfg) else {
        panic!("valid pool");
    };
    for who in [lp(), trader()] {
        let Ok(()) = env.mint(&token, &who, Amount::new(FUNDS)) else {
            panic!("mint failed");
        };
        let Ok(()) = env.approve(&token, &who, &pool.address(), Amount::new(FUNDS)) else {
            panic!("approve failed");
        };
    }
    pool
}

fn seeded(native: u128, token: u128) -> (InMemoryEnvironment, ExchangePool) {
    let mut env = InMemoryEnvironment::new();
    for who in [lp(), trader()] {
        let Ok(()) = env.fund(&who, Amount::new(FUNDS)) else {
            panic!("fund failed");
        };
    }
    let mut pool = make_pool(&mut env, 0);
    let Ok(_) = pool.add_liquidity(&mut env, &lp(), Amount::new(native), Amount::new(token)) else {
        panic!("seed failed");
    };
    (env, pool)
}

fn product(pool: &ExchangePool) -> ethnum::U256 {
    wide_mul(pool.reserve_native().get(), pool.reserve_token().get())
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in [10_000, 10^24] covering raw and 18-decimal scales.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000_000_000_000u128
}

/// A swap as (native→token?, input as a fraction of the input reserve in
/// basis points).
fn swap_strategy() -> impl Strategy<Value = (bool, u128)> {
    (any::<bool>(), 1u128..=10_000u128)
}

// ---------------------------------------------------------------------------
// Property 1: Output bound
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_output_below_reserve(
        amount in 0u128..=u128::MAX / 2,
        reserve_in in 1u128..=u128::MAX / 2,
        reserve_out in 1u128..=u128::MAX,
    ) {
        let Ok(out) = amount_out(
            Amount::new(amount),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
            FeeTier::ONE_PERCENT,
        ) else {
            return Err(TestCaseError::fail("pricing failed"));
        };
        prop_assert!(out.get() < reserve_out);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Product growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_strictly_grows(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        swaps in proptest::collection::vec(swap_strategy(), 1..8),
    ) {
        let (mut env, mut pool) = seeded(rn, rt);
        for (native_in, bps) in swaps {
            let before = product(&pool);
            let reserve_in = if native_in { pool.reserve_native() } else { pool.reserve_token() };
            let amount = (reserve_in.get() / 10_000).saturating_mul(bps).max(1);
            let result = if native_in {
                pool.swap_native_for_token(&mut env, &trader(), Amount::new(amount), Amount::ZERO)
            } else {
                pool.swap_token_for_native(&mut env, &trader(), Amount::new(amount), Amount::ZERO)
            };
            prop_assert!(result.is_ok(), "swap failed: {:?}", result);
            prop_assert!(product(&pool) > before);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses_value(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        bps in 1u128..=5_000u128,
    ) {
        let (mut env, mut pool) = seeded(rn, rt);
        let swap_in = (rn / 10_000).saturating_mul(bps).max(1);

        let Ok(first) =
            pool.swap_native_for_token(&mut env, &trader(), Amount::new(swap_in), Amount::ZERO)
        else {
            return Err(TestCaseError::fail("first leg failed"));
        };
        let Ok(second) =
            pool.swap_token_for_native(&mut env, &trader(), first.amount_out(), Amount::ZERO)
        else {
            return Err(TestCaseError::fail("second leg failed"));
        };
        prop_assert!(
            second.amount_out().get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            second.amount_out(), swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 4 & 5: Deposits
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_keeps_ratio(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        bps in 1u128..=20_000u128,
    ) {
        let (mut env, mut pool) = seeded(rn, rt);
        let native = (rn / 10_000).saturating_mul(bps).max(1);
        let Ok(receipt) = pool.add_liquidity(
            &mut env,
            &trader(),
            Amount::new(native),
            Amount::new(FUNDS),
        ) else {
            return Err(TestCaseError::fail("deposit failed"));
        };
        // required = floor(rt * native / rn)
        let pulled = wide_mul(receipt.token_in.get(), rn);
        let exact = wide_mul(rt, native);
        prop_assert!(pulled <= exact);
        prop_assert!(exact < pulled + ethnum::U256::from(rn));
    }

    #[test]
    fn prop_deposit_withdraw_never_profits(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        bps in 1u128..=20_000u128,
    ) {
        let (mut env, mut pool) = seeded(rn, rt);
        let native = (rn / 10_000).saturating_mul(bps).max(1);
        let Ok(deposit) = pool.add_liquidity(
            &mut env,
            &trader(),
            Amount::new(native),
            Amount::new(FUNDS),
        ) else {
            return Err(TestCaseError::fail("deposit failed"));
        };
        let Ok(withdrawal) =
            pool.remove_liquidity(&mut env, &trader(), deposit.shares_minted)
        else {
            return Err(TestCaseError::fail("withdraw failed"));
        };
        prop_assert!(withdrawal.native_out <= deposit.native_in);
        prop_assert!(withdrawal.token_out <= deposit.token_in);
        prop_assert!(pool.share_balance(&trader()).is_zero());
    }

    #[test]
    fn prop_full_withdrawal_empties(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
    ) {
        let (mut env, mut pool) = seeded(rn, rt);
        let Ok(_) = pool.remove_liquidity(&mut env, &lp(), Shares::new(rn)) else {
            return Err(TestCaseError::fail("withdraw failed"));
        };
        prop_assert!(pool.is_empty());
        prop_assert!(pool.reserve_native().is_zero());
        prop_assert!(pool.reserve_token().is_zero());
        prop_assert!(env.native().balance_of(&pool.address()).is_zero());
    }
}

// ---------------------------------------------------------------------------
// Property 6: Zero operations
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_zero_operations_are_noops(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
    ) {
        let (mut env, mut pool) = seeded(rn, rt);
        let before = pool.clone();
        prop_assert!(pool.swap_native_for_token(&mut env, &trader(), Amount::ZERO, Amount::ZERO).is_ok());
        prop_assert!(pool.swap_token_for_native(&mut env, &trader(), Amount::ZERO, Amount::ZERO).is_ok());
        prop_assert!(pool.add_liquidity(&mut env, &trader(), Amount::ZERO, Amount::ZERO).is_ok());
        prop_assert!(pool.remove_liquidity(&mut env, &trader(), Shares::ZERO).is_ok());
        prop_assert_eq!(pool, before);
    }
}

// ---------------------------------------------------------------------------
// Property 7: Two-hop atomicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_failed_two_hop_is_atomic(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        other in reserve_strategy(),
        bps in 1u128..=5_000u128,
    ) {
        let (mut env, mut source) = seeded(rn, rt);
        let mut destination = make_pool(&mut env, 1);
        let Ok(_) = destination.add_liquidity(
            &mut env,
            &lp(),
            Amount::new(other),
            Amount::new(other),
        ) else {
            return Err(TestCaseError::fail("seed failed"));
        };
        let token_in = Amount::new((rt / 10_000).saturating_mul(bps).max(1));
        let (src_before, dst_before) = (source.clone(), destination.clone());
        let trader_tokens = env.token_balance(&source.token(), &trader());

        // no output can reach the whole destination reserve
        let result = source.swap_token_to_token(
            &mut destination,
            &mut env,
            &trader(),
            token_in,
            Amount::new(other),
        );
        prop_assert!(result.is_err());
        prop_assert_eq!(&source, &src_before);
        prop_assert_eq!(&destination, &dst_before);
        prop_assert_eq!(env.token_balance(&src_before.token(), &trader()), trader_tokens);
        prop_assert_eq!(env.native().balance_of(&src_before.address()), Amount::new(rn));
        prop_assert_eq!(env.native().balance_of(&dst_before.address()), Amount::new(other));
        let Ok(contract) = env.token(&src_before.token()) else {
            return Err(TestCaseError::fail("token missing"));
        };
        prop_assert_eq!(contract.allowance(&trader(), &src_before.address()), Amount::new(FUNDS));
    }
}
