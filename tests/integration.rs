//! Integration tests exercising the full system through the public API.
//!
//! Amounts use 18 decimals (`W` = one whole unit) so the expected values
//! match what an on-chain deployment of the same pool reports.

#![allow(clippy::panic)]

use cereal_swap::config::RegistryConfig;
use cereal_swap::domain::{Address, Amount, Shares, SwapDirection};
use cereal_swap::error::AmmError;
use cereal_swap::factory::PoolRegistry;
use cereal_swap::pools::ExchangePool;
use cereal_swap::sandbox::InMemoryEnvironment;
use cereal_swap::traits::{Environment, FungibleToken, NativeLedger};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const W: u128 = 1_000_000_000_000_000_000;

fn w(units: u128) -> Amount {
    Amount::new(units * W)
}

fn owner() -> Address {
    Address::from_bytes([0x0A; 32])
}

fn user() -> Address {
    Address::from_bytes([0x0B; 32])
}

struct Market {
    env: InMemoryEnvironment,
    registry: PoolRegistry,
    token: Address,
}

impl Market {
    /// One token, one pool; owner holds 100 000 tokens, both parties hold
    /// 10 000 native.
    fn new() -> Self {
        let mut env = InMemoryEnvironment::new();
        let mut registry = PoolRegistry::new(RegistryConfig::default());
        let token = env.deploy_token("TOKE");
        let Ok(_) = registry.create_pool(token) else {
            panic!("pool created");
        };
        for who in [owner(), user()] {
            let Ok(()) = env.fund(&who, w(10_000)) else {
                panic!("funded");
            };
        }
        let Ok(()) = env.mint(&token, &owner(), w(100_000)) else {
            panic!("minted");
        };
        Self {
            env,
            registry,
            token,
        }
    }

    fn pool(&self) -> &ExchangePool {
        let Ok(pool) = self.registry.pool_by_token(&self.token) else {
            panic!("pool exists");
        };
        pool
    }

    fn pool_address(&self) -> Address {
        self.pool().address()
    }

    fn approve(&mut self, who: &Address, amount: Amount) {
        let spender = self.pool_address();
        let Ok(()) = self.env.approve(&self.token, who, &spender, amount) else {
            panic!("approved");
        };
    }

    fn give_tokens(&mut self, to: &Address, amount: Amount) {
        let Ok(()) = self.env.mint(&self.token, to, amount) else {
            panic!("minted");
        };
    }

    fn add_liquidity(
        &mut self,
        who: &Address,
        native: Amount,
        token_max: Amount,
    ) -> Result<cereal_swap::domain::DepositReceipt, AmmError> {
        let Ok(pool) = self.registry.pool_by_token_mut(&self.token) else {
            panic!("pool exists");
        };
        pool.add_liquidity(&mut self.env, who, native, token_max)
    }

    fn seed(&mut self, native: Amount, token: Amount) {
        self.approve(&owner(), token);
        let Ok(_) = self.add_liquidity(&owner(), native, token) else {
            panic!("seeded");
        };
    }

    fn pool_mut(&mut self) -> (&mut ExchangePool, &mut InMemoryEnvironment) {
        let Ok(pool) = self.registry.pool_by_token_mut(&self.token) else {
            panic!("pool exists");
        };
        (pool, &mut self.env)
    }

    fn native_of(&self, who: &Address) -> Amount {
        self.env.native().balance_of(who)
    }

    fn tokens_of(&self, who: &Address) -> Amount {
        self.env.token_balance(&self.token, who)
    }
}

// ---------------------------------------------------------------------------
// Adding liquidity
// ---------------------------------------------------------------------------

#[test]
fn first_deposit_sets_reserves_and_shares() {
    let mut m = Market::new();
    m.seed(w(100), w(200));

    let pool = m.pool();
    assert_eq!(pool.reserve_native(), w(100));
    assert_eq!(pool.reserve_token(), w(200));
    assert_eq!(pool.share_balance(&owner()), Shares::new(100 * W));
    assert_eq!(pool.share_supply(), Shares::new(100 * W));
    assert_eq!(m.native_of(&m.pool_address()), w(100));
    assert_eq!(m.tokens_of(&m.pool_address()), w(200));
}

#[test]
fn zero_first_deposit_allowed() {
    let mut m = Market::new();
    m.approve(&owner(), Amount::ZERO);
    let Ok(receipt) = m.add_liquidity(&owner(), Amount::ZERO, Amount::ZERO) else {
        panic!("expected Ok");
    };
    assert!(receipt.shares_minted.is_zero());
    assert!(m.native_of(&m.pool_address()).is_zero());
    assert!(m.pool().reserve_token().is_zero());
}

#[test]
fn later_deposit_preserves_rate() {
    let mut m = Market::new();
    m.approve(&owner(), w(300));
    let Ok(_) = m.add_liquidity(&owner(), w(100), w(200)) else {
        panic!("seeded");
    };
    let Ok(receipt) = m.add_liquidity(&owner(), w(50), w(200)) else {
        panic!("expected Ok");
    };
    assert_eq!(receipt.token_in, w(100));
    assert_eq!(m.native_of(&m.pool_address()), w(150));
    assert_eq!(m.pool().reserve_token(), w(300));
    assert_eq!(m.pool().share_balance(&owner()), Shares::new(150 * W));
    assert_eq!(m.pool().share_supply(), Shares::new(150 * W));
}

#[test]
fn deposit_below_required_fails() {
    let mut m = Market::new();
    m.approve(&owner(), w(300));
    let Ok(_) = m.add_liquidity(&owner(), w(100), w(200)) else {
        panic!("seeded");
    };
    let native_before = m.native_of(&owner());
    let Err(AmmError::InsufficientAmount { required, offered }) =
        m.add_liquidity(&owner(), w(50), w(50))
    else {
        panic!("expected InsufficientAmount");
    };
    assert_eq!(required, w(100));
    assert_eq!(offered, w(50));
    assert_eq!(m.native_of(&owner()), native_before);
    assert_eq!(m.pool().reserve_native(), w(100));
}

// ---------------------------------------------------------------------------
// Removing liquidity
// ---------------------------------------------------------------------------

#[test]
fn removes_some_liquidity() {
    let mut m = Market::new();
    m.seed(w(100), w(200));
    let tokens_before = m.tokens_of(&owner());
    let native_before = m.native_of(&owner());

    let (pool, env) = m.pool_mut();
    let Ok(receipt) = pool.remove_liquidity(env, &owner(), Shares::new(25 * W)) else {
        panic!("expected Ok");
    };
    assert_eq!(receipt.native_out, w(25));
    assert_eq!(receipt.token_out, w(50));

    assert_eq!(m.pool().reserve_token(), w(150));
    assert_eq!(m.native_of(&m.pool_address()), w(75));
    assert_eq!(m.pool().share_supply(), Shares::new(75 * W));
    assert_eq!(m.tokens_of(&owner()), Amount::new(tokens_before.get() + 50 * W));
    assert_eq!(m.native_of(&owner()), Amount::new(native_before.get() + 25 * W));
}

#[test]
fn removes_all_liquidity() {
    let mut m = Market::new();
    m.seed(w(100), w(200));
    let tokens_before = m.tokens_of(&owner());

    let (pool, env) = m.pool_mut();
    let Ok(_) = pool.remove_liquidity(env, &owner(), Shares::new(100 * W)) else {
        panic!("expected Ok");
    };
    assert!(m.pool().reserve_token().is_zero());
    assert!(m.native_of(&m.pool_address()).is_zero());
    assert!(m.pool().is_empty());
    assert_eq!(m.tokens_of(&owner()), Amount::new(tokens_before.get() + 200 * W));

    // a drained pool accepts a new seed at any ratio
    m.seed(w(3), w(1));
    assert_eq!(m.pool().reserve_native(), w(3));
    assert_eq!(m.pool().reserve_token(), w(1));
}

#[test]
fn liquidity_providers_earn_fees() {
    let mut m = Market::new();
    m.seed(w(100), w(200));
    let tokens_before = m.tokens_of(&owner());
    let native_before = m.native_of(&owner());

    let (pool, env) = m.pool_mut();
    let Ok(_) = pool.swap_native_for_token(env, &user(), w(10), w(18)) else {
        panic!("swap ok");
    };
    let Ok(_) = pool.remove_liquidity(env, &owner(), Shares::new(100 * W)) else {
        panic!("withdraw ok");
    };

    assert!(m.pool().reserve_token().is_zero());
    assert!(m.native_of(&m.pool_address()).is_zero());
    assert_eq!(m.tokens_of(&user()), Amount::new(18_016_378_525_932_666_060));
    assert_eq!(
        m.tokens_of(&owner()),
        Amount::new(tokens_before.get() + 181_983_621_474_067_333_940)
    );
    assert_eq!(m.native_of(&owner()), Amount::new(native_before.get() + 110 * W));
}

#[test]
fn withdrawal_beyond_balance_fails() {
    let mut m = Market::new();
    m.seed(w(100), w(200));
    let (pool, env) = m.pool_mut();
    let Err(AmmError::InsufficientShares { requested, held }) =
        pool.remove_liquidity(env, &owner(), Shares::new(101 * W))
    else {
        panic!("expected InsufficientShares");
    };
    assert_eq!(requested, Shares::new(101 * W));
    assert_eq!(held, Shares::new(100 * W));
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[test]
fn token_out_quotes() {
    let mut m = Market::new();
    m.seed(w(1_000), w(2_000));
    let pool = m.pool();
    assert_eq!(
        pool.quote_token_out(w(1)),
        Ok(Amount::new(1_978_041_738_678_708_079))
    );
    assert_eq!(
        pool.quote_token_out(w(100)),
        Ok(Amount::new(180_163_785_259_326_660_600))
    );
    assert_eq!(
        pool.quote_token_out(w(1_000)),
        Ok(Amount::new(994_974_874_371_859_296_482))
    );
}

#[test]
fn native_out_quotes() {
    let mut m = Market::new();
    m.seed(w(1_000), w(2_000));
    let pool = m.pool();
    assert_eq!(
        pool.quote_native_out(w(2)),
        Ok(Amount::new(989_020_869_339_354_039))
    );
    assert_eq!(
        pool.quote_native_out(w(100)),
        Ok(Amount::new(47_165_316_817_532_158_170))
    );
    assert_eq!(
        pool.quote_native_out(w(2_000)),
        Ok(Amount::new(497_487_437_185_929_648_241))
    );
}

#[test]
fn required_token_quote_sizes_approval() {
    let mut m = Market::new();
    m.seed(w(100), w(200));
    let Ok(required) = m.pool().quote_required_token(w(50)) else {
        panic!("expected Ok");
    };
    m.give_tokens(&user(), required);
    m.approve(&user(), required);
    let Ok(receipt) = m.add_liquidity(&user(), w(50), required) else {
        panic!("expected Ok");
    };
    assert_eq!(receipt.token_in, required);
    assert!(m.tokens_of(&user()).is_zero());
}

// ---------------------------------------------------------------------------
// Native → token swaps
// ---------------------------------------------------------------------------

#[test]
fn native_swap_pays_at_least_minimum() {
    let mut m = Market::new();
    m.seed(w(1_000), w(2_000));
    let native_before = m.native_of(&user());

    let (pool, env) = m.pool_mut();
    let Ok(receipt) = pool.swap_native_for_token(
        env,
        &user(),
        w(1),
        Amount::new(1_970_000_000_000_000_000),
    ) else {
        panic!("expected Ok");
    };
    assert_eq!(receipt.direction(), SwapDirection::NativeToToken);

    assert_eq!(m.native_of(&user()), Amount::new(native_before.get() - W));
    assert_eq!(m.tokens_of(&user()), Amount::new(1_978_041_738_678_708_079));
    assert_eq!(m.native_of(&m.pool_address()), w(1_001));
    assert_eq!(
        m.tokens_of(&m.pool_address()),
        Amount::new(1_998_021_958_261_321_291_921)
    );
}

#[test]
fn native_swap_moves_rate() {
    let mut m = Market::new();
    m.seed(w(1_000), w(2_000));
    assert_eq!(
        m.pool().quote_token_out(w(10)),
        Ok(Amount::new(19_605_901_574_413_308_248))
    );

    let (pool, env) = m.pool_mut();
    let Ok(_) = pool.swap_native_for_token(env, &user(), w(10), w(9)) else {
        panic!("expected Ok");
    };
    assert_eq!(
        m.pool().quote_token_out(w(10)),
        Ok(Amount::new(19_223_356_774_598_792_281))
    );
}

#[test]
fn native_swap_below_minimum_fails() {
    let mut m = Market::new();
    m.seed(w(1_000), w(2_000));
    let native_before = m.native_of(&user());
    let (pool, env) = m.pool_mut();
    let Err(AmmError::MinimumNotMet { .. }) = pool.swap_native_for_token(env, &user(), w(1), w(2))
    else {
        panic!("expected MinimumNotMet");
    };
    assert_eq!(m.native_of(&user()), native_before);
    assert_eq!(m.native_of(&m.pool_address()), w(1_000));
}

#[test]
fn zero_native_swap_is_noop() {
    let mut m = Market::new();
    m.seed(w(1_000), w(2_000));
    let (pool, env) = m.pool_mut();
    let Ok(_) = pool.swap_native_for_token(env, &user(), Amount::ZERO, Amount::ZERO) else {
        panic!("expected Ok");
    };
    assert!(m.tokens_of(&user()).is_zero());
    assert_eq!(m.native_of(&m.pool_address()), w(1_000));
    assert_eq!(m.tokens_of(&m.pool_address()), w(2_000));
}

// ---------------------------------------------------------------------------
// Token → native swaps
// ---------------------------------------------------------------------------

fn market_with_trader_tokens() -> Market {
    let mut m = Market::new();
    m.seed(w(1_000), w(2_000));
    m.give_tokens(&user(), w(22));
    m.approve(&user(), w(22));
    m
}

#[test]
fn token_swap_pays_native() {
    let mut m = market_with_trader_tokens();
    let native_before = m.native_of(&user());
    let (pool, env) = m.pool_mut();
    let Ok(receipt) =
        pool.swap_token_for_native(env, &user(), w(2), Amount::new(900_000_000_000_000_000))
    else {
        panic!("expected Ok");
    };
    assert_eq!(receipt.amount_out(), Amount::new(989_020_869_339_354_039));
    assert_eq!(
        m.native_of(&user()),
        Amount::new(native_before.get() + 989_020_869_339_354_039)
    );
    assert_eq!(m.tokens_of(&user()), w(20));
    assert_eq!(m.tokens_of(&m.pool_address()), w(2_002));
}

#[test]
fn token_swap_moves_rate() {
    let mut m = market_with_trader_tokens();
    assert_eq!(
        m.pool().quote_native_out(w(20)),
        Ok(Amount::new(9_802_950_787_206_654_124))
    );
    let (pool, env) = m.pool_mut();
    let Ok(_) = pool.swap_token_for_native(env, &user(), w(20), w(9)) else {
        panic!("expected Ok");
    };
    assert_eq!(
        m.pool().quote_native_out(w(20)),
        Ok(Amount::new(9_611_678_387_299_396_140))
    );
}

#[test]
fn token_swap_below_minimum_fails() {
    let mut m = market_with_trader_tokens();
    let (pool, env) = m.pool_mut();
    let Err(AmmError::MinimumNotMet { minimum, actual }) =
        pool.swap_token_for_native(env, &user(), w(2), w(1))
    else {
        panic!("expected MinimumNotMet");
    };
    assert_eq!(minimum, w(1));
    assert_eq!(actual, Amount::new(989_020_869_339_354_039));
    assert_eq!(m.tokens_of(&user()), w(22));
}

#[test]
fn zero_token_swap_is_noop() {
    let mut m = market_with_trader_tokens();
    let native_before = m.native_of(&user());
    let (pool, env) = m.pool_mut();
    let Ok(_) = pool.swap_token_for_native(env, &user(), Amount::ZERO, Amount::ZERO) else {
        panic!("expected Ok");
    };
    assert_eq!(m.native_of(&user()), native_before);
    assert_eq!(m.tokens_of(&user()), w(22));
    assert_eq!(m.native_of(&m.pool_address()), w(1_000));
    assert_eq!(m.tokens_of(&m.pool_address()), w(2_000));
}

// ---------------------------------------------------------------------------
// Token → token swaps
// ---------------------------------------------------------------------------

#[test]
fn swaps_token_for_token() {
    let mut env = InMemoryEnvironment::new();
    let mut registry = PoolRegistry::default();
    let token_a = env.deploy_token("AAA");
    let token_b = env.deploy_token("BBBB");
    let (Ok(id_a), Ok(id_b)) = (registry.create_pool(token_a), registry.create_pool(token_b))
    else {
        panic!("pools created");
    };
    let (Some(addr_a), Some(addr_b)) = (
        registry.pool(id_a).map(ExchangePool::address),
        registry.pool(id_b).map(ExchangePool::address),
    ) else {
        panic!("pools exist");
    };

    for who in [owner(), user()] {
        let Ok(()) = env.fund(&who, w(10_000)) else {
            panic!("funded");
        };
    }
    let (Ok(()), Ok(())) = (
        env.mint(&token_a, &owner(), w(2_010)),
        env.mint(&token_b, &user(), w(1_010)),
    ) else {
        panic!("minted");
    };
    let (Ok(()), Ok(())) = (
        env.approve(&token_a, &owner(), &addr_a, w(2_010)),
        env.approve(&token_b, &user(), &addr_b, w(1_010)),
    ) else {
        panic!("approved");
    };

    let Ok(_) = registry
        .pool_by_token_mut(&token_a)
        .and_then(|p| p.add_liquidity(&mut env, &owner(), w(1_000), w(2_000)))
    else {
        panic!("pool A seeded");
    };
    let Ok(_) = registry
        .pool_by_token_mut(&token_b)
        .and_then(|p| p.add_liquidity(&mut env, &user(), w(1_000), w(1_000)))
    else {
        panic!("pool B seeded");
    };
    assert!(env.token_balance(&token_b, &owner()).is_zero());

    let owner_native = env.native().balance_of(&owner());
    let Ok(receipt) = registry.swap_token_to_token(
        &mut env,
        &owner(),
        &token_a,
        w(10),
        Amount::new(4_800_000_000_000_000_000),
        &token_b,
    ) else {
        panic!("first two-hop swap");
    };
    assert_eq!(receipt.direction(), SwapDirection::TokenToToken);
    assert_eq!(
        env.token_balance(&token_b, &owner()),
        Amount::new(4_852_698_493_489_877_956)
    );
    assert!(env.token_balance(&token_a, &user()).is_zero());
    // the native hop never touches the caller
    assert_eq!(env.native().balance_of(&owner()), owner_native);
    assert_eq!(
        env.native().balance_of(&addr_a),
        Amount::new(1_000 * W - 4_925_618_189_959_699_487)
    );

    let Ok(_) = registry.swap_token_to_token(
        &mut env,
        &user(),
        &token_b,
        w(10),
        Amount::new(19_600_000_000_000_000_000),
        &token_a,
    ) else {
        panic!("second two-hop swap");
    };
    assert_eq!(
        env.token_balance(&token_a, &user()),
        Amount::new(19_602_080_509_528_011_079)
    );

    // ledgers and reserves agree after both routes
    for id in [id_a, id_b] {
        let Some(pool) = registry.pool(id) else {
            panic!("pool exists");
        };
        assert_eq!(env.native().balance_of(&pool.address()), pool.reserve_native());
        assert_eq!(
            env.token_balance(&pool.token(), &pool.address()),
            pool.reserve_token()
        );
    }
}

#[test]
fn two_hop_to_unknown_token_fails() {
    let mut m = Market::new();
    m.seed(w(1_000), w(2_000));
    let stray = Address::from_bytes([0x5A; 32]);
    let token = m.token;
    assert_eq!(
        m.registry
            .swap_token_to_token(&mut m.env, &owner(), &token, w(10), Amount::ZERO, &stray),
        Err(AmmError::PoolNotFound(stray))
    );
    assert_eq!(m.pool().reserve_token(), w(2_000));
}

#[test]
fn two_hop_minimum_failure_restores_everything() {
    let mut env = InMemoryEnvironment::new();
    let mut registry = PoolRegistry::default();
    let token_a = env.deploy_token("AAA");
    let token_b = env.deploy_token("BBB");
    for token in [token_a, token_b] {
        let Ok(_) = registry.create_pool(token) else {
            panic!("pool created");
        };
        let Ok(pool) = registry.pool_by_token_mut(&token) else {
            panic!("pool exists");
        };
        let spender = pool.address();
        let (Ok(()), Ok(()), Ok(())) = (
            env.fund(&owner(), w(1_000)),
            env.mint(&token, &owner(), w(1_010)),
            env.approve(&token, &owner(), &spender, w(1_010)),
        ) else {
            panic!("prepared");
        };
        let Ok(_) = pool.add_liquidity(&mut env, &owner(), w(1_000), w(1_000)) else {
            panic!("seeded");
        };
    }
    let snapshots: Vec<_> = registry.pools().map(ExchangePool::snapshot).collect();

    let Err(AmmError::MinimumNotMet { .. }) = registry.swap_token_to_token(
        &mut env,
        &owner(),
        &token_a,
        w(10),
        w(10),
        &token_b,
    ) else {
        panic!("expected MinimumNotMet");
    };

    let after: Vec<_> = registry.pools().map(ExchangePool::snapshot).collect();
    assert_eq!(snapshots, after);
    assert_eq!(env.token_balance(&token_a, &owner()), w(10));
    assert!(env.token_balance(&token_b, &owner()).is_zero());
    for pool in registry.pools() {
        assert_eq!(env.native().balance_of(&pool.address()), w(1_000));
    }

    // the allowance left after seeding survives the failed route
    let Ok(pool_a) = registry.pool_by_token(&token_a).map(ExchangePool::address) else {
        panic!("pool exists");
    };
    let Ok(contract) = env.token(&token_a) else {
        panic!("token deployed");
    };
    assert_eq!(contract.allowance(&owner(), &pool_a), w(10));

    let Ok(_) = registry.swap_token_to_token(
        &mut env,
        &owner(),
        &token_a,
        w(10),
        Amount::ZERO,
        &token_b,
    ) else {
        panic!("retry with the same allowance");
    };
    assert!(env.token_balance(&token_a, &owner()).is_zero());
}
