//! Two-pool exchange walk-through.
//!
//! Registers pools for two tokens, seeds them, trades against one of them,
//! and routes a token→token swap through the native currency of both.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=cereal_swap=debug cargo run --example two_hop
//! ```

use cereal_swap::prelude::{Address, Amount, ExchangePool, PoolRegistry, PoolSnapshot, RegistryConfig};
use cereal_swap::sandbox::InMemoryEnvironment;
use tracing_subscriber::EnvFilter;

const E18: u128 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== CerealSwap: native/token pools ===\n");

    // ── 1. Environment and participants ─────────────────────────────────
    let mut env = InMemoryEnvironment::new();
    let alice = Address::from_bytes([0xA1; 32]);
    let bob = Address::from_bytes([0xB0; 32]);
    let corn = env.deploy_token("CORN");
    let oats = env.deploy_token("OATS");

    env.fund(&alice, Amount::new(5_000 * E18))?;
    env.fund(&bob, Amount::new(100 * E18))?;
    env.mint(&corn, &alice, Amount::new(2_000 * E18))?;
    env.mint(&oats, &alice, Amount::new(1_000 * E18))?;
    env.mint(&corn, &bob, Amount::new(50 * E18))?;

    println!("CORN token: {corn}");
    println!("OATS token: {oats}");

    // ── 2. One pool per token ───────────────────────────────────────────
    let mut registry = PoolRegistry::new(RegistryConfig::default());
    let corn_pool = registry.create_pool(corn)?;
    let oats_pool = registry.create_pool(oats)?;
    println!("\nRegistered {corn_pool} (CORN) and {oats_pool} (OATS)");
    println!("  Fee tier:    {}", registry.config().fee_tier());

    // ── 3. Seed both pools ──────────────────────────────────────────────
    for (token, native, tokens) in [(corn, 1_000, 2_000), (oats, 1_000, 1_000)] {
        let pool = registry.pool_by_token_mut(&token)?;
        env.approve(&token, &alice, &pool.address(), Amount::new(tokens * E18))?;
        let receipt = pool.add_liquidity(
            &mut env,
            &alice,
            Amount::new(native * E18),
            Amount::new(tokens * E18),
        )?;
        println!("\n--- Seed {} ---", pool.address());
        println!("  Native in:   {}", receipt.native_in);
        println!("  Token in:    {}", receipt.token_in);
        println!("  Shares:      {}", receipt.shares_minted);
    }

    // ── 4. Quote, then swap native for CORN ─────────────────────────────
    let pool = registry.pool_by_token_mut(&corn)?;
    let native_in = Amount::new(10 * E18);
    let quoted = pool.quote_token_out(native_in)?;
    let receipt = pool.swap_native_for_token(&mut env, &bob, native_in, quoted)?;
    println!("\n--- Swap: {native_in} native for CORN ---");
    println!("  Quoted:      {quoted}");
    println!("  {receipt}");
    println!("  {}", pool.snapshot());

    // ── 5. Route CORN → OATS through both pools ─────────────────────────
    let corn_in = Amount::new(20 * E18);
    env.approve(&corn, &bob, &pool.address(), corn_in)?;
    let receipt =
        registry.swap_token_to_token(&mut env, &bob, &corn, corn_in, Amount::ZERO, &oats)?;
    println!("\n--- Two-hop: {corn_in} CORN for OATS ---");
    println!("  {receipt}");
    println!("  Bob's OATS:  {}", env.token_balance(&oats, &bob));

    // ── 6. A route with an impossible floor changes nothing ─────────────
    env.approve(&corn, &bob, &registry.pool_by_token(&corn)?.address(), corn_in)?;
    let before: Vec<PoolSnapshot> = registry.pools().map(ExchangePool::snapshot).collect();
    let failed = registry.swap_token_to_token(
        &mut env,
        &bob,
        &corn,
        corn_in,
        Amount::new(1_000 * E18),
        &oats,
    );
    let after: Vec<PoolSnapshot> = registry.pools().map(ExchangePool::snapshot).collect();
    println!("\n--- Two-hop with a 1000 OATS floor ---");
    if let Err(err) = failed {
        println!("  Rejected:    {err}");
    }
    println!("  Pools unchanged: {}", before == after);

    // ── 7. Withdraw everything ──────────────────────────────────────────
    let pool = registry.pool_by_token_mut(&corn)?;
    let shares = pool.share_balance(&alice);
    let withdrawal = pool.remove_liquidity(&mut env, &alice, shares)?;
    println!("\n--- Withdraw {shares} shares from CORN pool ---");
    println!("  Native out:  {}", withdrawal.native_out);
    println!("  Token out:   {}", withdrawal.token_out);
    println!(
        "  Fees kept:   {} native, {} CORN",
        pool.accumulated_fees_native(),
        pool.accumulated_fees_token()
    );
    println!("  {}", pool.snapshot());

    println!("\n=== Done ===");
    Ok(())
}
