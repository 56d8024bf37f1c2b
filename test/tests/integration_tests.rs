//! # NTP Contract Integration Tests
//!
//! Cross-contract scenarios over the token / vault / farm stack plus
//! property-based tests over the pure arithmetic both contracts rely on.

extern crate std;

use proptest::prelude::*;

use farm::{accrued_yield, APR, SECONDS_PER_YEAR};
use vault::withdrawal::split_per_admin;

use test_framework::generators::*;
use test_framework::{FarmHarness, TestEnv, VaultHarness};

// ═════════════════════════════════════════════════════════════════════════════
//  Property-Based Tests — yield accrual
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// **Property**: a zero or negative stake never accrues anything.
    #[test]
    fn prop_no_stake_no_yield(elapsed in elapsed_strategy()) {
        prop_assert_eq!(accrued_yield(0, elapsed), 0);
        prop_assert_eq!(accrued_yield(-1, elapsed), 0);
    }

    /// **Property**: accrual is monotone in elapsed time.
    #[test]
    fn prop_yield_monotone_in_time(
        stake in stake_strategy(),
        elapsed in elapsed_strategy(),
        extra in 0u64..=SECONDS_PER_YEAR,
    ) {
        prop_assert!(accrued_yield(stake, elapsed + extra) >= accrued_yield(stake, elapsed));
    }

    /// **Property**: a full year accrues exactly `stake * APR / 100`.
    #[test]
    fn prop_full_year_is_exact(stake in stake_strategy()) {
        prop_assert_eq!(
            accrued_yield(stake, SECONDS_PER_YEAR),
            stake * APR as i128 / 100
        );
    }

    /// **Property**: accrual never exceeds the linear ceiling.
    #[test]
    fn prop_yield_bounded_by_linear_ceiling(
        stake in stake_strategy(),
        elapsed in elapsed_strategy(),
    ) {
        let ceiling = stake * APR as i128 * elapsed as i128 / (100 * SECONDS_PER_YEAR as i128);
        prop_assert!(accrued_yield(stake, elapsed) <= ceiling);
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Property-Based Tests — withdrawal split
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// **Property**: the per-admin split never over-commits the request.
    #[test]
    fn prop_split_never_exceeds_request(
        amount in positive_amount_strategy(),
        admins in admin_count_strategy(),
    ) {
        let share = split_per_admin(amount, admins);
        prop_assert!(share * admins as i128 <= amount);
    }

    /// **Property**: the forfeited remainder is smaller than one share unit.
    #[test]
    fn prop_split_remainder_is_bounded(
        amount in positive_amount_strategy(),
        admins in admin_count_strategy(),
    ) {
        let share = split_per_admin(amount, admins);
        let remainder = amount - share * admins as i128;
        prop_assert!(remainder >= 0 && remainder < admins as i128);
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Property-Based Tests — contract surfaces
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// **Property**: staking `amount` increases `total_stake` by exactly `amount`.
    #[test]
    fn prop_stake_increases_total(amount in 1i128..=1_000_000i128) {
        let mut env = TestEnv::new();
        let h = FarmHarness::new(&mut env, 10_000_000);
        let staker = h.create_staker(&mut env, amount);

        let before = h.farm.get_total_stake();
        h.farm.stake(&staker, &amount);
        prop_assert_eq!(h.farm.get_total_stake(), before + amount);
    }

    /// **Property**: staking then fully unstaking restores `total_stake`.
    #[test]
    fn prop_stake_unstake_identity(amount in 1i128..=1_000_000i128) {
        let mut env = TestEnv::new();
        let h = FarmHarness::new(&mut env, 10_000_000);
        let staker = h.create_staker(&mut env, amount);

        h.farm.stake(&staker, &amount);
        h.farm.unstake(&staker, &amount);

        prop_assert_eq!(h.farm.get_total_stake(), 0);
        prop_assert_eq!(h.ledger.balance_of(&staker), amount);
    }

    /// **Property**: invalid stake amounts are always rejected.
    #[test]
    fn prop_invalid_stake_amounts_rejected(amount in invalid_amount_strategy()) {
        let mut env = TestEnv::new();
        let h = FarmHarness::new(&mut env, 10_000_000);
        let staker = h.create_staker(&mut env, 1_000_000);

        prop_assert!(h.farm.try_stake(&staker, &amount).is_err());
    }

    /// **Property**: every `sell > buy > 0` pair is accepted by the vault.
    #[test]
    fn prop_valid_price_pairs_accepted((sell, buy) in price_pair_strategy()) {
        let mut env = TestEnv::new();
        let h = VaultHarness::new(&mut env, 1_000);

        h.vault.set_sell_price(&h.deployer, &sell);
        h.vault.set_buy_price(&h.deployer, &buy);

        prop_assert_eq!(h.vault.get_sell_price(), sell);
        prop_assert_eq!(h.vault.get_buy_price(), buy);
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Integration Scenarios
// ═════════════════════════════════════════════════════════════════════════════

/// A trader buys tokens from the vault, farms them for a year, withdraws the
/// minted yield and sells the whole position back to the vault.
#[test]
fn full_token_economy_round_trip() {
    let mut env = TestEnv::new();
    let h = VaultHarness::new(&mut env, 1_000_000);

    // Farm over the same ledger; the farm becomes the ledger's controller.
    let farm = FarmHarness::with_ledger(&env, &h.ledger);
    h.ledger.set_controller(&h.token_owner, &farm.address);

    h.make_exchange_ready(1_000, 2, 1);
    h.stock_tokens(500);
    h.fund(&env, 1_000);

    // Sell direction: 200 native at price 2 buys 100 tokens.
    let trader = h.create_trader(&mut env, 200, 0);
    let received = h.vault.receive_native(&trader, &200);
    assert_eq!(received, 100);
    assert_eq!(h.ledger.balance_of(&trader), 100);

    // Farm the position for a year: 20% APR on 100 mints 20.
    h.ledger.approve(&trader, &farm.address, &100);
    farm.stake(&trader, &100);
    env.advance_time(SECONDS_PER_YEAR);
    assert_eq!(farm.withdraw_yield(&trader), 20);
    farm.unstake(&trader, &100);
    assert_eq!(h.ledger.balance_of(&trader), 120);

    // Buy direction: sell all 120 tokens back at price 1.
    h.ledger.approve(&trader, &h.vault.address, &120);
    h.vault.exchange_native(&trader, &120);

    let native = soroban_sdk::token::Client::new(&env.env, &h.native_asset);
    assert_eq!(h.ledger.balance_of(&trader), 0);
    assert_eq!(native.balance(&trader), 120);
    assert_eq!(h.ledger.balance_of(&h.vault.address), 520);
    // 1_000 funded + 200 sold in − 120 bought out.
    assert_eq!(h.vault.get_native_balance(), 1_080);
}

/// The full multi-admin governance flow: add admins, request, approve and
/// withdraw, with the snapshot accounting consistent throughout.
#[test]
fn governance_withdrawal_flow() {
    let mut env = TestEnv::new();
    let h = VaultHarness::new(&mut env, 1_000);
    h.fund(&env, 1_000);

    let second = env.generate_address();
    let third = env.generate_address();
    h.vault.add_admin(&h.deployer, &second);
    h.vault.add_admin(&h.deployer, &third);

    let admins = [h.deployer.clone(), second.clone(), third.clone()];
    let before = h.snapshot(&admins);
    assert_eq!(before.admin_count, 3);
    assert_eq!(before.max_withdraw, 0);

    // 90 across 3 admins is 30 each.
    h.vault.request_withdraw(&h.deployer, &90);
    h.vault.approve_withdraw(&second);

    for admin in &admins {
        assert_eq!(h.vault.withdraw(admin), 30);
    }

    let after = h.snapshot(&admins);
    assert_eq!(after.native_balance, before.native_balance - 90);
    assert_eq!(after.max_withdraw, 30);
    for (_, withdrawn) in &after.withdrawn_by {
        assert_eq!(*withdrawn, 30);
    }
    assert_eq!(h.vault.get_withdrawn_amount(&h.deployer), 90);
}

/// Yield minted by the farm inflates the ledger supply; tokens returned to
/// the vault by the buy path do not.
#[test]
fn supply_only_grows_through_yield() {
    let mut env = TestEnv::new();
    let h = VaultHarness::new(&mut env, 1_000_000);
    let farm = FarmHarness::with_ledger(&env, &h.ledger);
    h.ledger.set_controller(&h.token_owner, &farm.address);

    h.make_exchange_ready(1_000, 2, 1);
    h.fund(&env, 1_000);

    let supply_at_genesis = h.ledger.total_supply();

    let trader = h.create_trader(&mut env, 0, 300);
    h.vault.exchange_native(&trader, &300);
    assert_eq!(h.ledger.total_supply(), supply_at_genesis);

    let staker = env.generate_address();
    h.ledger.transfer(&h.token_owner, &staker, &500);
    h.ledger.approve(&staker, &farm.address, &500);
    farm.stake(&staker, &500);
    env.advance_time(SECONDS_PER_YEAR);
    assert_eq!(farm.withdraw_yield(&staker), 100);

    assert_eq!(h.ledger.total_supply(), supply_at_genesis + 100);
    assert_eq!(farm.get_total_yield_paid(), 100);
}
