//! # Property-Based Test Generators
//!
//! Composable `proptest` strategies for generating valid and adversarial
//! inputs across the NTP contract operations.
//!
//! ## Design Decisions
//!
//! - Generators produce *semantic* values (amounts, durations, admin counts),
//!   not raw bytes, so tests exercise real code paths rather than hitting
//!   deserialization errors.
//! - Edge-case weights are tuned: ~20% of values are boundary cases (0, 1,
//!   large) to maximize bug-finding per test iteration.

extern crate std;

use proptest::prelude::*;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

// ── Scalar Generators ────────────────────────────────────────────────────────

/// Strategy for token amounts (i128), biased toward edge cases.
///
/// Distribution:
///   10% → 0
///   10% → 1
///   10% → MAX safe amount (10^15)
///   70% → uniform in [1, 10^15]
pub fn amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        1 => Just(0i128),
        1 => Just(1i128),
        1 => Just(1_000_000_000_000_000i128),   // 10^15
        7 => (1i128..=1_000_000_000_000_000i128),
    ]
}

/// Strategy for strictly positive token amounts.
pub fn positive_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        1 => Just(1i128),
        1 => Just(1_000_000_000_000_000i128),
        8 => (1i128..=1_000_000_000_000_000i128),
    ]
}

/// Strategy for amounts that should be rejected (negative or zero).
pub fn invalid_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        5 => Just(0i128),
        3 => (-1_000_000i128..=-1i128),
        2 => Just(i128::MIN),
    ]
}

/// Strategy for stake sizes within the range the yield arithmetic must be
/// exact for.
pub fn stake_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        1 => Just(1i128),
        2 => (1i128..=1_000i128),
        6 => (1i128..=1_000_000_000_000i128),   // 10^12
        1 => Just(1_000_000_000_000i128),
    ]
}

/// Strategy for elapsed accrual times in seconds.
pub fn elapsed_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(0u64),
        1 => Just(1u64),
        3 => (1u64..=86_400u64),                // up to 1 day
        3 => (1u64..=SECONDS_PER_YEAR),
        1 => Just(SECONDS_PER_YEAR),
        1 => (SECONDS_PER_YEAR..=10 * SECONDS_PER_YEAR),
    ]
}

/// Strategy for admin registry sizes.
pub fn admin_count_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(1u32),
        2 => Just(2u32),
        6 => (2u32..=16u32),
        1 => Just(64u32),
    ]
}

/// Strategy for withdrawal percentages in the accepted [1, 50] range.
pub fn percentage_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(1u32),
        1 => Just(50u32),
        8 => (1u32..=50u32),
    ]
}

/// Strategy for exchange prices. Returns `(sell, buy)` with `sell > buy > 0`,
/// the only ordering the vault accepts.
pub fn price_pair_strategy() -> impl Strategy<Value = (i128, i128)> {
    (2i128..=1_000_000i128)
        .prop_flat_map(|sell| (Just(sell), 1i128..sell))
}
