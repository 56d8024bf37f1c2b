//! Structured event publishing for the Farm contract.

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_stake(env: &Env, account: &Address, amount: i128, total: i128) {
    env.events()
        .publish((symbol_short!("STAKE"), account.clone()), (amount, total));
}

pub fn publish_unstake(env: &Env, account: &Address, amount: i128, remaining: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKE"), account.clone()),
        (amount, remaining),
    );
}

pub fn publish_yield_paid(env: &Env, account: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("YIELD"), account.clone()), amount);
}
