//! Structured event publishing for the Vault contract.

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_admin_added(env: &Env, by: &Address, account: &Address) {
    env.events()
        .publish((symbol_short!("ADM_ADD"),), (by.clone(), account.clone()));
}

pub fn publish_admin_removed(env: &Env, by: &Address, account: &Address) {
    env.events()
        .publish((symbol_short!("ADM_DEL"),), (by.clone(), account.clone()));
}

pub fn publish_funded(env: &Env, from: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("FUND"), from.clone()), amount);
}

pub fn publish_withdraw_requested(
    env: &Env,
    requested_by: &Address,
    amount: i128,
    amount_per_admin: i128,
) {
    env.events().publish(
        (symbol_short!("WD_REQ"), requested_by.clone()),
        (amount, amount_per_admin),
    );
}

pub fn publish_withdraw_approved(env: &Env, by: &Address, max_withdrawable: i128) {
    env.events()
        .publish((symbol_short!("WD_APPR"), by.clone()), max_withdrawable);
}

pub fn publish_withdraw_rejected(env: &Env, by: &Address) {
    env.events()
        .publish((symbol_short!("WD_REJ"),), by.clone());
}

pub fn publish_withdrawn(env: &Env, admin: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("WD_PAID"), admin.clone()), amount);
}

pub fn publish_sell(env: &Env, account: &Address, token_amount: i128, price: i128) {
    env.events().publish(
        (symbol_short!("SELL"), account.clone()),
        (token_amount, price),
    );
}

pub fn publish_buy(env: &Env, account: &Address, token_amount: i128, price: i128) {
    env.events().publish(
        (symbol_short!("BUY"), account.clone()),
        (token_amount, price),
    );
}

pub fn publish_burned(env: &Env, caller: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("BURN"), caller.clone()), amount);
}
