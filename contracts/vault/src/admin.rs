//! Administrator registry.
//!
//! A flat set of privileged addresses with a cached cardinality counter.
//! The set can never be emptied: removing the last admin is rejected, so
//! `count >= 1` holds from genesis onward.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::VaultError;

const ADMIN_FLAG: Symbol = symbol_short!("ADMIN");
const ADMIN_COUNT: Symbol = symbol_short!("ADM_CNT");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn admin_key(account: &Address) -> (Symbol, Address) {
    (ADMIN_FLAG, account.clone())
}

pub fn is_admin(env: &Env, account: &Address) -> bool {
    let key = admin_key(account);
    let flagged: Option<bool> = env.storage().persistent().get(&key);
    if flagged.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    flagged.unwrap_or(false)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&ADMIN_COUNT).unwrap_or(0)
}

pub fn require_admin(env: &Env, caller: &Address) -> Result<(), VaultError> {
    if !is_admin(env, caller) {
        return Err(VaultError::Unauthorized);
    }
    Ok(())
}

/// Insert `account` into the registry. Idempotency is an error: adding an
/// existing admin fails rather than silently succeeding.
pub fn add(env: &Env, account: &Address) -> Result<(), VaultError> {
    if is_admin(env, account) {
        return Err(VaultError::AlreadyAdmin);
    }
    let key = admin_key(account);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    env.storage().instance().set(&ADMIN_COUNT, &(count(env) + 1));
    Ok(())
}

pub fn remove(env: &Env, account: &Address) -> Result<(), VaultError> {
    if !is_admin(env, account) {
        return Err(VaultError::NotAnAdmin);
    }
    let current = count(env);
    if current <= 1 {
        return Err(VaultError::LastAdminProtected);
    }
    env.storage().persistent().remove(&admin_key(account));
    env.storage().instance().set(&ADMIN_COUNT, &(current - 1));
    Ok(())
}
