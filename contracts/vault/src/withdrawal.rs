//! Multi-admin withdrawal request state machine.
//!
//! At most one request lives at a time, held in a single storage slot as an
//! explicit sum type:
//!
//! ```text
//! Idle ──request_withdraw──▶ Requested ──approve_withdraw──▶ Approved
//!                                │
//!                                └──reject_withdraw──▶ Idle
//! ```
//!
//! An approved request entitles **every** admin to withdraw up to
//! `amount_per_admin` (the requested amount integer-divided by the admin
//! count at request time; the remainder is forfeited). Withdrawals never
//! clear the slot — a fresh request supersedes an approved one and opens a
//! new *epoch*, so per-admin withdrawn counters are scoped per request cycle
//! and never carry stale caps across cycles.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::VaultError;

// ── Storage keys ──────────────────────────────────────────────────────────────

const WD_STATE: Symbol = symbol_short!("WD_STATE");
const WD_EPOCH: Symbol = symbol_short!("WD_EPOCH");
const WD_TOTAL: Symbol = symbol_short!("WD_TOT");
const WD_BY: Symbol = symbol_short!("WD_BY");
const WD_EPOCH_TOTAL: Symbol = symbol_short!("WD_EPT");
const WD_LIFETIME: Symbol = symbol_short!("WD_LT");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Payload of a live withdrawal request.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequest {
    /// Admin who opened the request; must not be the one approving it.
    pub requested_by: Address,
    /// Native-asset entitlement of each admin for this cycle.
    pub amount_per_admin: i128,
    /// Per-admin withdrawal ceiling; equals `amount_per_admin` once approved,
    /// reads as 0 from the outside until then.
    pub max_withdrawable: i128,
    /// Request cycle this payload belongs to.
    pub epoch: u64,
}

/// The single-slot state machine value.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WithdrawalState {
    Idle,
    Requested(WithdrawalRequest),
    Approved(WithdrawalRequest),
}

// ── Storage helpers ───────────────────────────────────────────────────────────

pub fn load_state(env: &Env) -> WithdrawalState {
    env.storage()
        .instance()
        .get(&WD_STATE)
        .unwrap_or(WithdrawalState::Idle)
}

fn store_state(env: &Env, state: &WithdrawalState) {
    env.storage().instance().set(&WD_STATE, state);
}

fn next_epoch(env: &Env) -> u64 {
    let epoch: u64 = env.storage().instance().get(&WD_EPOCH).unwrap_or(0) + 1;
    env.storage().instance().set(&WD_EPOCH, &epoch);
    epoch
}

fn withdrawn_key(epoch: u64, admin: &Address) -> (Symbol, u64, Address) {
    (WD_BY, epoch, admin.clone())
}

/// Amount `admin` has already withdrawn in `epoch`.
pub fn withdrawn_by(env: &Env, epoch: u64, admin: &Address) -> i128 {
    let key = withdrawn_key(epoch, admin);
    let taken: Option<i128> = env.storage().persistent().get(&key);
    if taken.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    taken.unwrap_or(0)
}

fn epoch_total(env: &Env, epoch: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&(WD_EPOCH_TOTAL, epoch))
        .unwrap_or(0)
}

/// Cumulative amount `admin` has withdrawn across all epochs.
pub fn lifetime_withdrawn(env: &Env, admin: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(WD_LIFETIME, admin.clone()))
        .unwrap_or(0)
}

/// Aggregate withdrawn across all admins and epochs.
pub fn total_withdrawn(env: &Env) -> i128 {
    env.storage().instance().get(&WD_TOTAL).unwrap_or(0)
}

fn record_withdrawal(env: &Env, epoch: u64, admin: &Address, amount: i128) {
    let key = withdrawn_key(epoch, admin);
    env.storage()
        .persistent()
        .set(&key, &(withdrawn_by(env, epoch, admin) + amount));
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let epoch_key = (WD_EPOCH_TOTAL, epoch);
    env.storage()
        .persistent()
        .set(&epoch_key, &(epoch_total(env, epoch) + amount));
    env.storage()
        .persistent()
        .extend_ttl(&epoch_key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let lifetime_key = (WD_LIFETIME, admin.clone());
    env.storage()
        .persistent()
        .set(&lifetime_key, &(lifetime_withdrawn(env, admin) + amount));
    env.storage()
        .persistent()
        .extend_ttl(&lifetime_key, TTL_THRESHOLD, TTL_EXTEND_TO);

    env.storage()
        .instance()
        .set(&WD_TOTAL, &(total_withdrawn(env) + amount));
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

/// Integer share of `amount` per admin; the division remainder is forfeited.
pub fn split_per_admin(amount: i128, admin_count: u32) -> i128 {
    if admin_count == 0 {
        return 0;
    }
    amount / admin_count as i128
}

/// Entitlement still committed to a superseded approved request, valued with
/// the *current* admin count. Used to shrink the balance a new request may
/// draw a percentage from.
pub fn outstanding_commitment(env: &Env, admin_count: u32) -> i128 {
    match load_state(env) {
        WithdrawalState::Approved(req) => {
            let committed = req.max_withdrawable * admin_count as i128;
            (committed - epoch_total(env, req.epoch)).max(0)
        }
        _ => 0,
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// Open a new request cycle.
///
/// Allowed from `Idle` and from `Approved` (the prior cycle's unclaimed
/// entitlements stay deducted from the available balance); blocked while a
/// request awaits its verdict.
pub fn request(
    env: &Env,
    caller: &Address,
    amount: i128,
    admin_count: u32,
    balance: i128,
    percentage: u32,
) -> Result<WithdrawalRequest, VaultError> {
    if let WithdrawalState::Requested(_) = load_state(env) {
        return Err(VaultError::RequestAlreadyPending);
    }
    if admin_count < 2 {
        return Err(VaultError::InsufficientAdmins);
    }
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    if balance <= 0 {
        return Err(VaultError::InsufficientFunds);
    }

    let available = (balance - outstanding_commitment(env, admin_count)).max(0);
    if amount > available * percentage as i128 / 100 {
        return Err(VaultError::ExceedsMaximumPercentage);
    }

    let amount_per_admin = split_per_admin(amount, admin_count);
    let req = WithdrawalRequest {
        requested_by: caller.clone(),
        amount_per_admin,
        max_withdrawable: amount_per_admin,
        epoch: next_epoch(env),
    };
    store_state(env, &WithdrawalState::Requested(req.clone()));
    Ok(req)
}

/// Move `Requested` to `Approved`, unlocking per-admin withdrawals.
pub fn approve(
    env: &Env,
    caller: &Address,
    admin_count: u32,
) -> Result<WithdrawalRequest, VaultError> {
    match load_state(env) {
        WithdrawalState::Requested(req) => {
            if admin_count < 2 {
                // Guards against admin removal while the request is in flight.
                return Err(VaultError::InsufficientAdmins);
            }
            if req.requested_by == *caller {
                return Err(VaultError::SameRequester);
            }
            store_state(env, &WithdrawalState::Approved(req.clone()));
            Ok(req)
        }
        _ => Err(VaultError::NoPendingRequest),
    }
}

/// Discard a `Requested` slot entirely, returning to `Idle`.
pub fn reject(env: &Env, caller: &Address) -> Result<(), VaultError> {
    match load_state(env) {
        WithdrawalState::Requested(req) => {
            if req.requested_by == *caller {
                return Err(VaultError::SameRequester);
            }
            store_state(env, &WithdrawalState::Idle);
            Ok(())
        }
        _ => Err(VaultError::NoPendingRequest),
    }
}

/// Settle the caller's claim against the approved request and return the
/// payable amount. Records the withdrawal *before* any asset moves, so a
/// reentrant call observes the already-debited entitlement.
///
/// Outside `Approved`, and for an exhausted allotment, this is the designed
/// no-op: it returns 0 rather than failing.
pub fn claim(env: &Env, caller: &Address, native_balance: i128) -> i128 {
    match load_state(env) {
        WithdrawalState::Approved(req) => {
            let remaining = req.max_withdrawable - withdrawn_by(env, req.epoch, caller);
            let due = remaining.max(0).min(native_balance.max(0));
            if due > 0 {
                record_withdrawal(env, req.epoch, caller, due);
            }
            due
        }
        _ => 0,
    }
}

/// Current per-admin ceiling; 0 unless a request is approved.
pub fn max_withdrawable_now(env: &Env) -> i128 {
    match load_state(env) {
        WithdrawalState::Approved(req) => req.max_withdrawable,
        _ => 0,
    }
}
