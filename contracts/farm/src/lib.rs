#![no_std]

//! # NTP Yield Farm
//!
//! A single-asset staking pool over the NTP token ledger. Accounts stake
//! tokens and accrue yield linearly at a fixed 20% APR against their stake
//! timestamp. Yield is funded by minting: the farm must be registered as the
//! ledger's controller, mints the payout to itself and forwards it to the
//! staker.
//!
//! Accrual rules:
//! - re-staking settles and pays the accrued yield first, so topping up a
//!   position never destroys accrual;
//! - unstaking pays no yield and leaves the clock untouched, so the remaining
//!   stake keeps accruing from the original timestamp.

pub mod events;


use soroban_sdk::{contract, contracterror, contractimpl, symbol_short, Address, Env, Symbol};
use token::TokenContractClient as LedgerClient;

// ── Storage keys ──────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN_LEDGER: Symbol = symbol_short!("TOK_LDG");
const TOTAL_STAKE: Symbol = symbol_short!("TOT_STK");
const TOTAL_YIELD: Symbol = symbol_short!("TOT_YLD");
const STAKE: Symbol = symbol_short!("STAKE");
const STAKE_TS: Symbol = symbol_short!("STAKE_TS");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Fixed annual percentage rate paid on stakes.
pub const APR: u32 = 20;
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

// ── Errors ────────────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FarmError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    ZeroAmount = 3,
    InsufficientBalance = 4,
    InsufficientAllowance = 5,
    /// The caller has no stake.
    NoDeposit = 6,
    /// Unstake amount exceeds the caller's stake.
    ExceedsStake = 7,
}

// ── Accrual arithmetic ────────────────────────────────────────────────────────

/// Linear yield accrued by `stake` over `elapsed` seconds, floored.
pub fn accrued_yield(stake: i128, elapsed: u64) -> i128 {
    if stake <= 0 {
        return 0;
    }
    stake * APR as i128 * elapsed as i128 / (100 * SECONDS_PER_YEAR as i128)
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmContract;

#[contractimpl]
impl FarmContract {
    /// Bind the farm to the token ledger it stakes and mints against. The
    /// farm must subsequently be set as the ledger's controller for yield
    /// payouts to work.
    pub fn initialize(env: Env, token_ledger: Address) -> Result<(), FarmError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(FarmError::AlreadyInitialized);
        }
        env.storage().instance().set(&TOKEN_LEDGER, &token_ledger);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    /// Stake `amount` tokens. A caller with an existing stake is settled
    /// first: the yield accrued so far is paid out before the position grows,
    /// and the clock restarts for the combined stake.
    pub fn stake(env: Env, caller: Address, amount: i128) -> Result<(), FarmError> {
        caller.require_auth();
        let ledger = Self::ledger(&env)?;

        if amount <= 0 {
            return Err(FarmError::ZeroAmount);
        }
        let farm = env.current_contract_address();
        if ledger.balance_of(&caller) < amount {
            return Err(FarmError::InsufficientBalance);
        }
        if ledger.allowance(&caller, &farm) < amount {
            return Err(FarmError::InsufficientAllowance);
        }

        let current = Self::stake_of(&env, &caller);
        if current > 0 {
            Self::settle(&env, &ledger, &caller, current);
        }

        Self::set_stake(&env, &caller, current + amount);
        env.storage()
            .instance()
            .set(&TOTAL_STAKE, &(Self::total_stake_of(&env) + amount));
        Self::set_timestamp(&env, &caller, env.ledger().timestamp());

        ledger.transfer_from(&farm, &caller, &farm, &amount);

        events::publish_stake(&env, &caller, amount, current + amount);
        Ok(())
    }

    /// Return `amount` staked tokens to the caller. Pays no yield and leaves
    /// the stake timestamp untouched.
    pub fn unstake(env: Env, caller: Address, amount: i128) -> Result<(), FarmError> {
        caller.require_auth();
        let ledger = Self::ledger(&env)?;

        let current = Self::stake_of(&env, &caller);
        if current == 0 {
            return Err(FarmError::NoDeposit);
        }
        if amount <= 0 {
            return Err(FarmError::ZeroAmount);
        }
        if amount > current {
            return Err(FarmError::ExceedsStake);
        }

        let remaining = current - amount;
        Self::set_stake(&env, &caller, remaining);
        env.storage()
            .instance()
            .set(&TOTAL_STAKE, &(Self::total_stake_of(&env) - amount));

        ledger.transfer(&env.current_contract_address(), &caller, &amount);

        events::publish_unstake(&env, &caller, amount, remaining);
        Ok(())
    }

    /// Yield accrued by the caller since their stake timestamp.
    pub fn get_yield(env: Env, caller: Address) -> i128 {
        let stake = Self::stake_of(&env, &caller);
        if stake == 0 {
            return 0;
        }
        let elapsed = env
            .ledger()
            .timestamp()
            .saturating_sub(Self::timestamp_of(&env, &caller));
        accrued_yield(stake, elapsed)
    }

    /// Mint and pay out the caller's accrued yield, restarting their clock.
    /// An immediate second call pays 0.
    pub fn withdraw_yield(env: Env, caller: Address) -> Result<i128, FarmError> {
        caller.require_auth();
        let ledger = Self::ledger(&env)?;

        let stake = Self::stake_of(&env, &caller);
        if stake == 0 {
            return Err(FarmError::NoDeposit);
        }
        let amount = Self::get_yield(env.clone(), caller.clone());
        if amount > 0 {
            Self::settle_with_amount(&env, &ledger, &caller, amount);
        } else {
            Self::set_timestamp(&env, &caller, env.ledger().timestamp());
        }
        Ok(amount)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn get_stake(env: Env, account: Address) -> i128 {
        Self::stake_of(&env, &account)
    }

    pub fn get_total_stake(env: Env) -> i128 {
        Self::total_stake_of(&env)
    }

    pub fn get_total_yield_paid(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_YIELD).unwrap_or(0)
    }

    pub fn get_apr(_env: Env) -> u32 {
        APR
    }

    pub fn get_stake_timestamp(env: Env, account: Address) -> u64 {
        Self::timestamp_of(&env, &account)
    }

    pub fn get_token_ledger(env: Env) -> Option<Address> {
        env.storage().instance().get(&TOKEN_LEDGER)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Pay out whatever `stake` has accrued so far and restart the clock.
    fn settle(env: &Env, ledger: &LedgerClient, caller: &Address, stake: i128) {
        let elapsed = env
            .ledger()
            .timestamp()
            .saturating_sub(Self::timestamp_of(env, caller));
        let amount = accrued_yield(stake, elapsed);
        if amount > 0 {
            Self::settle_with_amount(env, ledger, caller, amount);
        }
    }

    /// Commit the payout accounting, then mint to the farm (the ledger's
    /// controller receives its own mints) and forward to the staker.
    fn settle_with_amount(env: &Env, ledger: &LedgerClient, caller: &Address, amount: i128) {
        Self::set_timestamp(env, caller, env.ledger().timestamp());
        env.storage().instance().set(
            &TOTAL_YIELD,
            &(env.storage().instance().get(&TOTAL_YIELD).unwrap_or(0i128) + amount),
        );

        let farm = env.current_contract_address();
        ledger.mint(&farm, &amount);
        ledger.transfer(&farm, caller, &amount);

        events::publish_yield_paid(env, caller, amount);
    }

    fn ledger(env: &Env) -> Result<LedgerClient<'_>, FarmError> {
        let address: Address = env
            .storage()
            .instance()
            .get(&TOKEN_LEDGER)
            .ok_or(FarmError::NotInitialized)?;
        Ok(LedgerClient::new(env, &address))
    }

    fn stake_of(env: &Env, account: &Address) -> i128 {
        let key = (STAKE, account.clone());
        let stake: Option<i128> = env.storage().persistent().get(&key);
        if stake.is_some() {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
        stake.unwrap_or(0)
    }

    fn set_stake(env: &Env, account: &Address, amount: i128) {
        let key = (STAKE, account.clone());
        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn timestamp_of(env: &Env, account: &Address) -> u64 {
        env.storage()
            .persistent()
            .get(&(STAKE_TS, account.clone()))
            .unwrap_or(0)
    }

    fn set_timestamp(env: &Env, account: &Address, ts: u64) {
        let key = (STAKE_TS, account.clone());
        env.storage().persistent().set(&key, &ts);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn total_stake_of(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKE).unwrap_or(0)
    }
}
