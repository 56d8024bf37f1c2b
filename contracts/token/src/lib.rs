#![no_std]

//! # NTP Token Ledger
//!
//! Fungible balance/allowance accounting for the NTP token economy.
//!
//! - **Fixed metadata**: "Niery Token Papa" / "NTP" / 18 decimals.
//! - **Single controller**: mint and burn are restricted to one configured
//!   address (the Vault or the Farm), set by the contract owner.
//! - **Allowance model**: `approve` grants a spender a fixed budget that
//!   `transfer_from` debits; no expiration ledger.
//!
//! Every state-changing entry point takes an explicit caller address and
//! requires its authorization, so the ledger can be driven both by user
//! invocations and by cross-contract calls from the Vault and the Farm.

pub mod events;

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, Env, String, Symbol,
};

// ── Storage keys ──────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const CONTROLLER: Symbol = symbol_short!("CTRL");
const SUPPLY: Symbol = symbol_short!("SUPPLY");

const BALANCE: Symbol = symbol_short!("BALANCE");
const ALLOWANCE: Symbol = symbol_short!("ALLOW");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Metadata constants ────────────────────────────────────────────────────────

const TOKEN_NAME: &str = "Niery Token Papa";
const TOKEN_SYMBOL: &str = "NTP";
const TOKEN_DECIMALS: u32 = 18;

// ── Errors ────────────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller lacks the privilege required for the operation.
    Unauthorized = 3,
    /// Amount is zero or negative where a positive amount is required.
    InvalidAmount = 4,
    InsufficientBalance = 5,
    InsufficientAllowance = 6,
}

// ── Storage helpers ───────────────────────────────────────────────────────────

fn balance_key(account: &Address) -> (Symbol, Address) {
    (BALANCE, account.clone())
}

fn allowance_key(owner: &Address, spender: &Address) -> (Symbol, Address, Address) {
    (ALLOWANCE, owner.clone(), spender.clone())
}

fn read_balance(env: &Env, account: &Address) -> i128 {
    let key = balance_key(account);
    let bal: Option<i128> = env.storage().persistent().get(&key);
    if bal.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    bal.unwrap_or(0)
}

fn write_balance(env: &Env, account: &Address, amount: i128) {
    let key = balance_key(account);
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn read_allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    let key = allowance_key(owner, spender);
    let allowed: Option<i128> = env.storage().persistent().get(&key);
    if allowed.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    allowed.unwrap_or(0)
}

fn write_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    let key = allowance_key(owner, spender);
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn read_supply(env: &Env) -> i128 {
    env.storage().instance().get(&SUPPLY).unwrap_or(0)
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct TokenContract;

#[contractimpl]
impl TokenContract {
    /// Bootstrap the ledger, crediting the full initial supply to `deployer`.
    ///
    /// `deployer` becomes the contract owner and is the only account allowed
    /// to designate the mint/burn controller via [`set_controller`].
    pub fn initialize(env: Env, deployer: Address, initial_amount: i128) -> Result<(), TokenError> {
        deployer.require_auth();

        if env.storage().instance().has(&INITIALIZED) {
            return Err(TokenError::AlreadyInitialized);
        }
        if initial_amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        env.storage().instance().set(&OWNER, &deployer);
        env.storage().instance().set(&SUPPLY, &initial_amount);
        env.storage().instance().set(&INITIALIZED, &true);
        write_balance(&env, &deployer, initial_amount);

        events::publish_mint(&env, &deployer, initial_amount);
        Ok(())
    }

    // ── Metadata ──────────────────────────────────────────────────────────────

    pub fn name(env: Env) -> String {
        String::from_str(&env, TOKEN_NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, TOKEN_SYMBOL)
    }

    pub fn decimals(_env: Env) -> u32 {
        TOKEN_DECIMALS
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Balance of `account`; 0 for accounts the ledger has never seen.
    pub fn balance_of(env: Env, account: Address) -> i128 {
        read_balance(&env, &account)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_supply(&env)
    }

    /// Remaining amount `spender` may move on `owner`'s behalf.
    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        read_allowance(&env, &owner, &spender)
    }

    /// The configured mint/burn controller, if any.
    pub fn get_controller(env: Env) -> Option<Address> {
        env.storage().instance().get(&CONTROLLER)
    }

    // ── Transfers & approvals ─────────────────────────────────────────────────

    /// Move `amount` from `from` to `to`. Zero-amount transfers succeed.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        Self::require_initialized(&env)?;

        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }
        let from_balance = read_balance(&env, &from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        write_balance(&env, &from, from_balance - amount);
        write_balance(&env, &to, read_balance(&env, &to) + amount);

        events::publish_transfer(&env, &from, &to, amount);
        Ok(())
    }

    /// Grant `spender` a budget of `amount` tokens on `owner`'s behalf.
    /// Last write wins; there is no cumulative semantics.
    pub fn approve(
        env: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        owner.require_auth();
        Self::require_initialized(&env)?;

        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }
        write_allowance(&env, &owner, &spender, amount);

        events::publish_approval(&env, &owner, &spender, amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to` using `spender`'s allowance.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        Self::require_initialized(&env)?;

        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }
        let allowed = read_allowance(&env, &from, &spender);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        let from_balance = read_balance(&env, &from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        write_allowance(&env, &from, &spender, allowed - amount);
        write_balance(&env, &from, from_balance - amount);
        write_balance(&env, &to, read_balance(&env, &to) + amount);

        events::publish_transfer(&env, &from, &to, amount);
        Ok(())
    }

    // ── Controller-gated supply management ────────────────────────────────────

    /// Designate the single address allowed to mint and burn. Owner only.
    pub fn set_controller(env: Env, caller: Address, controller: Address) -> Result<(), TokenError> {
        caller.require_auth();
        Self::require_initialized(&env)?;

        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(TokenError::NotInitialized)?;
        if caller != owner {
            return Err(TokenError::Unauthorized);
        }

        env.storage().instance().set(&CONTROLLER, &controller);
        Ok(())
    }

    /// Mint `amount` new tokens, credited to the controller itself.
    pub fn mint(env: Env, caller: Address, amount: i128) -> Result<(), TokenError> {
        caller.require_auth();
        Self::require_controller(&env, &caller)?;

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        write_balance(&env, &caller, read_balance(&env, &caller) + amount);
        env.storage()
            .instance()
            .set(&SUPPLY, &(read_supply(&env) + amount));

        events::publish_mint(&env, &caller, amount);
        Ok(())
    }

    /// Destroy `amount` tokens held by `from`. Controller only.
    pub fn burn(env: Env, caller: Address, from: Address, amount: i128) -> Result<(), TokenError> {
        caller.require_auth();
        Self::require_controller(&env, &caller)?;

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }
        let from_balance = read_balance(&env, &from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        write_balance(&env, &from, from_balance - amount);
        env.storage()
            .instance()
            .set(&SUPPLY, &(read_supply(&env) - amount));

        events::publish_burn(&env, &from, amount);
        Ok(())
    }

    // ── Internal guards ───────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), TokenError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(TokenError::NotInitialized);
        }
        Ok(())
    }

    fn require_controller(env: &Env, caller: &Address) -> Result<(), TokenError> {
        let controller: Address = env
            .storage()
            .instance()
            .get(&CONTROLLER)
            .ok_or(TokenError::Unauthorized)?;
        if *caller != controller {
            return Err(TokenError::Unauthorized);
        }
        Ok(())
    }
}
