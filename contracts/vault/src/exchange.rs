//! Price-bounded exchange configuration and readiness gating.
//!
//! The vault swaps its native asset against ledger tokens in both directions
//! at admin-configured prices. Prices are native-asset units per whole ledger
//! token and must keep `sell_price > buy_price` once both exist, so the vault
//! never quotes a spread it loses on. Swapping is disabled until every piece
//! of configuration is in place; each missing piece has its own error so a
//! caller knows exactly what is unset.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::VaultError;

// ── Storage keys ──────────────────────────────────────────────────────────────

const SELL_PRICE: Symbol = symbol_short!("SELL_P");
const BUY_PRICE: Symbol = symbol_short!("BUY_P");
const MAX_AMOUNT: Symbol = symbol_short!("MAX_AMT");
const TOKEN_LEDGER: Symbol = symbol_short!("TOK_LDG");
const FARM: Symbol = symbol_short!("FARM");

/// Everything the swap paths need, resolved and validated.
pub struct Readiness {
    pub ledger: Address,
    pub sell_price: i128,
    pub buy_price: i128,
    pub max_amount: i128,
}

// ── Accessors ─────────────────────────────────────────────────────────────────

pub fn sell_price(env: &Env) -> i128 {
    env.storage().instance().get(&SELL_PRICE).unwrap_or(0)
}

pub fn buy_price(env: &Env) -> i128 {
    env.storage().instance().get(&BUY_PRICE).unwrap_or(0)
}

pub fn max_amount(env: &Env) -> i128 {
    env.storage().instance().get(&MAX_AMOUNT).unwrap_or(0)
}

pub fn token_ledger(env: &Env) -> Option<Address> {
    env.storage().instance().get(&TOKEN_LEDGER)
}

pub fn farm(env: &Env) -> Option<Address> {
    env.storage().instance().get(&FARM)
}

// ── Configuration ─────────────────────────────────────────────────────────────

pub fn set_sell_price(env: &Env, price: i128) -> Result<(), VaultError> {
    if price <= 0 {
        return Err(VaultError::InvalidPrice);
    }
    let buy = buy_price(env);
    if buy > 0 && price <= buy {
        return Err(VaultError::PriceOrderingViolation);
    }
    env.storage().instance().set(&SELL_PRICE, &price);
    Ok(())
}

/// The buy price can only be placed under an existing sell price.
pub fn set_buy_price(env: &Env, price: i128) -> Result<(), VaultError> {
    if price <= 0 {
        return Err(VaultError::InvalidPrice);
    }
    let sell = sell_price(env);
    if sell == 0 {
        return Err(VaultError::SellPriceNotSet);
    }
    if price >= sell {
        return Err(VaultError::PriceOrderingViolation);
    }
    env.storage().instance().set(&BUY_PRICE, &price);
    Ok(())
}

pub fn set_max_amount(env: &Env, amount: i128) -> Result<(), VaultError> {
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    env.storage().instance().set(&MAX_AMOUNT, &amount);
    Ok(())
}

/// Point the vault at the token ledger it trades and settles against.
/// Must be a contract, and never the vault itself.
pub fn set_token_ledger(env: &Env, account: &Address) -> Result<(), VaultError> {
    if *account == env.current_contract_address() {
        return Err(VaultError::InvalidAddress);
    }
    if !is_contract_address(env, account) {
        return Err(VaultError::NotAContract);
    }
    env.storage().instance().set(&TOKEN_LEDGER, account);
    Ok(())
}

pub fn set_farm(env: &Env, account: &Address) {
    env.storage().instance().set(&FARM, account);
}

// ── Readiness gate ────────────────────────────────────────────────────────────

/// Check the swap configuration in declared order and return it resolved.
pub fn require_ready(env: &Env) -> Result<Readiness, VaultError> {
    let max_amount = self::max_amount(env);
    if max_amount == 0 {
        return Err(VaultError::NotReadyMaxAmount);
    }
    let sell_price = self::sell_price(env);
    if sell_price == 0 {
        return Err(VaultError::NotReadySellPrice);
    }
    let buy_price = self::buy_price(env);
    if buy_price == 0 {
        return Err(VaultError::NotReadyBuyPrice);
    }
    let ledger = token_ledger(env).ok_or(VaultError::NotReadyTokenLedger)?;
    Ok(Readiness {
        ledger,
        sell_price,
        buy_price,
        max_amount,
    })
}

// ── Address classification ────────────────────────────────────────────────────

/// Whether `address` identifies a contract rather than a plain account.
///
/// Soroban strkeys are 56 characters and discriminate on the first one:
/// `C` for contracts, `G` for accounts. This is the execution environment's
/// "is the counterparty a contract" fact.
pub fn is_contract_address(_env: &Env, address: &Address) -> bool {
    let strkey = address.to_string();
    if strkey.len() != 56 {
        return false;
    }
    let mut buf = [0u8; 56];
    strkey.copy_into_slice(&mut buf);
    buf[0] == b'C'
}
