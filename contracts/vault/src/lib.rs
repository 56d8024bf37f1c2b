#![no_std]

//! # NTP Treasury Vault
//!
//! The treasury of the NTP token economy:
//!
//! - **Admin registry**: a set of privileged addresses (the deployer at
//!   genesis) that can never shrink below one member.
//! - **Withdrawal workflow**: any admin may request a percentage-capped slice
//!   of the treasury; a *different* admin must approve it before each admin
//!   can withdraw an equal share. One request lives at a time.
//! - **Exchange engine**: a bidirectional, price-bounded swap between the
//!   vault's native asset and the NTP token ledger, capped per operation.
//!
//! The native asset and the token ledger are external token contracts; the
//! vault only ever holds balances at its own address and moves them through
//! their clients. All internal accounting is committed before any outbound
//! transfer (checks-effects-interactions), so a reentrant call back into an
//! entry point observes already-debited state.

pub mod admin;
pub mod events;
pub mod exchange;
pub mod withdrawal;


use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token::Client as NativeAssetClient,
    Address, Env, Symbol,
};
use token::TokenContractClient as LedgerClient;

use withdrawal::WithdrawalState;

// ── Storage keys ──────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE_ASSET: Symbol = symbol_short!("NATIVE");
const PERCENTAGE: Symbol = symbol_short!("WD_PCT");

/// Default maximum percentage of the treasury withdrawable per request.
const DEFAULT_PERCENTAGE: u32 = 10;
/// Hard ceiling for the configurable withdrawal percentage.
const MAX_PERCENTAGE: u32 = 50;

// ── Errors ────────────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller is not an administrator.
    Unauthorized = 3,
    /// Amount is zero or negative where a positive amount is required.
    InvalidAmount = 4,
    /// Address is rejected for this slot (e.g. the vault's own address).
    InvalidAddress = 5,
    /// The transfer account must be a contract.
    NotAContract = 6,
    /// The entry point is reserved for plain accounts.
    CalledByContract = 7,
    /// Withdrawal percentage outside [1, 50].
    InvalidPercentage = 8,
    AlreadyAdmin = 9,
    NotAnAdmin = 10,
    /// Removing this admin would empty the registry.
    LastAdminProtected = 11,
    /// The operation needs at least two administrators.
    InsufficientAdmins = 12,
    RequestAlreadyPending = 13,
    NoPendingRequest = 14,
    /// Approver/rejector must differ from the requesting admin.
    SameRequester = 15,
    /// The treasury holds no native asset.
    InsufficientFunds = 16,
    /// Requested amount exceeds the percentage cap of the available balance.
    ExceedsMaximumPercentage = 17,
    /// Price must be strictly positive.
    InvalidPrice = 18,
    /// A buy price needs an existing sell price above it.
    SellPriceNotSet = 19,
    /// `sell_price > buy_price` would no longer hold.
    PriceOrderingViolation = 20,
    NotReadyMaxAmount = 21,
    NotReadySellPrice = 22,
    NotReadyBuyPrice = 23,
    NotReadyTokenLedger = 24,
    /// Swap size exceeds the per-operation transfer cap.
    ExceedsMaximumAmount = 25,
    InsufficientBalance = 26,
    InsufficientAllowance = 27,
    /// The vault cannot cover the native payout.
    InsufficientLiquidity = 28,
    /// Amount exceeds the vault's native balance.
    ExceedsBalance = 29,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct VaultContract;

#[contractimpl]
impl VaultContract {
    // ── Initialisation & funding ──────────────────────────────────────────────

    /// Bootstrap the vault. `deployer` becomes the genesis admin and
    /// `native_asset` the token contract the treasury is denominated in.
    pub fn initialize(env: Env, deployer: Address, native_asset: Address) -> Result<(), VaultError> {
        deployer.require_auth();

        if env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::AlreadyInitialized);
        }

        env.storage().instance().set(&NATIVE_ASSET, &native_asset);
        env.storage()
            .instance()
            .set(&PERCENTAGE, &DEFAULT_PERCENTAGE);
        admin::add(&env, &deployer)?;
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    /// Deposit `amount` of the native asset into the treasury. Open to anyone.
    pub fn fund(env: Env, from: Address, amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        Self::require_initialized(&env)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        Self::native(&env)?.transfer(&from, &env.current_contract_address(), &amount);

        events::publish_funded(&env, &from, amount);
        Ok(())
    }

    /// Native-asset balance currently held by the treasury.
    pub fn get_native_balance(env: Env) -> Result<i128, VaultError> {
        Ok(Self::native(&env)?.balance(&env.current_contract_address()))
    }

    // ── Admin registry ────────────────────────────────────────────────────────

    pub fn is_admin(env: Env, account: Address) -> bool {
        admin::is_admin(&env, &account)
    }

    pub fn get_admin_count(env: Env) -> u32 {
        admin::count(&env)
    }

    /// Grant admin rights to `account`. Admin only.
    ///
    /// A live withdrawal request keeps the per-admin split computed at
    /// request time; only *subsequent* percentage checks see the new count.
    pub fn add_admin(env: Env, caller: Address, account: Address) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;

        admin::add(&env, &account)?;
        events::publish_admin_added(&env, &caller, &account);
        Ok(())
    }

    /// Revoke admin rights. The registry can never be emptied.
    pub fn remove_admin(env: Env, caller: Address, account: Address) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;

        admin::remove(&env, &account)?;
        events::publish_admin_removed(&env, &caller, &account);
        Ok(())
    }

    // ── Withdrawal workflow ───────────────────────────────────────────────────

    /// Open a withdrawal request for `amount`, split equally among the
    /// current admins. Requires at least two admins and caps the amount at
    /// `percentage_to_withdraw` percent of the available treasury balance.
    pub fn request_withdraw(env: Env, caller: Address, amount: i128) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;

        let balance = Self::native(&env)?.balance(&env.current_contract_address());
        let req = withdrawal::request(
            &env,
            &caller,
            amount,
            admin::count(&env),
            balance,
            Self::percentage(&env),
        )?;

        events::publish_withdraw_requested(&env, &caller, amount, req.amount_per_admin);
        Ok(())
    }

    /// Approve the pending request. Must come from an admin other than the
    /// requester; unlocks `withdraw` for every admin.
    pub fn approve_withdraw(env: Env, caller: Address) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;

        let req = withdrawal::approve(&env, &caller, admin::count(&env))?;
        events::publish_withdraw_approved(&env, &caller, req.max_withdrawable);
        Ok(())
    }

    /// Discard the pending request, clearing the slot back to idle.
    pub fn reject_withdraw(env: Env, caller: Address) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;

        withdrawal::reject(&env, &caller)?;
        events::publish_withdraw_rejected(&env, &caller);
        Ok(())
    }

    /// Withdraw the caller's remaining share of the approved request and
    /// return the amount paid. Paying out an exhausted allotment is a no-op
    /// returning 0, never an error.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;

        let native = Self::native(&env)?;
        let vault = env.current_contract_address();
        let balance = native.balance(&vault);

        // Accounting is settled before the asset moves.
        let due = withdrawal::claim(&env, &caller, balance);
        if due > 0 {
            native.transfer(&vault, &caller, &due);
            events::publish_withdrawn(&env, &caller, due);
        }
        Ok(due)
    }

    /// Whether `amount` fits under the percentage cap of the raw treasury
    /// balance. Always false while the treasury is empty.
    pub fn check_maximum_amount_to_withdraw(env: Env, amount: i128) -> Result<bool, VaultError> {
        let balance = Self::native(&env)?.balance(&env.current_contract_address());
        if balance <= 0 {
            return Ok(false);
        }
        Ok(amount <= balance * Self::percentage(&env) as i128 / 100)
    }

    /// Set the per-request withdrawal percentage, within [1, 50]. Admin only.
    pub fn set_max_percentage(env: Env, caller: Address, percentage: u32) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;

        if percentage == 0 || percentage > MAX_PERCENTAGE {
            return Err(VaultError::InvalidPercentage);
        }
        env.storage().instance().set(&PERCENTAGE, &percentage);
        Ok(())
    }

    pub fn get_percentage_to_withdraw(env: Env) -> u32 {
        Self::percentage(&env)
    }

    /// Per-admin ceiling of the approved request; 0 when nothing is approved.
    pub fn get_max_withdraw(env: Env) -> i128 {
        withdrawal::max_withdrawable_now(&env)
    }

    /// Aggregate native amount withdrawn across all admins and request
    /// cycles. Restricted to admins.
    pub fn get_withdrawn_amount(env: Env, caller: Address) -> Result<i128, VaultError> {
        caller.require_auth();
        admin::require_admin(&env, &caller)?;
        Ok(withdrawal::total_withdrawn(&env))
    }

    /// Cumulative amount `admin` has withdrawn across all request cycles.
    pub fn get_withdrawn_by(env: Env, admin: Address) -> i128 {
        withdrawal::lifetime_withdrawn(&env, &admin)
    }

    /// Snapshot of the withdrawal state machine slot.
    pub fn get_request_details(env: Env) -> WithdrawalState {
        withdrawal::load_state(&env)
    }

    // ── Exchange configuration ────────────────────────────────────────────────

    pub fn set_sell_price(env: Env, caller: Address, price: i128) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;
        exchange::set_sell_price(&env, price)
    }

    pub fn set_buy_price(env: Env, caller: Address, price: i128) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;
        exchange::set_buy_price(&env, price)
    }

    pub fn set_max_amount_to_transfer(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;
        exchange::set_max_amount(&env, amount)
    }

    /// Configure the token ledger the vault trades against and pays
    /// `burn_native` proceeds to. Must be a contract other than the vault.
    pub fn set_transfer_account(env: Env, caller: Address, account: Address) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;
        exchange::set_token_ledger(&env, &account)
    }

    /// Record the farm's address. Informational only.
    pub fn set_farm_address(env: Env, caller: Address, account: Address) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;
        exchange::set_farm(&env, &account);
        Ok(())
    }

    pub fn get_sell_price(env: Env) -> i128 {
        exchange::sell_price(&env)
    }

    pub fn get_buy_price(env: Env) -> i128 {
        exchange::buy_price(&env)
    }

    pub fn get_max_amount_to_transfer(env: Env) -> i128 {
        exchange::max_amount(&env)
    }

    pub fn get_transfer_account(env: Env) -> Option<Address> {
        exchange::token_ledger(&env)
    }

    pub fn get_farm_address(env: Env) -> Option<Address> {
        exchange::farm(&env)
    }

    // ── Swaps ─────────────────────────────────────────────────────────────────

    /// Sell direction: `from` sends `amount` native asset and receives ledger
    /// tokens at the sell price. The payout is capped by the per-operation
    /// limit (exceeding it fails) and by the vault's token balance (a short
    /// vault fills partially). Returns the tokens actually sent.
    pub fn receive_native(env: Env, from: Address, amount: i128) -> Result<i128, VaultError> {
        from.require_auth();
        Self::require_initialized(&env)?;
        let ready = exchange::require_ready(&env)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let entitled = amount / ready.sell_price;
        if entitled > ready.max_amount {
            return Err(VaultError::ExceedsMaximumAmount);
        }

        let vault = env.current_contract_address();
        let ledger = LedgerClient::new(&env, &ready.ledger);
        let tokens_to_send = entitled.min(ledger.balance_of(&vault));

        Self::native(&env)?.transfer(&from, &vault, &amount);
        if tokens_to_send > 0 {
            ledger.transfer(&vault, &from, &tokens_to_send);
        }

        events::publish_sell(&env, &from, tokens_to_send, ready.sell_price);
        Ok(tokens_to_send)
    }

    /// Buy direction: `from` sells `token_amount` ledger tokens back to the
    /// vault and receives `token_amount * buy_price` native asset.
    pub fn exchange_native(env: Env, from: Address, token_amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        Self::require_initialized(&env)?;
        let ready = exchange::require_ready(&env)?;

        if token_amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let vault = env.current_contract_address();
        let ledger = LedgerClient::new(&env, &ready.ledger);
        if ledger.balance_of(&from) < token_amount {
            return Err(VaultError::InsufficientBalance);
        }
        if ledger.allowance(&from, &vault) < token_amount {
            return Err(VaultError::InsufficientAllowance);
        }
        if token_amount > ready.max_amount {
            return Err(VaultError::ExceedsMaximumAmount);
        }

        let payout = token_amount
            .checked_mul(ready.buy_price)
            .ok_or(VaultError::InsufficientLiquidity)?;
        let native = Self::native(&env)?;
        if payout > native.balance(&vault) {
            return Err(VaultError::InsufficientLiquidity);
        }

        ledger.transfer_from(&vault, &from, &vault, &token_amount);
        native.transfer(&vault, &from, &payout);

        events::publish_buy(&env, &from, token_amount, ready.buy_price);
        Ok(())
    }

    /// Send `amount` native asset from the treasury to the configured
    /// transfer account. Admin only, and reserved for plain accounts — the
    /// caller must not be a contract.
    pub fn burn_native(env: Env, caller: Address, amount: i128) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        admin::require_admin(&env, &caller)?;

        if exchange::is_contract_address(&env, &caller) {
            return Err(VaultError::CalledByContract);
        }
        let transfer_account = exchange::token_ledger(&env).ok_or(VaultError::NotReadyTokenLedger)?;
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let native = Self::native(&env)?;
        let vault = env.current_contract_address();
        if amount > native.balance(&vault) {
            return Err(VaultError::ExceedsBalance);
        }
        native.transfer(&vault, &transfer_account, &amount);

        events::publish_burned(&env, &caller, amount);
        Ok(())
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), VaultError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::NotInitialized);
        }
        Ok(())
    }

    fn percentage(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&PERCENTAGE)
            .unwrap_or(DEFAULT_PERCENTAGE)
    }

    fn native(env: &Env) -> Result<NativeAssetClient<'_>, VaultError> {
        let asset: Address = env
            .storage()
            .instance()
            .get(&NATIVE_ASSET)
            .ok_or(VaultError::NotInitialized)?;
        Ok(NativeAssetClient::new(env, &asset))
    }
}
