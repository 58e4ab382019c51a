#![no_std]

mod admin;
mod capability;
mod error;
mod escrow;
mod events;
mod operated;
mod pricing;
mod storage;
mod user_ops;
mod validation;


use admin::Admin;
use escrow::Escrow;
use operated::Operated;
use storage::{DataKey, LedgerState, Storage};
use user_ops::UserOps;
use validation::Validator;

pub use error::Error;
pub use events::*;
pub use storage::{Accounting, VendingConfig};

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

#[contract]
pub struct VendingLedger;

#[contractimpl]
impl VendingLedger {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the ledger with an empty stock
    ///
    /// `native_asset` is the asset contract purchases are paid in,
    /// `bottle_token` must list this ledger as an operator so it can mint.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidPrice`: Unit price (or secondary price, when a secondary currency is set) not positive
    /// - `InvalidDiscount`: A discount above 10,000 basis points
    /// - `InvalidSecondaryCurrency`: Secondary currency is the native asset
    pub fn initialize(
        env: Env,
        owner: Address,
        native_asset: Address,
        bottle_token: Address,
        secondary_currency: Option<Address>,
        config: VendingConfig,
    ) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        Validator::validate_config(&config, secondary_currency.is_some())?;
        Validator::validate_currencies(&native_asset, &secondary_currency)?;

        Operated::initialize(&env, &owner);

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage()
            .instance()
            .set(&DataKey::NativeAsset, &native_asset);
        env.storage()
            .instance()
            .set(&DataKey::BottleToken, &bottle_token);
        env.storage()
            .instance()
            .set(&DataKey::SecondaryCurrency, &secondary_currency);
        env.storage().instance().set(&DataKey::Stock, &0u32);
        env.storage().instance().set(&DataKey::Paused, &false);

        Ok(())
    }

    // ============================================
    // ACCESS CONTROL
    // ============================================

    /// Add an operator
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is neither owner nor operator
    /// - `SelfReference`: Caller tried to add itself
    /// - `AlreadyOperator`: Candidate already authorized
    /// - `CapacityReached`: Operator set is full
    pub fn add_operator(env: Env, caller: Address, candidate: Address) -> Result<(), Error> {
        Operated::add_operator(&env, &caller, &candidate)
    }

    /// Remove an operator
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is neither owner nor operator
    /// - `NotOperator`: Target is not an operator
    pub fn remove_operator(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        Operated::remove_operator(&env, &caller, &target)
    }

    /// Number of authorized principals, owner included
    pub fn operators_count(env: Env) -> u32 {
        Operated::count(&env)
    }

    pub fn operators(env: Env) -> Vec<Address> {
        Storage::get_operators(&env)
    }

    pub fn is_authorized(env: Env, identity: Address) -> bool {
        Operated::is_authorized(&env, &identity)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Storage::get_owner(&env)
    }

    // ============================================
    // PURCHASES & RETURNS
    // ============================================

    /// Buy one bottle, paying exactly the quoted price in the native asset
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `OutOfStock`: No units left
    /// - `PriceMismatch`: `paid` differs from `quote_unit(buyer)`
    pub fn buy_unit(env: Env, buyer: Address, paid: i128) -> Result<(), Error> {
        UserOps::buy_unit(&env, &buyer, paid)
    }

    /// Buy `quantity` bottles at the bulk price
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidQuantity`: Quantity is zero
    /// - `OutOfStock`: Fewer than `quantity` units left
    /// - `PriceMismatch`: `paid` differs from `quote_bulk(quantity)`
    /// - `ArithmeticOverflow`: Price does not fit
    pub fn buy_bulk(env: Env, buyer: Address, quantity: u32, paid: i128) -> Result<(), Error> {
        UserOps::buy_bulk(&env, &buyer, quantity, paid)
    }

    /// Buy one bottle with the secondary currency
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `SecondaryCurrencyDisabled`: No secondary currency configured
    /// - `OutOfStock`: No units left
    /// - `PriceMismatch`: `amount` differs from the secondary price
    /// - `InsufficientAllowance`: Buyer has not approved the ledger for `amount`
    /// - `InsufficientBalance`: Buyer holds less than `amount`
    pub fn buy_unit_with_secondary(env: Env, buyer: Address, amount: i128) -> Result<(), Error> {
        UserOps::buy_unit_with_secondary(&env, &buyer, amount)
    }

    /// Return a bottle for a one-off discount on the next `buy_unit`
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `ReturnCreditPending`: Previous return credit not used yet
    /// - `InsufficientBalance`: Holder has no bottle
    /// - `InsufficientAllowance`: Holder has not approved the ledger for a bottle
    pub fn return_unit(env: Env, holder: Address) -> Result<(), Error> {
        UserOps::return_unit(&env, &holder)
    }

    pub fn quote_unit(env: Env, buyer: Address) -> Result<i128, Error> {
        UserOps::quote_unit(&env, &buyer)
    }

    pub fn quote_bulk(env: Env, quantity: u32) -> Result<i128, Error> {
        UserOps::quote_bulk(&env, quantity)
    }

    // ============================================
    // ADMINISTRATION
    // ============================================

    /// Add units to the stock, returns the new stock
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is neither owner nor operator
    /// - `InvalidQuantity`: Quantity is zero
    /// - `ArithmeticOverflow`: Stock would overflow
    pub fn restock(env: Env, caller: Address, quantity: u32) -> Result<u32, Error> {
        Admin::restock(&env, &caller, quantity)
    }

    /// Reserve the unreserved native balance for the owner, returns the amount
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is neither owner nor operator
    pub fn prepare_withdrawal(env: Env, caller: Address) -> Result<i128, Error> {
        Admin::prepare_withdrawal(&env, &caller)
    }

    /// Pay out everything reserved for `payee`. Anyone may trigger it.
    ///
    /// # Errors
    /// - `NothingToWithdraw`: Nothing reserved for `payee`
    pub fn withdraw_payments(env: Env, payee: Address) -> Result<i128, Error> {
        Escrow::withdraw(&env, &payee)
    }

    /// Send all collected secondary currency to the owner
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is neither owner nor operator
    /// - `SecondaryCurrencyDisabled`: No secondary currency configured
    /// - `NothingToWithdraw`: Nothing collected
    pub fn withdraw_secondary(env: Env, caller: Address) -> Result<i128, Error> {
        Admin::withdraw_secondary(&env, &caller)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        Admin::pause(&env, &caller)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        Admin::unpause(&env, &caller)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn stock(env: Env) -> Result<u32, Error> {
        Ok(LedgerState::load(&env)?.stock)
    }

    pub fn config(env: Env) -> Result<VendingConfig, Error> {
        Storage::get_config(&env)
    }

    /// Native amount reserved for `payee` and not yet withdrawn
    pub fn payments(env: Env, payee: Address) -> i128 {
        Storage::get_escrow(&env, &payee)
    }

    /// Sum of all reserved native amounts
    pub fn reserved(env: Env) -> Result<i128, Error> {
        Ok(LedgerState::load(&env)?.reserved)
    }

    pub fn secondary_escrow(env: Env) -> Result<i128, Error> {
        Ok(LedgerState::load(&env)?.secondary_escrow)
    }

    pub fn has_return_credit(env: Env, holder: Address) -> bool {
        Storage::has_return_credit(&env, &holder)
    }

    pub fn accounting(env: Env) -> Accounting {
        Storage::get_accounting(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        Storage::is_paused(&env)
    }

    pub fn native_asset(env: Env) -> Result<Address, Error> {
        Storage::get_native_asset(&env)
    }

    pub fn bottle_token(env: Env) -> Result<Address, Error> {
        Storage::get_bottle_token(&env)
    }

    pub fn secondary_currency(env: Env) -> Option<Address> {
        Storage::get_secondary_currency(&env)
    }
}
