use crate::error::Error;
use soroban_sdk::{contracttype, Address, Env, Vec};

// Constants
pub const BASIS_POINTS: i128 = 10_000; // 100% = 10,000 basis points

/// Deployment parameters fixed by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VendingConfig {
    /// Price of one bottle in the native asset's smallest unit
    pub unit_price: i128,
    /// Price of one bottle in secondary-currency units (ignored when no
    /// secondary currency is configured)
    pub secondary_price: i128,
    /// Discount applied to bulk purchases, in basis points
    pub bulk_discount_bps: u32,
    /// Discount granted on the next purchase after a return, in basis points
    pub return_discount_bps: u32,
    /// Operators allowed besides the owner
    pub max_operators: u32,
}

/// Lifetime counters, kept for observability only.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Accounting {
    pub units_sold: u64,
    pub units_returned: u64,
    pub native_collected: i128,
    pub secondary_collected: i128,
    pub native_paid_out: i128,
    pub secondary_paid_out: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Operators,
    Config,
    NativeAsset,
    BottleToken,
    SecondaryCurrency,
    Stock,
    Reserved,        // Sum of all Escrow entries
    SecondaryEscrow,
    Escrow(Address), // Payee → native amount owed
    ReturnCredit(Address),
    Accounting,
    Initialized,
    Paused,
}

/// Receipt that the current call's ledger state has been written back.
///
/// Only `LedgerState::commit` can create one, and every capability call
/// takes one, so token calls cannot run ahead of the state they depend on.
pub struct Committed(());

/// Ledger-wide registers touched by purchases, returns and withdrawals.
#[derive(Clone, Debug)]
pub struct LedgerState {
    pub stock: u32,
    pub reserved: i128,
    pub secondary_escrow: i128,
    pub accounting: Accounting,
}

impl LedgerState {
    pub fn load(env: &Env) -> Result<Self, Error> {
        let stock = env
            .storage()
            .instance()
            .get(&DataKey::Stock)
            .ok_or(Error::NotInitialized)?;

        Ok(Self {
            stock,
            reserved: env
                .storage()
                .instance()
                .get(&DataKey::Reserved)
                .unwrap_or(0),
            secondary_escrow: env
                .storage()
                .instance()
                .get(&DataKey::SecondaryEscrow)
                .unwrap_or(0),
            accounting: Storage::get_accounting(env),
        })
    }

    pub fn commit(self, env: &Env) -> Committed {
        env.storage().instance().set(&DataKey::Stock, &self.stock);
        env.storage().instance().set(&DataKey::Reserved, &self.reserved);
        env.storage()
            .instance()
            .set(&DataKey::SecondaryEscrow, &self.secondary_escrow);
        env.storage()
            .instance()
            .set(&DataKey::Accounting, &self.accounting);
        Committed(())
    }
}

pub struct Storage;

impl Storage {
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    // Config
    pub fn get_config(env: &Env) -> Result<VendingConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_native_asset(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::NativeAsset)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_bottle_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::BottleToken)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_secondary_currency(env: &Env) -> Option<Address> {
        env.storage()
            .instance()
            .get::<DataKey, Option<Address>>(&DataKey::SecondaryCurrency)
            .unwrap_or(None)
    }

    // Operators
    pub fn get_owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_operators(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::Operators)
            .unwrap_or_else(|| Vec::new(env))
    }

    pub fn set_operators(env: &Env, operators: &Vec<Address>) {
        env.storage().instance().set(&DataKey::Operators, operators);
    }

    // Escrow
    pub fn get_escrow(env: &Env, payee: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Escrow(payee.clone()))
            .unwrap_or(0)
    }

    pub fn set_escrow(env: &Env, payee: &Address, amount: i128) {
        let key = DataKey::Escrow(payee.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &amount);
        }
    }

    // Return credits
    pub fn has_return_credit(env: &Env, holder: &Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::ReturnCredit(holder.clone()))
            .unwrap_or(false)
    }

    pub fn set_return_credit(env: &Env, holder: &Address, credited: bool) {
        let key = DataKey::ReturnCredit(holder.clone());
        if credited {
            env.storage().persistent().set(&key, &true);
        } else {
            env.storage().persistent().remove(&key);
        }
    }

    pub fn get_accounting(env: &Env) -> Accounting {
        env.storage()
            .instance()
            .get(&DataKey::Accounting)
            .unwrap_or_default()
    }

    // Pause flag
    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }
}
