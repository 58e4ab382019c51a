#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{ApproveEvent, BurnEvent, MintEvent, TransferEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

/// One token stands for one bottle sold by the vending ledger.
#[contract]
pub struct BottleToken;

#[contractimpl]
impl BottleToken {
    /// Initialize the token contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);

        Ok(())
    }

    /// Add an operator (the vending ledger)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn add_operator(env: Env, operator: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Operators(operator), &true);

        Ok(())
    }

    /// Remove an operator
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn remove_operator(env: Env, operator: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .remove(&DataKey::Operators(operator));

        Ok(())
    }

    /// Mint bottles to `to` (operators only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotOperator`: `minter` is not a registered operator
    /// - `InvalidAmount`: Amount <= 0
    pub fn mint(env: Env, minter: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        minter.require_auth();

        if !Self::is_operator(env.clone(), minter.clone()) {
            return Err(Error::NotOperator);
        }

        let new_balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        let new_supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        Self::write_balance(&env, &to, new_balance);
        env.storage().instance().set(&DataKey::TotalSupply, &new_supply);

        env.events().publish(
            (Symbol::new(&env, "mint"), to.clone()),
            MintEvent { minter, to, amount },
        );

        Ok(())
    }

    /// Let `spender` burn or move up to `amount` of `from`'s bottles.
    /// Overwrites any previous allowance.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount < 0
    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        Self::write_allowance(&env, &from, &spender, amount);

        env.events().publish(
            (Symbol::new(&env, "approve"), from.clone(), spender.clone()),
            ApproveEvent {
                from,
                spender,
                amount,
            },
        );

        Ok(())
    }

    /// Burn bottles held by `from` using `spender`'s allowance
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientAllowance`: Allowance below `amount`
    /// - `InsufficientBalance`: Not enough balance
    pub fn burn_from(env: Env, spender: Address, from: Address, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        spender.require_auth();

        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        if allowance < amount {
            return Err(Error::InsufficientAllowance);
        }

        let balance = Self::balance(env.clone(), from.clone());
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let new_supply = Self::total_supply(env.clone())
            .checked_sub(amount)
            .ok_or(Error::InvalidAmount)?;

        Self::write_allowance(&env, &from, &spender, allowance - amount);
        Self::write_balance(&env, &from, balance - amount);
        env.storage().instance().set(&DataKey::TotalSupply, &new_supply);

        env.events().publish(
            (Symbol::new(&env, "burn"), from.clone()),
            BurnEvent {
                spender,
                from,
                amount,
            },
        );

        Ok(())
    }

    /// Transfer bottles between holders
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        Self::write_balance(&env, &from, from_balance - amount);

        // Re-read after the debit so a self-transfer nets to zero.
        let new_to_balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        Self::write_balance(&env, &to, new_to_balance);

        env.events().publish(
            (Symbol::new(&env, "transfer"), from.clone(), to.clone()),
            TransferEvent { from, to, amount },
        );

        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get::<DataKey, i128>(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage()
            .persistent()
            .get::<DataKey, i128>(&DataKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get::<DataKey, i128>(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    /// Bottles are indivisible.
    pub fn decimals(_env: Env) -> u32 {
        0
    }

    /// Check if address is an operator
    pub fn is_operator(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Operators(address))
            .unwrap_or(false)
    }

    fn check_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn write_balance(env: &Env, id: &Address, amount: i128) {
        let key = DataKey::Balance(id.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &amount);
        }
    }

    fn write_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
        let key = DataKey::Allowance(from.clone(), spender.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &amount);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    fn setup(env: &Env) -> (BottleTokenClient<'_>, Address) {
        let contract_id = env.register(BottleToken, ());
        let client = BottleTokenClient::new(env, &contract_id);

        let admin = Address::generate(env);
        let minter = Address::generate(env);
        client.initialize(&admin);
        client.add_operator(&minter);

        (client, minter)
    }

    #[test]
    fn test_initialize() {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register(BottleToken, ());
        let client = BottleTokenClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        client.initialize(&admin);

        let result = client.try_initialize(&admin);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
        assert_eq!(client.decimals(), 0);
    }

    #[test]
    fn test_mint_and_balance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, minter) = setup(&env);

        let user = Address::generate(&env);
        client.mint(&minter, &user, &3);

        assert_eq!(client.balance(&user), 3);
        assert_eq!(client.total_supply(), 3);
    }

    #[test]
    fn test_mint_requires_operator() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, minter) = setup(&env);

        let stranger = Address::generate(&env);
        let user = Address::generate(&env);

        let result = client.try_mint(&stranger, &user, &1);
        assert_eq!(result, Err(Ok(Error::NotOperator)));

        client.remove_operator(&minter);
        let result = client.try_mint(&minter, &user, &1);
        assert_eq!(result, Err(Ok(Error::NotOperator)));
        assert_eq!(client.balance(&user), 0);
    }

    #[test]
    fn test_holder_entries_live_outside_instance_storage() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, minter) = setup(&env);

        let user = Address::generate(&env);
        let spender = Address::generate(&env);
        client.mint(&minter, &user, &2);
        client.approve(&user, &spender, &1);

        env.as_contract(&client.address, || {
            let balance = DataKey::Balance(user.clone());
            let allowance = DataKey::Allowance(user.clone(), spender.clone());

            assert!(env.storage().persistent().has(&balance));
            assert!(env.storage().persistent().has(&allowance));
            assert!(!env.storage().instance().has(&balance));
            assert!(!env.storage().instance().has(&allowance));
        });

        // Many holders do not grow the shared instance entry
        for _ in 0..20 {
            client.mint(&minter, &Address::generate(&env), &1);
        }
        assert_eq!(client.balance(&user), 2);
        assert_eq!(client.total_supply(), 22);
    }

    #[test]
    fn test_transfer() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, minter) = setup(&env);

        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        client.mint(&minter, &user1, &5);
        client.transfer(&user1, &user2, &2);

        assert_eq!(client.balance(&user1), 3);
        assert_eq!(client.balance(&user2), 2);
    }

    #[test]
    fn test_burn_from_consumes_allowance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, minter) = setup(&env);

        let user = Address::generate(&env);
        let spender = Address::generate(&env);

        client.mint(&minter, &user, &2);
        client.approve(&user, &spender, &1);
        client.burn_from(&spender, &user, &1);

        assert_eq!(client.balance(&user), 1);
        assert_eq!(client.allowance(&user, &spender), 0);
        assert_eq!(client.total_supply(), 1);

        let result = client.try_burn_from(&spender, &user, &1);
        assert_eq!(result, Err(Ok(Error::InsufficientAllowance)));
    }

    #[test]
    fn test_burn_from_insufficient_balance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _minter) = setup(&env);

        let user = Address::generate(&env);
        let spender = Address::generate(&env);

        client.approve(&user, &spender, &1);
        let result = client.try_burn_from(&spender, &user, &1);
        assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
    }

    #[test]
    fn test_insufficient_balance_error() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, minter) = setup(&env);

        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        client.mint(&minter, &user1, &1);

        let result = client.try_transfer(&user1, &user2, &2);
        assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
    }
}
