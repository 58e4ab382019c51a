use crate::storage::Committed;
use soroban_sdk::{contractclient, token, Address, Env};

/// What the ledger needs from the bottle token contract.
#[contractclient(name = "BottleClient")]
pub trait BottleCapability {
    fn mint(env: Env, minter: Address, to: Address, amount: i128);
    fn burn_from(env: Env, spender: Address, from: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
    fn allowance(env: Env, from: Address, spender: Address) -> i128;
}

/// Bottle token as seen from the ledger.
///
/// Queries are free to run at any point. Calls that move bottles need a
/// `Committed` receipt.
pub struct Bottles<'a> {
    client: BottleClient<'a>,
    ledger: Address,
}

impl<'a> Bottles<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        Self {
            client: BottleClient::new(env, token),
            ledger: env.current_contract_address(),
        }
    }

    pub fn balance(&self, holder: &Address) -> i128 {
        self.client.balance(holder)
    }

    /// Allowance `holder` has granted to the ledger
    pub fn allowance(&self, holder: &Address) -> i128 {
        self.client.allowance(holder, &self.ledger)
    }

    pub fn mint(&self, _committed: &Committed, to: &Address, quantity: u32) {
        self.client.mint(&self.ledger, to, &(quantity as i128));
    }

    pub fn burn(&self, _committed: &Committed, from: &Address, quantity: u32) {
        self.client.burn_from(&self.ledger, from, &(quantity as i128));
    }
}

/// A payment rail: the native asset contract or the secondary currency.
pub struct Currency<'a> {
    client: token::Client<'a>,
    ledger: Address,
}

impl<'a> Currency<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        Self {
            client: token::Client::new(env, token),
            ledger: env.current_contract_address(),
        }
    }

    pub fn address(&self) -> Address {
        self.client.address.clone()
    }

    pub fn balance(&self, id: &Address) -> i128 {
        self.client.balance(id)
    }

    /// Amount of this currency the ledger itself holds
    pub fn held(&self) -> i128 {
        self.client.balance(&self.ledger)
    }

    /// Allowance `owner` has granted to the ledger
    pub fn allowance(&self, owner: &Address) -> i128 {
        self.client.allowance(owner, &self.ledger)
    }

    /// Take `amount` from `payer`, who authorized the current call.
    pub fn collect(&self, _committed: &Committed, payer: &Address, amount: i128) {
        self.client.transfer(payer, &self.ledger, &amount);
    }

    /// Take `amount` from `owner` through a previously granted allowance.
    pub fn collect_approved(&self, _committed: &Committed, owner: &Address, amount: i128) {
        self.client
            .transfer_from(&self.ledger, owner, &self.ledger, &amount);
    }

    pub fn pay(&self, _committed: &Committed, to: &Address, amount: i128) {
        self.client.transfer(&self.ledger, to, &amount);
    }
}
