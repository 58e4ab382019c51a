use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
/// `Balance` and `Allowance` are persistent, one entry per holder;
/// everything else is instance storage.
pub enum DataKey {
    Admin,
    Operators(Address),
    Balance(Address),
    Allowance(Address, Address), // (from, spender)
    TotalSupply,
    Initialized,
}
