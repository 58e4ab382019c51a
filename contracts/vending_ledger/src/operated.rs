//! Owner plus a bounded set of operators.
//!
//! The owner is fixed at initialization and is never stored in the operator
//! set; it counts as one authorized principal on top of the operators.

use crate::error::Error;
use crate::events::{OperatorAddedEvent, OperatorRemovedEvent};
use crate::storage::{DataKey, Storage};
use soroban_sdk::{Address, Env, Symbol, Vec};

pub struct Operated;

impl Operated {
    pub fn initialize(env: &Env, owner: &Address) {
        env.storage().instance().set(&DataKey::Owner, owner);
        Storage::set_operators(env, &Vec::new(env));
    }

    pub fn is_authorized(env: &Env, identity: &Address) -> bool {
        match Storage::get_owner(env) {
            Ok(owner) if owner == *identity => true,
            Ok(_) => Storage::get_operators(env).contains(identity),
            Err(_) => false,
        }
    }

    /// Authenticate `caller` and check it is the owner or an operator.
    pub fn require_authorized(env: &Env, caller: &Address) -> Result<(), Error> {
        if !Storage::is_initialized(env) {
            return Err(Error::NotInitialized);
        }

        caller.require_auth();

        if !Self::is_authorized(env, caller) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    /// Owner counts as one.
    pub fn count(env: &Env) -> u32 {
        Storage::get_operators(env).len() + 1
    }

    pub fn add_operator(env: &Env, caller: &Address, candidate: &Address) -> Result<(), Error> {
        Self::require_authorized(env, caller)?;

        if candidate == caller {
            return Err(Error::SelfReference);
        }

        if Self::is_authorized(env, candidate) {
            return Err(Error::AlreadyOperator);
        }

        let max_operators = Storage::get_config(env)?.max_operators;
        let mut operators = Storage::get_operators(env);
        if operators.len() >= max_operators {
            return Err(Error::CapacityReached);
        }

        operators.push_back(candidate.clone());
        Storage::set_operators(env, &operators);

        env.events().publish(
            (Symbol::new(env, "operator_added"), candidate.clone()),
            OperatorAddedEvent {
                operator: candidate.clone(),
            },
        );

        Ok(())
    }

    pub fn remove_operator(env: &Env, caller: &Address, target: &Address) -> Result<(), Error> {
        Self::require_authorized(env, caller)?;

        let mut operators = Storage::get_operators(env);
        let index = operators
            .first_index_of(target)
            .ok_or(Error::NotOperator)?;

        operators.remove(index);
        Storage::set_operators(env, &operators);

        env.events().publish(
            (Symbol::new(env, "operator_removed"), target.clone()),
            OperatorRemovedEvent {
                operator: target.clone(),
            },
        );

        Ok(())
    }
}
