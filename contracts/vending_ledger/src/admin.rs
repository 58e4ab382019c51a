use crate::error::Error;
use crate::escrow::Escrow;
use crate::events::{PausedEvent, RestockedEvent};
use crate::operated::Operated;
use crate::storage::{LedgerState, Storage};
use crate::validation::Validator;
use soroban_sdk::{log, Address, Env, Symbol};

pub struct Admin;

impl Admin {
    /// Add `quantity` units to the stock (owner or operator)
    pub fn restock(env: &Env, caller: &Address, quantity: u32) -> Result<u32, Error> {
        Operated::require_authorized(env, caller)?;
        Validator::validate_quantity(quantity)?;

        let mut state = LedgerState::load(env)?;
        state.stock = state
            .stock
            .checked_add(quantity)
            .ok_or(Error::ArithmeticOverflow)?;
        let stock = state.stock;
        state.commit(env);

        log!(env, "restocked {}, stock now {}", quantity, stock);

        env.events().publish(
            (Symbol::new(env, "restocked"),),
            RestockedEvent { quantity, stock },
        );

        Ok(stock)
    }

    /// Reserve the ledger's unreserved native balance for the owner
    pub fn prepare_withdrawal(env: &Env, caller: &Address) -> Result<i128, Error> {
        Operated::require_authorized(env, caller)?;
        Escrow::prepare(env)
    }

    /// Send the collected secondary currency to the owner
    pub fn withdraw_secondary(env: &Env, caller: &Address) -> Result<i128, Error> {
        Operated::require_authorized(env, caller)?;
        Escrow::withdraw_secondary(env)
    }

    /// Stop purchases and returns. Withdrawals and restocking stay open.
    pub fn pause(env: &Env, caller: &Address) -> Result<(), Error> {
        Operated::require_authorized(env, caller)?;

        Storage::set_paused(env, true);
        env.events().publish(
            (Symbol::new(env, "paused"),),
            PausedEvent { by: caller.clone() },
        );
        Ok(())
    }

    pub fn unpause(env: &Env, caller: &Address) -> Result<(), Error> {
        Operated::require_authorized(env, caller)?;

        Storage::set_paused(env, false);
        env.events().publish(
            (Symbol::new(env, "unpaused"),),
            PausedEvent { by: caller.clone() },
        );
        Ok(())
    }
}
