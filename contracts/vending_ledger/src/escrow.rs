//! Pull payments for the native asset.
//!
//! `prepare` moves whatever native balance is not yet spoken for into the
//! owner's escrow entry. `withdraw` pays an entry out to its payee. The entry
//! and the reserved total are cleared before the transfer leaves the ledger.

use crate::capability::Currency;
use crate::error::Error;
use crate::events::{ReadyToWithdrawEvent, WithdrawnEvent};
use crate::storage::{LedgerState, Storage};
use soroban_sdk::{log, Address, Env, Symbol};

pub struct Escrow;

impl Escrow {
    /// Reserve the unreserved native balance for the owner.
    /// Returns the amount added to the owner's entry, which may be zero.
    pub fn prepare(env: &Env) -> Result<i128, Error> {
        let owner = Storage::get_owner(env)?;
        let native = Currency::new(env, &Storage::get_native_asset(env)?);
        let mut state = LedgerState::load(env)?;

        let available = native
            .held()
            .checked_sub(state.reserved)
            .filter(|amount| *amount >= 0)
            .ok_or(Error::ArithmeticOverflow)?;

        let owed = Storage::get_escrow(env, &owner)
            .checked_add(available)
            .ok_or(Error::ArithmeticOverflow)?;
        state.reserved = state
            .reserved
            .checked_add(available)
            .ok_or(Error::ArithmeticOverflow)?;

        Storage::set_escrow(env, &owner, owed);
        state.commit(env);

        env.events().publish(
            (Symbol::new(env, "ready_to_withdraw"), owner.clone()),
            ReadyToWithdrawEvent {
                payee: owner,
                amount: available,
            },
        );

        Ok(available)
    }

    /// Pay out everything recorded for `payee`.
    pub fn withdraw(env: &Env, payee: &Address) -> Result<i128, Error> {
        let native = Currency::new(env, &Storage::get_native_asset(env)?);
        let mut state = LedgerState::load(env)?;

        let amount = Storage::get_escrow(env, payee);
        if amount <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        state.reserved = state
            .reserved
            .checked_sub(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        state.accounting.native_paid_out = state
            .accounting
            .native_paid_out
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_escrow(env, payee, 0);
        let committed = state.commit(env);

        native.pay(&committed, payee, amount);
        log!(env, "withdrawn {} to {}", amount, payee.clone());

        env.events().publish(
            (Symbol::new(env, "withdrawn"), payee.clone()),
            WithdrawnEvent {
                payee: payee.clone(),
                amount,
            },
        );

        Ok(amount)
    }

    /// Send the whole secondary-currency balance to the owner.
    pub fn withdraw_secondary(env: &Env) -> Result<i128, Error> {
        let secondary = Storage::get_secondary_currency(env).ok_or(Error::SecondaryCurrencyDisabled)?;
        let owner = Storage::get_owner(env)?;
        let mut state = LedgerState::load(env)?;

        let amount = state.secondary_escrow;
        if amount <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        state.secondary_escrow = 0;
        state.accounting.secondary_paid_out = state
            .accounting
            .secondary_paid_out
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        let committed = state.commit(env);

        Currency::new(env, &secondary).pay(&committed, &owner, amount);

        env.events().publish(
            (Symbol::new(env, "secondary_withdrawn"), owner.clone()),
            WithdrawnEvent {
                payee: owner,
                amount,
            },
        );

        Ok(amount)
    }
}
