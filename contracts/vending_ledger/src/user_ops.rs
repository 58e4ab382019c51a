use crate::capability::{Bottles, Currency};
use crate::error::Error;
use crate::events::{BottleBoughtEvent, BottleReturnedEvent};
use crate::pricing;
use crate::storage::{LedgerState, Storage};
use crate::validation::Validator;
use soroban_sdk::{log, Address, Env, Symbol};

pub struct UserOps;

impl UserOps {
    /// Buy one bottle with the native asset.
    ///
    /// A pending return credit is consumed and lowers the price.
    pub fn buy_unit(env: &Env, buyer: &Address, paid: i128) -> Result<(), Error> {
        Self::check_not_paused(env)?;

        buyer.require_auth();

        let config = Storage::get_config(env)?;
        let mut state = LedgerState::load(env)?;

        Validator::validate_stock(state.stock, 1)?;

        let return_credit = Storage::has_return_credit(env, buyer);
        let price = pricing::unit_price(&config, return_credit).ok_or(Error::ArithmeticOverflow)?;
        Self::check_price(env, price, paid)?;

        state.stock -= 1;
        state.accounting.units_sold = state
            .accounting
            .units_sold
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow)?;
        state.accounting.native_collected = state
            .accounting
            .native_collected
            .checked_add(paid)
            .ok_or(Error::ArithmeticOverflow)?;
        if return_credit {
            Storage::set_return_credit(env, buyer, false);
        }
        let committed = state.commit(env);

        let native = Currency::new(env, &Storage::get_native_asset(env)?);
        native.collect(&committed, buyer, paid);
        Bottles::new(env, &Storage::get_bottle_token(env)?).mint(&committed, buyer, 1);

        Self::publish_bought(env, buyer, 1, paid, native.address());
        Ok(())
    }

    /// Buy `quantity` bottles at the bulk price, all or nothing.
    pub fn buy_bulk(env: &Env, buyer: &Address, quantity: u32, paid: i128) -> Result<(), Error> {
        Self::check_not_paused(env)?;
        Validator::validate_quantity(quantity)?;

        buyer.require_auth();

        let config = Storage::get_config(env)?;
        let mut state = LedgerState::load(env)?;

        Validator::validate_stock(state.stock, quantity)?;

        let price = pricing::bulk_price(&config, quantity).ok_or(Error::ArithmeticOverflow)?;
        Self::check_price(env, price, paid)?;

        state.stock -= quantity;
        state.accounting.units_sold = state
            .accounting
            .units_sold
            .checked_add(quantity as u64)
            .ok_or(Error::ArithmeticOverflow)?;
        state.accounting.native_collected = state
            .accounting
            .native_collected
            .checked_add(paid)
            .ok_or(Error::ArithmeticOverflow)?;
        let committed = state.commit(env);

        let native = Currency::new(env, &Storage::get_native_asset(env)?);
        native.collect(&committed, buyer, paid);
        Bottles::new(env, &Storage::get_bottle_token(env)?).mint(&committed, buyer, quantity);

        Self::publish_bought(env, buyer, quantity, paid, native.address());
        Ok(())
    }

    /// Buy one bottle with the secondary currency through an allowance
    /// the buyer granted to the ledger beforehand.
    pub fn buy_unit_with_secondary(env: &Env, buyer: &Address, amount: i128) -> Result<(), Error> {
        Self::check_not_paused(env)?;

        buyer.require_auth();

        let secondary = Storage::get_secondary_currency(env).ok_or(Error::SecondaryCurrencyDisabled)?;
        let config = Storage::get_config(env)?;
        let mut state = LedgerState::load(env)?;

        Validator::validate_stock(state.stock, 1)?;
        Self::check_price(env, config.secondary_price, amount)?;

        let currency = Currency::new(env, &secondary);
        if currency.allowance(buyer) < amount {
            return Err(Error::InsufficientAllowance);
        }
        if currency.balance(buyer) < amount {
            return Err(Error::InsufficientBalance);
        }

        state.stock -= 1;
        state.secondary_escrow = state
            .secondary_escrow
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        state.accounting.units_sold = state
            .accounting
            .units_sold
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow)?;
        state.accounting.secondary_collected = state
            .accounting
            .secondary_collected
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        let committed = state.commit(env);

        currency.collect_approved(&committed, buyer, amount);
        Bottles::new(env, &Storage::get_bottle_token(env)?).mint(&committed, buyer, 1);

        Self::publish_bought(env, buyer, 1, amount, secondary);
        Ok(())
    }

    /// Hand a bottle back for a discount on the holder's next `buy_unit`.
    ///
    /// The holder must have approved the ledger for at least one bottle.
    pub fn return_unit(env: &Env, holder: &Address) -> Result<(), Error> {
        Self::check_not_paused(env)?;

        holder.require_auth();

        let mut state = LedgerState::load(env)?;

        if Storage::has_return_credit(env, holder) {
            return Err(Error::ReturnCreditPending);
        }

        let bottles = Bottles::new(env, &Storage::get_bottle_token(env)?);
        if bottles.balance(holder) < 1 {
            return Err(Error::InsufficientBalance);
        }
        if bottles.allowance(holder) < 1 {
            return Err(Error::InsufficientAllowance);
        }

        state.accounting.units_returned = state
            .accounting
            .units_returned
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_return_credit(env, holder, true);
        let committed = state.commit(env);

        bottles.burn(&committed, holder, 1);

        env.events().publish(
            (Symbol::new(env, "bottle_returned"), holder.clone()),
            BottleReturnedEvent {
                holder: holder.clone(),
                quantity: 1,
            },
        );

        Ok(())
    }

    /// Price `buyer` would pay for one bottle right now
    pub fn quote_unit(env: &Env, buyer: &Address) -> Result<i128, Error> {
        let config = Storage::get_config(env)?;
        pricing::unit_price(&config, Storage::has_return_credit(env, buyer))
            .ok_or(Error::ArithmeticOverflow)
    }

    pub fn quote_bulk(env: &Env, quantity: u32) -> Result<i128, Error> {
        Validator::validate_quantity(quantity)?;
        let config = Storage::get_config(env)?;
        pricing::bulk_price(&config, quantity).ok_or(Error::ArithmeticOverflow)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_not_paused(env: &Env) -> Result<(), Error> {
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    fn check_price(env: &Env, required: i128, paid: i128) -> Result<(), Error> {
        if paid != required {
            log!(env, "price mismatch: required {}, paid {}", required, paid);
            return Err(Error::PriceMismatch);
        }
        Ok(())
    }

    fn publish_bought(env: &Env, buyer: &Address, quantity: u32, paid: i128, currency: Address) {
        env.events().publish(
            (Symbol::new(env, "bottle_bought"), buyer.clone()),
            BottleBoughtEvent {
                buyer: buyer.clone(),
                quantity,
                paid,
                currency,
            },
        );
    }
}
