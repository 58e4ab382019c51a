use crate::error::Error;
use crate::storage::{VendingConfig, BASIS_POINTS};
use soroban_sdk::Address;

pub struct Validator;

impl Validator {
    pub fn validate_config(config: &VendingConfig, has_secondary: bool) -> Result<(), Error> {
        if config.unit_price <= 0 {
            return Err(Error::InvalidPrice);
        }

        if has_secondary && config.secondary_price <= 0 {
            return Err(Error::InvalidPrice);
        }

        if config.bulk_discount_bps as i128 > BASIS_POINTS
            || config.return_discount_bps as i128 > BASIS_POINTS
        {
            return Err(Error::InvalidDiscount);
        }

        Ok(())
    }

    /// Native proceeds are measured as the ledger's native balance, so the
    /// secondary rail cannot be the same asset contract.
    pub fn validate_currencies(
        native_asset: &Address,
        secondary_currency: &Option<Address>,
    ) -> Result<(), Error> {
        if secondary_currency.as_ref() == Some(native_asset) {
            return Err(Error::InvalidSecondaryCurrency);
        }
        Ok(())
    }

    pub fn validate_quantity(quantity: u32) -> Result<(), Error> {
        if quantity == 0 {
            return Err(Error::InvalidQuantity);
        }
        Ok(())
    }

    /// Stock must cover the whole order; there are no partial sales.
    pub fn validate_stock(stock: u32, quantity: u32) -> Result<(), Error> {
        if stock < quantity {
            return Err(Error::OutOfStock);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Env};

    const SCALE: i128 = 10_000_000; // 7 decimals

    fn config() -> VendingConfig {
        VendingConfig {
            unit_price: SCALE / 10,
            secondary_price: 0,
            bulk_discount_bps: 500,
            return_discount_bps: 1_000,
            max_operators: 2,
        }
    }

    #[test]
    fn test_valid_config() {
        assert_eq!(Validator::validate_config(&config(), false), Ok(()));
    }

    #[test]
    fn test_secondary_price_required_with_secondary_currency() {
        assert_eq!(
            Validator::validate_config(&config(), true),
            Err(Error::InvalidPrice)
        );
    }

    #[test]
    fn test_rejects_non_positive_unit_price() {
        let config = VendingConfig {
            unit_price: 0,
            ..config()
        };
        assert_eq!(
            Validator::validate_config(&config, false),
            Err(Error::InvalidPrice)
        );
    }

    #[test]
    fn test_rejects_discount_above_100_percent() {
        let config = VendingConfig {
            return_discount_bps: 10_001,
            ..config()
        };
        assert_eq!(
            Validator::validate_config(&config, false),
            Err(Error::InvalidDiscount)
        );
    }

    #[test]
    fn test_stock_checks() {
        assert_eq!(Validator::validate_stock(0, 1), Err(Error::OutOfStock));
        assert_eq!(Validator::validate_stock(4, 5), Err(Error::OutOfStock));
        assert_eq!(Validator::validate_stock(5, 5), Ok(()));
        assert_eq!(Validator::validate_quantity(0), Err(Error::InvalidQuantity));
    }

    #[test]
    fn test_secondary_currency_must_differ_from_native() {
        let env = Env::default();
        let native = Address::generate(&env);
        let other = Address::generate(&env);

        assert_eq!(Validator::validate_currencies(&native, &None), Ok(()));
        assert_eq!(
            Validator::validate_currencies(&native, &Some(other)),
            Ok(())
        );
        assert_eq!(
            Validator::validate_currencies(&native, &Some(native.clone())),
            Err(Error::InvalidSecondaryCurrency)
        );
    }
}
