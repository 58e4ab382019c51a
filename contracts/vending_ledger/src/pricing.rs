use crate::storage::{VendingConfig, BASIS_POINTS};

/// Apply a discount expressed in basis points
///
/// Formula: discounted = floor(price × (10,000 - discount_bps) / 10,000)
///
/// Prices are non-negative, so integer division truncates toward the floor.
/// A whole-percent discount D is D × 100 basis points, which makes this the
/// same as floor(price × (100 - D) / 100).
///
/// Example:
/// - price: 0.1 (1,000,000 stroops)
/// - discount: 10% (1,000 basis points)
/// - discounted: 1,000,000 × 9,000 / 10,000 = 900,000
pub fn apply_discount(price: i128, discount_bps: u32) -> Option<i128> {
    let keep_bps = BASIS_POINTS.checked_sub(discount_bps as i128)?;
    if keep_bps < 0 {
        return None;
    }

    price.checked_mul(keep_bps)?.checked_div(BASIS_POINTS)
}

/// Price of a single bottle, with the return discount when `return_credit` is set
pub fn unit_price(config: &VendingConfig, return_credit: bool) -> Option<i128> {
    if return_credit {
        apply_discount(config.unit_price, config.return_discount_bps)
    } else {
        Some(config.unit_price)
    }
}

/// Price of `quantity` bottles bought in one call
///
/// Formula: bulk = floor(unit_price × quantity × (10,000 - bulk_discount_bps) / 10,000)
pub fn bulk_price(config: &VendingConfig, quantity: u32) -> Option<i128> {
    let gross = config.unit_price.checked_mul(quantity as i128)?;
    apply_discount(gross, config.bulk_discount_bps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: i128 = 10_000_000; // 7 decimals

    fn config() -> VendingConfig {
        VendingConfig {
            unit_price: SCALE / 10, // 0.1
            secondary_price: 2 * SCALE,
            bulk_discount_bps: 2_000, // 20%
            return_discount_bps: 1_000, // 10%
            max_operators: 2,
        }
    }

    #[test]
    fn test_ten_percent_discount() {
        let discounted = apply_discount(SCALE / 10, 1_000).unwrap();
        assert_eq!(discounted, 900_000);
    }

    #[test]
    fn test_discount_floors() {
        // 999 × 0.9 = 899.1
        assert_eq!(apply_discount(999, 1_000), Some(899));
        // 1 × 0.5 = 0.5
        assert_eq!(apply_discount(1, 5_000), Some(0));
    }

    #[test]
    fn test_whole_percent_matches_percent_formula() {
        let price = 123_456_789i128;
        for percent in [0u32, 1, 5, 10, 33, 50, 99, 100] {
            let expected = price * (100 - percent as i128) / 100;
            assert_eq!(apply_discount(price, percent * 100), Some(expected));
        }
    }

    #[test]
    fn test_discount_bounds() {
        assert_eq!(apply_discount(SCALE, 0), Some(SCALE));
        assert_eq!(apply_discount(SCALE, 10_000), Some(0));
        assert_eq!(apply_discount(SCALE, 10_001), None);
    }

    #[test]
    fn test_discount_overflow() {
        assert_eq!(apply_discount(i128::MAX, 1_000), None);
    }

    #[test]
    fn test_unit_price_with_return_credit() {
        let config = config();
        assert_eq!(unit_price(&config, false), Some(1_000_000));
        assert_eq!(unit_price(&config, true), Some(900_000));
    }

    #[test]
    fn test_bulk_price() {
        let config = config();
        // 5 × 0.1 = 0.5, minus 20% = 0.4
        assert_eq!(bulk_price(&config, 5), Some(4_000_000));
        assert_eq!(bulk_price(&config, 0), Some(0));
    }

    #[test]
    fn test_bulk_price_overflow() {
        let config = VendingConfig {
            unit_price: i128::MAX / 2,
            ..config()
        };
        assert_eq!(bulk_price(&config, 3), None);
    }
}
