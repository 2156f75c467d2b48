//! Money arithmetic.
//!
//! Quantities and prices are exact decimals. Amounts are rounded to two places
//! (half away from zero) at the point they are derived, never later.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Round a monetary value to two decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a monetary value with exactly two decimals behind a currency prefix.
///
/// `format_money(dec!(37.5), "₱") == "₱37.50"`
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_SCALE);
    format!("{symbol}{rounded}")
}

/// Render a quantity without trailing zeros (`3`, `1.5`, `0.25`).
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(dec(1005, 3)), dec(101, 2));
        assert_eq!(round_money(dec(-1005, 3)), dec(-101, 2));
        assert_eq!(round_money(dec(1004, 3)), dec(100, 2));
    }

    #[test]
    fn formats_with_two_decimals_and_prefix() {
        assert_eq!(format_money(dec(375, 1), "₱"), "₱37.50");
        assert_eq!(format_money(Decimal::ZERO, "₱"), "₱0.00");
        assert_eq!(format_money(dec(12, 0), "$"), "$12.00");
        assert_eq!(format_money(dec(12345, 3), "$"), "$12.35");
    }

    #[test]
    fn formats_quantities_like_plain_numbers() {
        assert_eq!(format_quantity(dec(3, 0)), "3");
        assert_eq!(format_quantity(dec(150, 2)), "1.5");
        assert_eq!(format_quantity(dec(25, 2)), "0.25");
        assert_eq!(format_quantity(Decimal::ZERO), "0");
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent(cents in -10_000_000i64..10_000_000i64, extra in 0u32..4) {
            let value = Decimal::new(cents, 2 + extra);
            let once = round_money(value);
            prop_assert_eq!(round_money(once), once);
            prop_assert!(once.scale() <= MONEY_SCALE);
        }
    }
}
