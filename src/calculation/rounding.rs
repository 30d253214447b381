//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places money is presented with.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds a money value to currency precision, midpoint away from zero.
///
/// The engine keeps full precision internally; this is applied only when a
/// value is presented.
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_money(Decimal::from_str("-10.005").unwrap()), Decimal::from_str("-10.01").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
