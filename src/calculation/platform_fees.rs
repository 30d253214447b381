//! Platform fees charged for running a payroll.

use rust_decimal::Decimal;

use crate::config::PayrollRates;
use crate::models::PlatformFees;

/// Computes the Greenroom fee on `total_gross_payroll` and postage for
/// `number_of_checks` paper checks.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::platform_fees;
/// use payroll_engine::config::PayrollRates;
/// use rust_decimal::Decimal;
///
/// let fees = platform_fees(Decimal::from(10000), 2, &PayrollRates::default());
/// assert_eq!(fees.greenroom_fee, Decimal::from(50));
/// assert_eq!(fees.postage_fee, Decimal::from(10));
/// ```
pub fn platform_fees(
    total_gross_payroll: Decimal,
    number_of_checks: usize,
    rates: &PayrollRates,
) -> PlatformFees {
    PlatformFees {
        greenroom_fee: total_gross_payroll * rates.greenroom_fee_rate,
        number_of_checks,
        postage_fee: Decimal::from(number_of_checks) * rates.postage_per_check,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_half_percent_greenroom_fee() {
        let fees = platform_fees(dec("12345.67"), 0, &PayrollRates::default());
        assert_eq!(fees.greenroom_fee, dec("61.72835"));
        assert_eq!(fees.postage_fee, Decimal::ZERO);
    }

    #[test]
    fn test_two_checks_cost_ten_dollars() {
        let fees = platform_fees(Decimal::ZERO, 2, &PayrollRates::default());
        assert_eq!(fees.postage_fee, dec("10.00"));
        assert_eq!(fees.number_of_checks, 2);
    }

    #[test]
    fn test_configured_rates_apply() {
        let rates = PayrollRates {
            greenroom_fee_rate: dec("0.01"),
            postage_per_check: dec("7.25"),
            ..PayrollRates::default()
        };
        let fees = platform_fees(dec("1000"), 3, &rates);
        assert_eq!(fees.greenroom_fee, dec("10"));
        assert_eq!(fees.postage_fee, dec("21.75"));
    }
}
