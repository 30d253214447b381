//! Gross pay calculation.
//!
//! Gross pay is the base rate plus every adjustment and increment, before
//! deductions.

use rust_decimal::Decimal;

use crate::models::Payee;

/// Returns the sum of adjustment and increment rates.
pub fn adjustments_total(payee: &Payee) -> Decimal {
    let adjustments: Decimal = payee.adjustments.iter().map(|a| a.rate).sum();
    let increments: Decimal = payee.increments.iter().map(|i| i.rate).sum();
    adjustments + increments
}

/// Returns the payee's gross pay: `rate + Σ adjustments.rate + Σ increments.rate`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::gross_pay;
/// use payroll_engine::models::{Adjustment, Payee, PayeeType, RateType};
/// use rust_decimal::Decimal;
///
/// let mut payee = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(2000));
/// payee.adjustments.push(Adjustment { rate: Decimal::from(250), ..Adjustment::default() });
///
/// assert_eq!(gross_pay(&payee), Decimal::from(2250));
/// ```
pub fn gross_pay(payee: &Payee) -> Decimal {
    payee.rate + adjustments_total(payee)
}
