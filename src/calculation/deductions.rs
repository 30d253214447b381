//! Deduction and net pay calculation.

use rust_decimal::Decimal;

use crate::models::{DeductionType, Payee};

use super::gross_pay;

/// Returns the sum of every deduction.
pub fn total_deductions(payee: &Payee) -> Decimal {
    payee.deductions.iter().map(|d| d.amount).sum()
}

/// Returns the sum of deductions of one type.
pub fn deductions_of_type(payee: &Payee, deduction_type: DeductionType) -> Decimal {
    payee
        .deductions
        .iter()
        .filter(|d| d.deduction_type == deduction_type)
        .map(|d| d.amount)
        .sum()
}

/// Returns the sum of tax deductions.
pub fn tax_deductions(payee: &Payee) -> Decimal {
    deductions_of_type(payee, DeductionType::Tax)
}

/// Returns gross pay minus all deductions.
///
/// The result is not clamped: deductions larger than gross pay yield a
/// negative net pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::net_pay;
/// use payroll_engine::models::{Deduction, DeductionType, Payee, PayeeType, RateType};
/// use rust_decimal::Decimal;
///
/// let mut payee = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(100));
/// payee.deductions.push(Deduction {
///     amount: Decimal::from(150),
///     deduction_type: DeductionType::Tax,
///     ..Deduction::default()
/// });
///
/// assert_eq!(net_pay(&payee), Decimal::from(-50));
/// ```
pub fn net_pay(payee: &Payee) -> Decimal {
    gross_pay(payee) - total_deductions(payee)
}
