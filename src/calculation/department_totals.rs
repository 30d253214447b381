//! Department totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::config::PayrollRates;
use crate::models::{DepartmentTotals, Payee};

use super::{adjustments_total, employer_fringe, tax_deductions};

/// Groups the selected payees by department and sums wages, adjustments,
/// employer fringe and tax deductions.
///
/// Payees without a department are grouped under `rates.unassigned_label`.
/// The result is sorted by department name.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::department_totals;
/// use payroll_engine::config::PayrollRates;
/// use payroll_engine::models::{Payee, PayeeType, RateType};
/// use rust_decimal::Decimal;
///
/// let mut grip = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(1000));
/// grip.department = Some("Grip".to_string());
/// grip.selected = true;
///
/// let totals = department_totals(&[grip], &PayrollRates::default());
/// assert_eq!(totals[0].department, "Grip");
/// assert_eq!(totals[0].wages, Decimal::from(1000));
/// ```
pub fn department_totals(payees: &[Payee], rates: &PayrollRates) -> Vec<DepartmentTotals> {
    let mut by_department: BTreeMap<&str, DepartmentTotals> = BTreeMap::new();

    for payee in payees.iter().filter(|p| p.selected) {
        let department = payee.department_or(&rates.unassigned_label);
        let totals = by_department
            .entry(department)
            .or_insert_with(|| DepartmentTotals {
                department: department.to_string(),
                headcount: 0,
                wages: Decimal::ZERO,
                adjustments: Decimal::ZERO,
                contributions: Decimal::ZERO,
                taxes: Decimal::ZERO,
            });

        totals.headcount += 1;
        totals.wages += payee.rate;
        totals.adjustments += adjustments_total(payee);
        totals.contributions += employer_fringe(payee, rates);
        totals.taxes += tax_deductions(payee);
    }

    by_department.into_values().collect()
}
