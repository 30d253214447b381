//! Payroll aggregation engine.
//!
//! This module contains every calculation the engine performs: gross pay,
//! deductions and net pay, employer fringe and payroll tax, union company
//! contributions, department and company totals, platform fees and the
//! grand total. All functions are pure and take their constants from
//! [`PayrollRates`](crate::config::PayrollRates).

mod company_totals;
mod deductions;
mod department_totals;
mod employer_contributions;
mod gross_pay;
mod payee_summary;
mod payroll_summary;
mod platform_fees;
mod rounding;
mod validation;

pub use company_totals::{
    company_contributions_total, company_totals, employer_taxes_total, number_of_checks,
    payment_split,
};
pub use deductions::{deductions_of_type, net_pay, tax_deductions, total_deductions};
pub use department_totals::department_totals;
pub use employer_contributions::{
    UnionContributions, capped_salary, employer_fringe, employer_taxes, union_contributions,
};
pub use gross_pay::{adjustments_total, gross_pay};
pub use payee_summary::{
    PayeeCalculation, WARNING_NEGATIVE_NET_PAY, WARNING_NOT_ONBOARDED,
    WARNING_TIMESHEET_NOT_APPROVED, summarize_payee,
};
pub use payroll_summary::{compute_payroll_summary, total_payroll_amount};
pub use platform_fees::platform_fees;
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_money};
pub use validation::{MAX_AMOUNT, validate_bill, validate_bills, validate_payee, validate_payees};
