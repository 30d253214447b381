//! Company-wide totals, employer costs and the payment split.
//!
//! Every function here considers only selected payees; one-time bills are
//! always part of the run.

use rust_decimal::Decimal;

use crate::config::PayrollRates;
use crate::models::{CompanyTotals, OneTimeBill, Payee, PaymentSplit};

use super::{
    employer_taxes, gross_pay, net_pay, tax_deductions, total_deductions, union_contributions,
};

fn selected(payees: &[Payee]) -> impl Iterator<Item = &Payee> {
    payees.iter().filter(|p| p.selected)
}

/// Sums the company totals across selected payees and one-time bills.
///
/// Bills add their amount to gross payroll and net pays; they carry no
/// deductions, taxes or benefits.
pub fn company_totals(payees: &[Payee], bills: &[OneTimeBill], rates: &PayrollRates) -> CompanyTotals {
    let bills_total: Decimal = bills.iter().map(|b| b.amount).sum();
    let mut totals = CompanyTotals {
        number_of_bills: bills.len(),
        total_gross_payroll: bills_total,
        total_net_pays: bills_total,
        ..CompanyTotals::default()
    };

    let mut unionized = 0usize;
    for payee in selected(payees) {
        totals.number_of_payees += 1;
        totals.total_gross_payroll += gross_pay(payee);
        totals.total_net_pays += net_pay(payee);
        totals.total_taxes += tax_deductions(payee);
        totals.total_deductions += total_deductions(payee);
        totals.total_reimbursements += payee.reimbursements.iter().map(|r| r.amount).sum::<Decimal>();
        totals.total_allowances += payee.allowances.iter().map(|a| a.amount).sum::<Decimal>();
        if payee.is_unionized() {
            unionized += 1;
        }
    }
    totals.total_benefits = Decimal::from(unionized) * rates.employer_fringe;

    totals
}

/// Returns the employer share of payroll tax summed over selected payees.
pub fn employer_taxes_total(payees: &[Payee], rates: &PayrollRates) -> Decimal {
    selected(payees).map(|p| employer_taxes(p, rates)).sum()
}

/// Returns union pension, 401k and health fund summed over selected
/// unionized payees.
pub fn company_contributions_total(payees: &[Payee], rates: &PayrollRates) -> Decimal {
    selected(payees)
        .filter_map(|p| union_contributions(p, rates))
        .map(|c| c.total())
        .sum()
}

/// Returns the number of paper checks the run issues.
pub fn number_of_checks(payees: &[Payee], bills: &[OneTimeBill]) -> usize {
    selected(payees).filter(|p| p.is_paid_by_check()).count()
        + bills.iter().filter(|b| b.is_paid_by_check()).count()
}

/// Splits net payments by payment method.
pub fn payment_split(payees: &[Payee], bills: &[OneTimeBill]) -> PaymentSplit {
    let mut split = PaymentSplit::default();
    for payee in selected(payees) {
        split.record(payee.payment_method, net_pay(payee));
    }
    for bill in bills {
        split.record(bill.payment_method, bill.amount);
    }
    split
}
