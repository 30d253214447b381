//! Whole-run aggregation.
//!
//! [`compute_payroll_summary`] is the single entry point the wizard, the
//! HTTP layer and submission packaging all go through. It is a pure function
//! of its inputs: the same payees, bills and rates always produce the same
//! summary, whatever order the payees arrive in.

use rust_decimal::Decimal;
use tracing::info;

use crate::config::PayrollRates;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, CompanyTotals, OneTimeBill, Payee, PayrollSummary, PlatformFees,
};

use super::{
    company_contributions_total, company_totals, department_totals, employer_taxes_total,
    number_of_checks, payment_split, platform_fees, summarize_payee, validate_bills,
    validate_payees,
};

/// Returns everything the company pays out for the run:
///
/// `total_net_pays + total_taxes + total_reimbursements + total_allowances
/// + employer_taxes + company_contributions + greenroom_fee + postage_fee`.
pub fn total_payroll_amount(
    company: &CompanyTotals,
    employer_taxes: Decimal,
    company_contributions: Decimal,
    fees: &PlatformFees,
) -> Decimal {
    company.total_net_pays
        + company.total_taxes
        + company.total_reimbursements
        + company.total_allowances
        + employer_taxes
        + company_contributions
        + fees.greenroom_fee
        + fees.postage_fee
}

/// Aggregates a payroll run.
///
/// Only payees with `selected == true` are included. Payees are reported in
/// id order so the result does not depend on input order.
///
/// # Errors
///
/// Returns a validation error if any payee (selected or not) or bill fails
/// validation, or if two payees share an id.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll_summary;
/// use payroll_engine::config::PayrollRates;
/// use payroll_engine::models::{Payee, PayeeType, RateType};
/// use rust_decimal::Decimal;
///
/// let mut payee = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(1000));
/// payee.selected = true;
///
/// let summary = compute_payroll_summary(&[payee], &[], &PayrollRates::default())?;
/// assert_eq!(summary.company.total_net_pays, Decimal::from(1000));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn compute_payroll_summary(
    payees: &[Payee],
    bills: &[OneTimeBill],
    rates: &PayrollRates,
) -> EngineResult<PayrollSummary> {
    validate_payees(payees)?;
    validate_bills(bills)?;

    let mut ordered: Vec<&Payee> = payees.iter().filter(|p| p.selected).collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut trace = AuditTrace::default();
    let mut step_number: u32 = 1;
    let mut payee_summaries = Vec::with_capacity(ordered.len());

    for payee in ordered {
        let calculation = summarize_payee(payee, rates, step_number);
        step_number += calculation.audit_steps.len() as u32;
        trace.steps.extend(calculation.audit_steps);
        trace.warnings.extend(calculation.warnings);
        payee_summaries.push(calculation.summary);
    }

    let departments = department_totals(payees, rates);
    let company = company_totals(payees, bills, rates);
    let employer_taxes = employer_taxes_total(payees, rates);
    let contributions = company_contributions_total(payees, rates);
    let checks = number_of_checks(payees, bills);
    let fees = platform_fees(company.total_gross_payroll, checks, rates);
    let payments = payment_split(payees, bills);
    let total = total_payroll_amount(&company, employer_taxes, contributions, &fees);

    trace.steps.push(AuditStep {
        step_number,
        rule_id: "company_totals".to_string(),
        rule_name: "Company Totals".to_string(),
        payee_id: None,
        input: serde_json::json!({
            "selected_payees": company.number_of_payees,
            "one_time_bills": company.number_of_bills,
        }),
        output: serde_json::json!({
            "total_gross_payroll": company.total_gross_payroll.normalize().to_string(),
            "total_net_pays": company.total_net_pays.normalize().to_string(),
            "total_taxes": company.total_taxes.normalize().to_string(),
            "total_deductions": company.total_deductions.normalize().to_string(),
            "total_benefits": company.total_benefits.normalize().to_string(),
        }),
        reasoning: format!(
            "{} payees and {} bills: ${} gross, ${} net",
            company.number_of_payees,
            company.number_of_bills,
            company.total_gross_payroll.normalize(),
            company.total_net_pays.normalize()
        ),
    });
    step_number += 1;

    trace.steps.push(AuditStep {
        step_number,
        rule_id: "platform_fees".to_string(),
        rule_name: "Platform Fees".to_string(),
        payee_id: None,
        input: serde_json::json!({
            "total_gross_payroll": company.total_gross_payroll.normalize().to_string(),
            "greenroom_fee_rate": rates.greenroom_fee_rate.normalize().to_string(),
            "number_of_checks": checks,
            "postage_per_check": rates.postage_per_check.normalize().to_string(),
        }),
        output: serde_json::json!({
            "greenroom_fee": fees.greenroom_fee.normalize().to_string(),
            "postage_fee": fees.postage_fee.normalize().to_string(),
        }),
        reasoning: format!(
            "${} × {} = ${} Greenroom fee; {} checks × ${} = ${} postage",
            company.total_gross_payroll.normalize(),
            rates.greenroom_fee_rate.normalize(),
            fees.greenroom_fee.normalize(),
            checks,
            rates.postage_per_check.normalize(),
            fees.postage_fee.normalize()
        ),
    });
    step_number += 1;

    trace.steps.push(AuditStep {
        step_number,
        rule_id: "total_payroll_amount".to_string(),
        rule_name: "Total Payroll Amount".to_string(),
        payee_id: None,
        input: serde_json::json!({
            "total_net_pays": company.total_net_pays.normalize().to_string(),
            "total_taxes": company.total_taxes.normalize().to_string(),
            "total_reimbursements": company.total_reimbursements.normalize().to_string(),
            "total_allowances": company.total_allowances.normalize().to_string(),
            "employer_taxes": employer_taxes.normalize().to_string(),
            "company_contributions": contributions.normalize().to_string(),
            "greenroom_fee": fees.greenroom_fee.normalize().to_string(),
            "postage_fee": fees.postage_fee.normalize().to_string(),
        }),
        output: serde_json::json!({
            "total_payroll_amount": total.normalize().to_string(),
        }),
        reasoning: format!(
            "Net pays, taxes, reimbursements, allowances, employer taxes, contributions and fees sum to ${}",
            total.normalize()
        ),
    });

    info!(
        payees = company.number_of_payees,
        bills = company.number_of_bills,
        departments = departments.len(),
        total_payroll_amount = %total,
        warnings = trace.warnings.len(),
        "Computed payroll summary"
    );

    Ok(PayrollSummary {
        payees: payee_summaries,
        departments,
        company,
        employer_taxes_total: employer_taxes,
        company_contributions: contributions,
        fees,
        payments,
        total_payroll_amount: total,
        audit_trace: trace,
    })
}
