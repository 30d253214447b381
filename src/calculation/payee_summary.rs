//! Per-payee aggregation.
//!
//! This module combines the individual rules into one [`PayeeSummary`] and
//! records an audit step for each rule it applied.

use rust_decimal::Decimal;

use crate::config::PayrollRates;
use crate::models::{
    AuditStep, AuditWarning, OnboardingStatus, Payee, PayeeSummary, PayeeType,
};

use super::{
    adjustments_total, employer_fringe, employer_taxes, gross_pay, net_pay, tax_deductions,
    total_deductions, union_contributions,
};

/// Warning code for a selected payee whose onboarding is incomplete.
pub const WARNING_NOT_ONBOARDED: &str = "PAYEE_NOT_ONBOARDED";

/// Warning code for a selected employee whose timesheet was rejected or is
/// still awaiting approval.
pub const WARNING_TIMESHEET_NOT_APPROVED: &str = "TIMESHEET_NOT_APPROVED";

/// Warning code for a payee whose deductions exceed gross pay.
pub const WARNING_NEGATIVE_NET_PAY: &str = "NEGATIVE_NET_PAY";

/// The result of summarizing one payee.
#[derive(Debug, Clone)]
pub struct PayeeCalculation {
    /// The derived figures.
    pub summary: PayeeSummary,
    /// One step per rule applied, numbered from the `step_number` passed in.
    pub audit_steps: Vec<AuditStep>,
    /// Data quality warnings.
    pub warnings: Vec<AuditWarning>,
}

/// Derives every per-payee figure for `payee`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::summarize_payee;
/// use payroll_engine::config::PayrollRates;
/// use payroll_engine::models::{Payee, PayeeType, RateType};
/// use rust_decimal::Decimal;
///
/// let payee = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(1000));
/// let result = summarize_payee(&payee, &PayrollRates::default(), 1);
///
/// assert_eq!(result.summary.net_pay, Decimal::from(1000));
/// assert_eq!(result.audit_steps.len(), 3);
/// assert_eq!(result.audit_steps[2].step_number, 3);
/// ```
pub fn summarize_payee(payee: &Payee, rates: &PayrollRates, step_number: u32) -> PayeeCalculation {
    let adjustments = adjustments_total(payee);
    let gross = gross_pay(payee);
    let deductions = total_deductions(payee);
    let taxes = tax_deductions(payee);
    let net = net_pay(payee);
    let fringe = employer_fringe(payee, rates);
    let employer_tax = employer_taxes(payee, rates);
    let contributions = union_contributions(payee, rates);
    let contributions_total = contributions.map(|c| c.total()).unwrap_or(Decimal::ZERO);
    let reimbursements: Decimal = payee.reimbursements.iter().map(|r| r.amount).sum();
    let allowances: Decimal = payee.allowances.iter().map(|a| a.amount).sum();

    let gross_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        payee_id: Some(payee.id.clone()),
        input: serde_json::json!({
            "rate": payee.rate.normalize().to_string(),
            "rate_type": payee.rate_type,
            "adjustment_count": payee.adjustments.len(),
            "increment_count": payee.increments.len(),
        }),
        output: serde_json::json!({
            "adjustments": adjustments.normalize().to_string(),
            "gross_pay": gross.normalize().to_string(),
        }),
        reasoning: format!(
            "${} rate + ${} adjustments and increments = ${}",
            payee.rate.normalize(),
            adjustments.normalize(),
            gross.normalize()
        ),
    };

    let deductions_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "deductions".to_string(),
        rule_name: "Deductions and Net Pay".to_string(),
        payee_id: Some(payee.id.clone()),
        input: serde_json::json!({
            "gross_pay": gross.normalize().to_string(),
            "deduction_count": payee.deductions.len(),
        }),
        output: serde_json::json!({
            "total_deductions": deductions.normalize().to_string(),
            "tax_deductions": taxes.normalize().to_string(),
            "net_pay": net.normalize().to_string(),
        }),
        reasoning: format!(
            "${} gross - ${} deductions = ${} net",
            gross.normalize(),
            deductions.normalize(),
            net.normalize()
        ),
    };

    let employer_reasoning = match (payee.union_name(), contributions) {
        (Some(union), Some(c)) => format!(
            "Unionized ({}): ${} fringe, ${} pension + ${} 401k + ${} health fund; ${} employer tax",
            union,
            fringe.normalize(),
            c.pension.normalize(),
            c.k401.normalize(),
            c.health_fund.normalize(),
            employer_tax.normalize()
        ),
        _ => format!(
            "No union affiliation: no fringe or union contributions; ${} employer tax",
            employer_tax.normalize()
        ),
    };

    let employer_step = AuditStep {
        step_number: step_number + 2,
        rule_id: "employer_costs".to_string(),
        rule_name: "Employer Costs".to_string(),
        payee_id: Some(payee.id.clone()),
        input: serde_json::json!({
            "union": payee.union_name(),
            "gross_pay": gross.normalize().to_string(),
            "employer_tax_rate": rates.employer_tax_rate.normalize().to_string(),
        }),
        output: serde_json::json!({
            "employer_fringe": fringe.normalize().to_string(),
            "employer_taxes": employer_tax.normalize().to_string(),
            "company_contributions": contributions_total.normalize().to_string(),
        }),
        reasoning: employer_reasoning,
    };

    let summary = PayeeSummary {
        payee_id: payee.id.clone(),
        name: payee.name.clone(),
        payee_type: payee.payee_type,
        department: payee.department_or(&rates.unassigned_label).to_string(),
        union: payee.union_name().map(str::to_string),
        wages: payee.rate,
        adjustments,
        gross_pay: gross,
        total_deductions: deductions,
        tax_deductions: taxes,
        net_pay: net,
        employer_fringe: fringe,
        employer_taxes: employer_tax,
        company_contributions: contributions_total,
        reimbursements,
        allowances,
        payment_method: payee.payment_method,
    };

    PayeeCalculation {
        summary,
        audit_steps: vec![gross_step, deductions_step, employer_step],
        warnings: payee_warnings(payee, net),
    }
}

fn payee_warnings(payee: &Payee, net: Decimal) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if payee.onboarding_status == OnboardingStatus::NotOnboarded {
        warnings.push(AuditWarning {
            code: WARNING_NOT_ONBOARDED.to_string(),
            message: format!("Payee '{}' has not completed onboarding", payee.id),
            severity: "medium".to_string(),
        });
    }

    if payee.payee_type == PayeeType::Employee && payee.timesheet_approved == Some(false) {
        warnings.push(AuditWarning {
            code: WARNING_TIMESHEET_NOT_APPROVED.to_string(),
            message: format!("Timesheet for '{}' is not approved", payee.id),
            severity: "high".to_string(),
        });
    }

    if net < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: WARNING_NEGATIVE_NET_PAY.to_string(),
            message: format!(
                "Deductions for '{}' exceed gross pay (net ${})",
                payee.id,
                net.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Adjustment, Allowance, Deduction, DeductionType, PaymentMethod, RateType, Reimbursement,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scenario_payee() -> Payee {
        let mut payee = Payee::new(
            "emp_001",
            "Dana Reyes",
            PayeeType::Employee,
            RateType::Weekly,
            dec("2000"),
        );
        payee.onboarding_status = OnboardingStatus::Onboarded;
        payee.union = Some("IATSE Local 600".to_string());
        payee.department = Some("Camera".to_string());
        payee.adjustments.push(Adjustment {
            rate: dec("250"),
            ..Adjustment::default()
        });
        payee.deductions = vec![
            Deduction {
                amount: dec("62.50"),
                deduction_type: DeductionType::UnionDues,
                ..Deduction::default()
            },
            Deduction {
                amount: dec("250"),
                deduction_type: DeductionType::K401,
                ..Deduction::default()
            },
            Deduction {
                amount: dec("625"),
                deduction_type: DeductionType::Tax,
                ..Deduction::default()
            },
        ];
        payee
    }

    #[test]
    fn test_scenario_figures() {
        let result = summarize_payee(&scenario_payee(), &PayrollRates::default(), 1);
        let s = result.summary;

        assert_eq!(s.gross_pay, dec("2250"));
        assert_eq!(s.total_deductions, dec("937.50"));
        assert_eq!(s.net_pay, dec("1312.50"));
        assert_eq!(s.tax_deductions, dec("625"));
        assert_eq!(s.employer_fringe, dec("150"));
        assert_eq!(s.employer_taxes, dec("172.125"));
        // 2000 × 0.06 + 2000 × 0.04 + 150
        assert_eq!(s.company_contributions, dec("350"));
        assert_eq!(s.department, "Camera");
        assert_eq!(s.union.as_deref(), Some("IATSE Local 600"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_audit_steps_are_numbered_from_offset() {
        let result = summarize_payee(&scenario_payee(), &PayrollRates::default(), 10);
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![10, 11, 12]);
        assert_eq!(result.audit_steps[0].rule_id, "gross_pay");
        assert_eq!(result.audit_steps[0].output["gross_pay"], "2250");
        assert_eq!(result.audit_steps[1].output["net_pay"], "1312.5");
    }

    #[test]
    fn test_reimbursements_and_allowances_summed() {
        let mut payee = scenario_payee();
        payee.reimbursements.push(Reimbursement {
            amount: dec("40.10"),
            ..Reimbursement::default()
        });
        payee.allowances.push(Allowance {
            amount: dec("25"),
            taxable: true,
            ..Allowance::default()
        });
        payee.payment_method = PaymentMethod::Check;

        let s = summarize_payee(&payee, &PayrollRates::default(), 1).summary;
        assert_eq!(s.reimbursements, dec("40.10"));
        assert_eq!(s.allowances, dec("25"));
        assert_eq!(s.payment_method, PaymentMethod::Check);
        // Reimbursements and allowances are not part of gross pay.
        assert_eq!(s.gross_pay, dec("2250"));
    }

    #[test]
    fn test_non_union_payee_has_no_employer_contributions() {
        let mut payee = scenario_payee();
        payee.union = None;
        let s = summarize_payee(&payee, &PayrollRates::default(), 1).summary;
        assert_eq!(s.employer_fringe, Decimal::ZERO);
        assert_eq!(s.company_contributions, Decimal::ZERO);
    }

    #[test]
    fn test_missing_department_uses_unassigned_label() {
        let mut payee = scenario_payee();
        payee.department = None;
        let s = summarize_payee(&payee, &PayrollRates::default(), 1).summary;
        assert_eq!(s.department, "Unassigned");
    }

    #[test]
    fn test_warnings() {
        let mut payee = scenario_payee();
        payee.onboarding_status = OnboardingStatus::NotOnboarded;
        payee.timesheet_approved = Some(false);
        payee.deductions.push(Deduction {
            amount: dec("10000"),
            ..Deduction::default()
        });

        let result = summarize_payee(&payee, &PayrollRates::default(), 1);
        let codes: Vec<&str> = result.warnings.iter().map(|w| w.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                WARNING_NOT_ONBOARDED,
                WARNING_TIMESHEET_NOT_APPROVED,
                WARNING_NEGATIVE_NET_PAY
            ]
        );
        assert!(result.summary.net_pay < Decimal::ZERO);
    }

    #[test]
    fn test_unknown_timesheet_state_is_not_flagged() {
        let mut payee = scenario_payee();
        payee.timesheet_approved = None;
        let result = summarize_payee(&payee, &PayrollRates::default(), 1);
        assert!(result.warnings.is_empty());
    }
}
