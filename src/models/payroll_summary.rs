//! Payroll summary models.
//!
//! This module contains the [`PayrollSummary`] type and the structures it is
//! built from: per-payee figures, department totals, company totals, platform
//! fees, the payment split and the audit trace explaining every figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayeeType, PaymentMethod};
use crate::calculation::round_money;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The payee the step concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag data worth a second look; they never block a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a payroll summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Derived figures for one payee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeSummary {
    /// The payee's id.
    pub payee_id: String,
    /// The payee's display name.
    pub name: String,
    /// The kind of payee.
    pub payee_type: PayeeType,
    /// Department the payee is grouped under.
    pub department: String,
    /// Union affiliation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union: Option<String>,
    /// Base rate.
    pub wages: Decimal,
    /// Sum of adjustment and increment rates.
    pub adjustments: Decimal,
    /// Base rate plus adjustments and increments.
    pub gross_pay: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Sum of tax deductions.
    pub tax_deductions: Decimal,
    /// Gross pay minus all deductions. May be negative.
    pub net_pay: Decimal,
    /// Flat employer health-fund contribution.
    pub employer_fringe: Decimal,
    /// Employer share of payroll tax.
    pub employer_taxes: Decimal,
    /// Union pension, 401k and health fund paid by the company.
    pub company_contributions: Decimal,
    /// Sum of reimbursements.
    pub reimbursements: Decimal,
    /// Sum of allowances.
    pub allowances: Decimal,
    /// How the payee receives money.
    pub payment_method: PaymentMethod,
}

/// Totals for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentTotals {
    /// Department name.
    pub department: String,
    /// Number of selected payees in the department.
    pub headcount: usize,
    /// Sum of base rates.
    pub wages: Decimal,
    /// Sum of adjustment and increment rates.
    pub adjustments: Decimal,
    /// Sum of employer fringe.
    pub contributions: Decimal,
    /// Sum of tax deductions.
    pub taxes: Decimal,
}

/// Company-wide totals across selected payees and one-time bills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTotals {
    /// Number of selected payees.
    pub number_of_payees: usize,
    /// Number of one-time bills.
    pub number_of_bills: usize,
    /// Gross pay of selected payees plus bill amounts.
    pub total_gross_payroll: Decimal,
    /// Net pay of selected payees plus bill amounts.
    pub total_net_pays: Decimal,
    /// Sum of tax deductions.
    pub total_taxes: Decimal,
    /// Sum of reimbursements.
    pub total_reimbursements: Decimal,
    /// Sum of allowances.
    pub total_allowances: Decimal,
    /// Unionized payees times the flat employer fringe.
    pub total_benefits: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
}

/// Fees charged by the platform for running the payroll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFees {
    /// Percentage fee on total gross payroll.
    pub greenroom_fee: Decimal,
    /// Number of paper checks issued.
    pub number_of_checks: usize,
    /// Flat postage per check.
    pub postage_fee: Decimal,
}

impl PlatformFees {
    /// Returns the sum of all fees.
    pub fn total(&self) -> Decimal {
        self.greenroom_fee + self.postage_fee
    }
}

/// Count and net amount paid through one payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotal {
    /// Number of payments.
    pub count: usize,
    /// Net amount paid.
    pub amount: Decimal,
}

/// Net payments broken down by payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSplit {
    /// Direct deposits.
    pub ach: MethodTotal,
    /// Paper checks.
    pub check: MethodTotal,
}

impl PaymentSplit {
    /// Records one payment of `amount` through `method`.
    pub fn record(&mut self, method: PaymentMethod, amount: Decimal) {
        let bucket = match method {
            PaymentMethod::Ach => &mut self.ach,
            PaymentMethod::Check => &mut self.check,
        };
        bucket.count += 1;
        bucket.amount += amount;
    }
}

/// The complete, self-consistent result of aggregating a payroll run.
///
/// All money values carry full precision; call [`PayrollSummary::rounded`]
/// before showing them to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    /// Per-payee figures for every selected payee.
    pub payees: Vec<PayeeSummary>,
    /// Totals per department, sorted by department name.
    pub departments: Vec<DepartmentTotals>,
    /// Company-wide totals.
    pub company: CompanyTotals,
    /// Employer share of payroll tax across selected payees.
    pub employer_taxes_total: Decimal,
    /// Union pension, 401k and health fund paid by the company.
    pub company_contributions: Decimal,
    /// Platform fees.
    pub fees: PlatformFees,
    /// Net payments by method.
    pub payments: PaymentSplit,
    /// Everything the company pays out for this run.
    pub total_payroll_amount: Decimal,
    /// How each figure was reached.
    pub audit_trace: AuditTrace,
}

impl PayrollSummary {
    /// Returns a copy with every money value rounded to currency precision.
    pub fn rounded(&self) -> Self {
        let payees = self
            .payees
            .iter()
            .map(|p| PayeeSummary {
                wages: round_money(p.wages),
                adjustments: round_money(p.adjustments),
                gross_pay: round_money(p.gross_pay),
                total_deductions: round_money(p.total_deductions),
                tax_deductions: round_money(p.tax_deductions),
                net_pay: round_money(p.net_pay),
                employer_fringe: round_money(p.employer_fringe),
                employer_taxes: round_money(p.employer_taxes),
                company_contributions: round_money(p.company_contributions),
                reimbursements: round_money(p.reimbursements),
                allowances: round_money(p.allowances),
                ..p.clone()
            })
            .collect();

        let departments = self
            .departments
            .iter()
            .map(|d| DepartmentTotals {
                wages: round_money(d.wages),
                adjustments: round_money(d.adjustments),
                contributions: round_money(d.contributions),
                taxes: round_money(d.taxes),
                ..d.clone()
            })
            .collect();

        let company = CompanyTotals {
            total_gross_payroll: round_money(self.company.total_gross_payroll),
            total_net_pays: round_money(self.company.total_net_pays),
            total_taxes: round_money(self.company.total_taxes),
            total_reimbursements: round_money(self.company.total_reimbursements),
            total_allowances: round_money(self.company.total_allowances),
            total_benefits: round_money(self.company.total_benefits),
            total_deductions: round_money(self.company.total_deductions),
            ..self.company.clone()
        };

        Self {
            payees,
            departments,
            company,
            employer_taxes_total: round_money(self.employer_taxes_total),
            company_contributions: round_money(self.company_contributions),
            fees: PlatformFees {
                greenroom_fee: round_money(self.fees.greenroom_fee),
                number_of_checks: self.fees.number_of_checks,
                postage_fee: round_money(self.fees.postage_fee),
            },
            payments: self.payments.rounded(),
            total_payroll_amount: round_money(self.total_payroll_amount),
            audit_trace: self.audit_trace.clone(),
        }
    }
}

impl PaymentSplit {
    /// Returns a copy with both amounts rounded to currency precision.
    pub fn rounded(&self) -> Self {
        Self {
            ach: MethodTotal {
                count: self.ach.count,
                amount: round_money(self.ach.amount),
            },
            check: MethodTotal {
                count: self.check.count,
                amount: round_money(self.check.amount),
            },
        }
    }
}
