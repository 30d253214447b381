//! Payroll submission models.
//!
//! A [`PayrollSubmission`] is the terminal artifact of a payroll run. It is
//! created only on submit and never edited afterwards; a correction produces
//! a new draft that points back at the original.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, PaymentSplit, PayrollSummary};
use crate::calculation::round_money;

/// Lifecycle state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Prepared but not yet sent for processing.
    Draft,
    /// Sent for processing.
    Submitted,
    /// Approved for payment.
    Approved,
    /// Paid out.
    Completed,
    /// Superseded by a correction draft.
    Corrected,
}

impl SubmissionStatus {
    /// Returns true if a submission may move from `self` to `next` through a
    /// plain status update.
    ///
    /// `Corrected` is never reachable this way; only a correction request
    /// sets it.
    ///
    /// ```
    /// use payroll_engine::models::SubmissionStatus;
    ///
    /// assert!(SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Approved));
    /// assert!(!SubmissionStatus::Draft.can_transition_to(SubmissionStatus::Completed));
    /// ```
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (SubmissionStatus::Draft, SubmissionStatus::Submitted)
                | (SubmissionStatus::Submitted, SubmissionStatus::Approved)
                | (SubmissionStatus::Approved, SubmissionStatus::Completed)
        )
    }

    /// Returns true if a correction may be requested for a submission in
    /// this state.
    pub fn is_correctable(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Submitted | SubmissionStatus::Approved | SubmissionStatus::Completed
        )
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Completed => "completed",
            SubmissionStatus::Corrected => "corrected",
        };
        f.write_str(name)
    }
}

/// The computed body of a submission, handed to the persistence
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetails {
    /// Period the run pays for.
    pub pay_period: PayPeriod,
    /// Date the money goes out.
    pub pay_date: NaiveDate,
    /// Number of selected payees.
    pub number_of_payees: usize,
    /// Employer share of payroll tax.
    pub employer_taxes: Decimal,
    /// Gross pay of selected payees plus one-time bills.
    pub gross_total: Decimal,
    /// Net payments by method.
    pub payments: PaymentSplit,
    /// Sum of all payee deductions.
    pub deductions: Decimal,
    /// Union pension, 401k and health fund paid by the company.
    pub company_contributions: Decimal,
    /// Platform fees.
    pub fees: Decimal,
    /// Everything the company pays out for this run.
    pub total_payroll_amount: Decimal,
}

impl SubmissionDetails {
    /// Packages a computed summary for submission.
    pub fn from_summary(pay_period: PayPeriod, pay_date: NaiveDate, summary: &PayrollSummary) -> Self {
        Self {
            pay_period,
            pay_date,
            number_of_payees: summary.company.number_of_payees,
            employer_taxes: summary.employer_taxes_total,
            gross_total: summary.company.total_gross_payroll,
            payments: summary.payments,
            deductions: summary.company.total_deductions,
            company_contributions: summary.company_contributions,
            fees: summary.fees.total(),
            total_payroll_amount: summary.total_payroll_amount,
        }
    }
}

/// A stored payroll submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSubmission {
    /// Durable identifier assigned by the store.
    pub id: Uuid,
    /// Key of the submit attempt that created the record.
    pub idempotency_key: Uuid,
    /// Lifecycle state.
    pub status: SubmissionStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// The submission this draft corrects, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrects: Option<Uuid>,
    /// The computed figures.
    #[serde(flatten)]
    pub details: SubmissionDetails,
}

impl PayrollSubmission {
    /// Returns a copy with every money value rounded to currency precision.
    pub fn rounded(&self) -> Self {
        let d = &self.details;
        Self {
            details: SubmissionDetails {
                employer_taxes: round_money(d.employer_taxes),
                gross_total: round_money(d.gross_total),
                payments: d.payments.rounded(),
                deductions: round_money(d.deductions),
                company_contributions: round_money(d.company_contributions),
                fees: round_money(d.fees),
                total_payroll_amount: round_money(d.total_payroll_amount),
                ..d.clone()
            },
            ..self.clone()
        }
    }
}
