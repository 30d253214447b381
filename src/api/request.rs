//! Request types for the payroll API.
//!
//! Payees and bills are accepted in the same camelCase shape the engine's
//! models use. Absent optional collections default to empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{OneTimeBill, PayPeriod, Payee, SubmissionStatus};

/// Request body for `POST /payroll/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// Every payee of the run; only selected ones count.
    pub payees: Vec<Payee>,
    /// Ad hoc vendor payments.
    #[serde(default)]
    pub one_time_bills: Vec<OneTimeBill>,
}

/// Request body for `POST /payroll/union-reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionReportsRequest {
    /// Every payee of the run; only selected, unionized ones are reported.
    pub payees: Vec<Payee>,
}

/// Request body for `POST /submissions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    /// The period being paid.
    pub pay_period: PayPeriod,
    /// The date the money goes out.
    pub pay_date: NaiveDate,
    /// Every payee of the run.
    pub payees: Vec<Payee>,
    /// Ad hoc vendor payments.
    #[serde(default)]
    pub one_time_bills: Vec<OneTimeBill>,
    /// Names of the union reports the user approved.
    #[serde(default)]
    pub reviewed_unions: Vec<String>,
}

/// Request body for `POST /submissions/:id/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// The status to move to.
    pub status: SubmissionStatus,
}
