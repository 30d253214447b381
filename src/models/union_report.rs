//! Union report models.
//!
//! Union reports are derived from the selected payees on demand and are never
//! stored on their own. Only the `reviewed` flag is session state.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CompanyInfo;

/// Approval state of a union report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Not yet approved by the user.
    Pending,
    /// Approved by the user.
    Reviewed,
}

/// Summed union figures for a job title or a whole union.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionTotals {
    /// Number of payee lines summed.
    pub headcount: usize,
    /// Base salary.
    pub salary: Decimal,
    /// Adjustments and increments.
    pub adjustments: Decimal,
    /// Salary plus adjustments.
    pub gross: Decimal,
    /// Union dues.
    pub dues: Decimal,
    /// Health fund contribution.
    pub health: Decimal,
    /// Pension contribution.
    pub pension: Decimal,
    /// 401k contribution.
    pub k401: Decimal,
}

impl UnionTotals {
    /// Adds one payee line into the totals.
    pub fn add(&mut self, line: &UnionPayeeLine) {
        self.headcount += 1;
        self.salary += line.salary;
        self.adjustments += line.adjustments;
        self.gross += line.gross;
        self.dues += line.dues;
        self.health += line.health;
        self.pension += line.pension;
        self.k401 += line.k401;
    }
}

/// One payee's line on a union report.
///
/// Carries a masked SSN only; the raw number never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionPayeeLine {
    /// The payee's id.
    pub payee_id: String,
    /// The payee's display name.
    pub name: String,
    /// Job title the line is sub-totalled under.
    pub job_title: String,
    /// SSN reduced to its last four digits.
    pub masked_ssn: String,
    /// Base salary.
    pub salary: Decimal,
    /// Adjustments and increments.
    pub adjustments: Decimal,
    /// Salary plus adjustments.
    pub gross: Decimal,
    /// Union dues.
    pub dues: Decimal,
    /// Health fund contribution.
    pub health: Decimal,
    /// Pension contribution.
    pub pension: Decimal,
    /// 401k contribution.
    pub k401: Decimal,
}

/// Per-union summary required for union compliance reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionReport {
    /// The union the report is for.
    pub union_name: String,
    /// The reporting company.
    pub company_info: CompanyInfo,
    /// One line per payee, ordered by payee id.
    pub payees: Vec<UnionPayeeLine>,
    /// Totals per job title.
    pub job_title_totals: BTreeMap<String, UnionTotals>,
    /// Totals across the union.
    pub union_totals: UnionTotals,
    /// Whether the user approved this report.
    pub reviewed: bool,
}

impl UnionReport {
    /// Returns the approval state.
    pub fn status(&self) -> ReviewStatus {
        if self.reviewed {
            ReviewStatus::Reviewed
        } else {
            ReviewStatus::Pending
        }
    }
}
