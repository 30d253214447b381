//! Union report review gating.
//!
//! Reports are regenerated on demand, so approvals cannot live on the report
//! itself. A [`ReviewLedger`] remembers the exact content each approval was
//! given for; a report reads as reviewed only while its content still
//! matches.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::UnionReport;

/// Name of the gated step in blocking explanations.
pub const UNION_REPORTS_STEP: &str = "union_reports";

/// Session-local record of which union reports the user approved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewLedger {
    approved: BTreeMap<String, UnionReport>,
}

impl ReviewLedger {
    /// Creates an empty ledger; every report starts pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Approves `report` as it currently reads.
    pub fn mark_reviewed(&mut self, report: &UnionReport) {
        let snapshot = UnionReport {
            reviewed: false,
            ..report.clone()
        };
        info!(union = %report.union_name, "Union report marked reviewed");
        self.approved.insert(report.union_name.clone(), snapshot);
    }

    /// Withdraws the approval for `union_name`, if any.
    pub fn mark_unreviewed(&mut self, union_name: &str) {
        if self.approved.remove(union_name).is_some() {
            info!(union = %union_name, "Union report marked unreviewed");
        }
    }

    /// Returns true if `report` was approved with its current content.
    pub fn is_reviewed(&self, report: &UnionReport) -> bool {
        self.approved.get(&report.union_name).is_some_and(|approved| {
            approved.company_info == report.company_info
                && approved.payees == report.payees
                && approved.job_title_totals == report.job_title_totals
                && approved.union_totals == report.union_totals
        })
    }

    /// Sets each report's `reviewed` flag from the ledger.
    pub fn apply(&self, reports: Vec<UnionReport>) -> Vec<UnionReport> {
        reports
            .into_iter()
            .map(|report| {
                let reviewed = self.is_reviewed(&report);
                UnionReport { reviewed, ..report }
            })
            .collect()
    }

    /// Forgets every approval.
    pub fn clear(&mut self) {
        self.approved.clear();
    }
}

/// Returns the names of reports that are still pending.
pub fn pending_unions(reports: &[UnionReport]) -> Vec<&str> {
    reports
        .iter()
        .filter(|r| !r.reviewed)
        .map(|r| r.union_name.as_str())
        .collect()
}

/// Returns true if every report is reviewed. Vacuously true for no reports.
pub fn all_reviewed(reports: &[UnionReport]) -> bool {
    reports.iter().all(|r| r.reviewed)
}

/// Fails with a blocking explanation unless every report is reviewed.
pub fn ensure_all_reviewed(reports: &[UnionReport]) -> EngineResult<()> {
    let pending = pending_unions(reports);
    if pending.is_empty() {
        return Ok(());
    }

    warn!(pending = ?pending, "Union reports awaiting review");
    Err(EngineError::StepBlocked {
        step: UNION_REPORTS_STEP.to_string(),
        reason: format!(
            "{} union report(s) still need review: {}",
            pending.len(),
            pending.join(", ")
        ),
    })
}
