//! Wizard steps and their linear ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sub-steps of the review stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStep {
    /// Payroll details and totals.
    Details,
    /// Per-union reports awaiting approval.
    UnionReports,
    /// Last look before submitting.
    FinalReview,
}

/// A position in the payroll-run wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Pick the employees to pay.
    Employees,
    /// Pick the vendors to pay.
    Vendors,
    /// Enter ad hoc vendor payments.
    OneTimeBills,
    /// Review the run.
    Review(ReviewStep),
}

impl WizardStep {
    /// The first step of every run.
    pub const FIRST: WizardStep = WizardStep::Employees;

    /// Returns the step after `self`, ignoring gates.
    ///
    /// ```
    /// use payroll_engine::wizard::{ReviewStep, WizardStep};
    ///
    /// assert_eq!(
    ///     WizardStep::OneTimeBills.next(),
    ///     Some(WizardStep::Review(ReviewStep::Details))
    /// );
    /// assert_eq!(WizardStep::Review(ReviewStep::FinalReview).next(), None);
    /// ```
    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Employees => Some(WizardStep::Vendors),
            WizardStep::Vendors => Some(WizardStep::OneTimeBills),
            WizardStep::OneTimeBills => Some(WizardStep::Review(ReviewStep::Details)),
            WizardStep::Review(ReviewStep::Details) => {
                Some(WizardStep::Review(ReviewStep::UnionReports))
            }
            WizardStep::Review(ReviewStep::UnionReports) => {
                Some(WizardStep::Review(ReviewStep::FinalReview))
            }
            WizardStep::Review(ReviewStep::FinalReview) => None,
        }
    }

    /// Returns the step before `self`.
    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Employees => None,
            WizardStep::Vendors => Some(WizardStep::Employees),
            WizardStep::OneTimeBills => Some(WizardStep::Vendors),
            WizardStep::Review(ReviewStep::Details) => Some(WizardStep::OneTimeBills),
            WizardStep::Review(ReviewStep::UnionReports) => {
                Some(WizardStep::Review(ReviewStep::Details))
            }
            WizardStep::Review(ReviewStep::FinalReview) => {
                Some(WizardStep::Review(ReviewStep::UnionReports))
            }
        }
    }

    /// Returns true for the step submit is allowed from.
    pub fn is_final(self) -> bool {
        self == WizardStep::Review(ReviewStep::FinalReview)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Employees => "employees",
            WizardStep::Vendors => "vendors",
            WizardStep::OneTimeBills => "one_time_bills",
            WizardStep::Review(ReviewStep::Details) => "details",
            WizardStep::Review(ReviewStep::UnionReports) => "union_reports",
            WizardStep::Review(ReviewStep::FinalReview) => "final_review",
        };
        f.write_str(name)
    }
}
