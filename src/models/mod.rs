//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod one_time_bill;
mod pay_period;
mod payee;
mod payroll_summary;
mod submission;
mod union_report;

pub use one_time_bill::OneTimeBill;
pub use pay_period::PayPeriod;
pub use payee::{
    Adjustment, Allowance, Deduction, DeductionType, Increment, OnboardingStatus, Payee,
    PayeeGroup, PayeeType, PaymentMethod, RateType, Reimbursement,
};
pub use payroll_summary::{
    AuditStep, AuditTrace, AuditWarning, CompanyTotals, DepartmentTotals, MethodTotal,
    PayeeSummary, PaymentSplit, PayrollSummary, PlatformFees,
};
pub use submission::{PayrollSubmission, SubmissionDetails, SubmissionStatus};
pub use union_report::{ReviewStatus, UnionPayeeLine, UnionReport, UnionTotals};
