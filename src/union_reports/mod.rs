//! Union report generation and review gating.
//!
//! Selected payees with a union affiliation are grouped into one
//! [`UnionReport`](crate::models::UnionReport) per union, with per-payee
//! lines, job-title sub-totals and union totals. Reports must each be
//! approved before the final review step opens.

mod generator;
mod masking;
mod review;

pub use generator::{generate_union_reports, union_payee_line};
pub use masking::{MASKED_SSN_UNKNOWN, mask_ssn};
pub use review::{
    ReviewLedger, UNION_REPORTS_STEP, all_reviewed, ensure_all_reviewed, pending_unions,
};
