//! Payroll run engine for production-company payroll.
//!
//! This crate aggregates a payroll run (gross and net pay, employer costs,
//! department and company totals, platform fees), builds per-union reports
//! that must be approved before submit, drives the run through a gated
//! wizard and hands the result to a submission store. An HTTP API exposes
//! the same operations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod submission;
pub mod union_reports;
pub mod wizard;
