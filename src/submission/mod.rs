//! Payroll submission persistence.
//!
//! The engine hands a fully computed [`SubmissionDetails`] to a
//! [`SubmissionStore`] and receives back the confirmed record. Every submit
//! carries an idempotency key so a retry or double click cannot create a
//! second payroll.
//!
//! [`SubmissionDetails`]: crate::models::SubmissionDetails

mod memory;
mod store;

pub use memory::InMemorySubmissionStore;
pub use store::SubmissionStore;
