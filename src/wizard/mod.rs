//! The payroll-run wizard.
//!
//! A run moves linearly through employees, vendors and one-time bills into a
//! review stage of details, union reports and final review. Leaving the
//! employees step needs at least one selected payee; leaving union reports
//! needs every report approved. Submit is only possible from final review.

mod session;
mod step;

pub use session::WizardSession;
pub use step::{ReviewStep, WizardStep};
