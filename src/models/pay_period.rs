//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type describing the window a payroll
//! run covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The date range a payroll run pays for.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let pay_period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
/// };
///
/// assert!(pay_period.validate(NaiveDate::from_ymd_opt(2026, 1, 23).unwrap()).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Checks that the period is well formed and that `pay_date` does not
    /// precede it.
    pub fn validate(&self, pay_date: NaiveDate) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidPayPeriod {
                message: format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            });
        }
        if pay_date < self.start_date {
            return Err(EngineError::InvalidPayPeriod {
                message: format!(
                    "pay date {} is before the period starts on {}",
                    pay_date, self.start_date
                ),
            });
        }
        Ok(())
    }
}
