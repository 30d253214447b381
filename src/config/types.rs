//! Configuration types for payroll aggregation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every rate the engine
//! applies lives here so no call site hard-codes a constant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::MAX_AMOUNT;
use crate::error::{EngineError, EngineResult};

/// Rates applied to unionized payees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnionRates {
    /// Union dues as a fraction of gross salary.
    pub dues_rate: Decimal,
    /// Company pension contribution as a fraction of capped salary.
    pub pension_rate: Decimal,
    /// Company 401k contribution as a fraction of capped salary.
    pub k401_rate: Decimal,
    /// Flat weekly health fund contribution.
    pub health_fund: Decimal,
    /// Weekly salary above which pension and 401k stop accruing.
    pub salary_cap: Decimal,
}

impl Default for UnionRates {
    fn default() -> Self {
        Self {
            dues_rate: Decimal::new(25, 3),
            pension_rate: Decimal::new(6, 2),
            k401_rate: Decimal::new(4, 2),
            health_fund: Decimal::from(150),
            salary_cap: Decimal::from(7500),
        }
    }
}

/// Rates and labels used by the aggregation engine.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollRates;
/// use rust_decimal::Decimal;
///
/// let rates = PayrollRates::default();
/// assert_eq!(rates.employer_fringe, Decimal::from(150));
/// assert_eq!(rates.postage_per_check, Decimal::new(500, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRates {
    /// Flat weekly health-fund contribution per unionized payee.
    pub employer_fringe: Decimal,
    /// Employer share of payroll tax as a fraction of gross pay.
    pub employer_tax_rate: Decimal,
    /// Platform fee as a fraction of total gross payroll.
    pub greenroom_fee_rate: Decimal,
    /// Postage charged per paper check.
    pub postage_per_check: Decimal,
    /// Label for payees without a department or job title.
    pub unassigned_label: String,
    /// Union contribution rates.
    pub union: UnionRates,
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            employer_fringe: Decimal::from(150),
            employer_tax_rate: Decimal::new(765, 4),
            greenroom_fee_rate: Decimal::new(5, 3),
            postage_per_check: Decimal::new(500, 2),
            unassigned_label: "Unassigned".to_string(),
            union: UnionRates::default(),
        }
    }
}

impl PayrollRates {
    /// Checks that fractional rates lie between zero and one and that
    /// amounts lie between zero and [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        let fractions = [
            ("employer_tax_rate", self.employer_tax_rate),
            ("greenroom_fee_rate", self.greenroom_fee_rate),
            ("union.dues_rate", self.union.dues_rate),
            ("union.pension_rate", self.union.pension_rate),
            ("union.k401_rate", self.union.k401_rate),
        ];
        for (field, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("{} is not between 0 and 1", value),
                });
            }
        }

        let amounts = [
            ("employer_fringe", self.employer_fringe),
            ("postage_per_check", self.postage_per_check),
            ("union.health_fund", self.union.health_fund),
            ("union.salary_cap", self.union.salary_cap),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("{} must not be negative", value),
                });
            }
            if value > MAX_AMOUNT {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("{} exceeds {}", value, MAX_AMOUNT),
                });
            }
        }

        if self.unassigned_label.trim().is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "unassigned_label".to_string(),
                message: "must not be blank".to_string(),
            });
        }

        Ok(())
    }
}

/// The company named on union reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    /// Production company name.
    pub name: String,
    /// Mailing address.
    pub address: String,
    /// Employer identification number.
    pub ein: String,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct PayrollConfig {
    rates: PayrollRates,
    company: CompanyInfo,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(rates: PayrollRates, company: CompanyInfo) -> Self {
        Self { rates, company }
    }

    /// Returns the engine rates.
    pub fn rates(&self) -> &PayrollRates {
        &self.rates
    }

    /// Returns the reporting company.
    pub fn company(&self) -> &CompanyInfo {
        &self.company
    }
}
