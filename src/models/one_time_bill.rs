//! One-time bill model.
//!
//! A [`OneTimeBill`] pays a vendor that never went through onboarding. Bills
//! live only inside one wizard session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentMethod;

/// An ad hoc vendor payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneTimeBill {
    /// Legal name of the business being paid.
    pub business_name: String,
    /// Mailing address.
    pub address: String,
    /// Employer identification number.
    pub ein: String,
    /// Free-form remittance instructions.
    pub payment_instructions: String,
    /// Amount to pay.
    pub amount: Decimal,
    /// Accounting code.
    pub code: String,
    /// Accounting class.
    pub class: String,
    /// How the bill is paid.
    pub payment_method: PaymentMethod,
}

impl OneTimeBill {
    /// Creates an ACH bill for `amount` with empty remittance details.
    pub fn new(business_name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            business_name: business_name.into(),
            amount,
            ..Self::default()
        }
    }

    /// Returns true if a mailed check will be issued for this bill.
    pub fn is_paid_by_check(&self) -> bool {
        self.payment_method == PaymentMethod::Check
    }
}
