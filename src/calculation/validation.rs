//! Validation of payee and bill data before it reaches the engine.
//!
//! Malformed enum values are already rejected during deserialization; this
//! module catches what the type system cannot: negative or oversized money
//! and duplicate ids.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{OneTimeBill, Payee};

/// Largest single amount accepted on a payee, bill or rate table.
///
/// Run totals are sums of such amounts, so bounding each one keeps every
/// aggregate far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Checks a single payee.
///
/// Rejects an empty id, a negative or oversized rate, and any negative or
/// oversized adjustment, increment, deduction, allowance or reimbursement.
pub fn validate_payee(payee: &Payee) -> EngineResult<()> {
    if payee.id.trim().is_empty() {
        return Err(invalid(payee, "id", "must not be empty"));
    }
    if payee.rate < Decimal::ZERO {
        return Err(invalid(payee, "rate", "must not be negative"));
    }
    if payee.rate > MAX_AMOUNT {
        return Err(invalid(
            payee,
            "rate",
            &format!("must not exceed {}", MAX_AMOUNT),
        ));
    }

    let records = payee
        .adjustments
        .iter()
        .map(|a| ("adjustments", a.id.as_str(), a.rate))
        .chain(
            payee
                .increments
                .iter()
                .map(|i| ("increments", i.id.as_str(), i.rate)),
        )
        .chain(
            payee
                .deductions
                .iter()
                .map(|d| ("deductions", d.id.as_str(), d.amount)),
        )
        .chain(
            payee
                .allowances
                .iter()
                .map(|a| ("allowances", a.id.as_str(), a.amount)),
        )
        .chain(
            payee
                .reimbursements
                .iter()
                .map(|r| ("reimbursements", r.id.as_str(), r.amount)),
        );

    for (collection, record_id, value) in records {
        if value < Decimal::ZERO {
            return Err(invalid(
                payee,
                collection,
                &format!("record '{}' has negative amount {}", record_id, value),
            ));
        }
        if value > MAX_AMOUNT {
            return Err(invalid(
                payee,
                collection,
                &format!("record '{}' exceeds {}", record_id, MAX_AMOUNT),
            ));
        }
    }

    Ok(())
}

/// Checks every payee and rejects duplicate ids.
pub fn validate_payees(payees: &[Payee]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(payees.len());
    for payee in payees {
        validate_payee(payee)?;
        if !seen.insert(payee.id.as_str()) {
            return Err(EngineError::DuplicatePayee {
                payee_id: payee.id.clone(),
            });
        }
    }
    Ok(())
}

/// Checks a one-time bill at position `index`.
pub fn validate_bill(index: usize, bill: &OneTimeBill) -> EngineResult<()> {
    if bill.business_name.trim().is_empty() {
        return Err(EngineError::InvalidBill {
            index,
            field: "businessName".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if bill.amount < Decimal::ZERO {
        return Err(EngineError::InvalidBill {
            index,
            field: "amount".to_string(),
            message: "must not be negative".to_string(),
        });
    }
    if bill.amount > MAX_AMOUNT {
        return Err(EngineError::InvalidBill {
            index,
            field: "amount".to_string(),
            message: format!("must not exceed {}", MAX_AMOUNT),
        });
    }
    Ok(())
}

/// Checks every one-time bill.
pub fn validate_bills(bills: &[OneTimeBill]) -> EngineResult<()> {
    bills
        .iter()
        .enumerate()
        .try_for_each(|(index, bill)| validate_bill(index, bill))
}

fn invalid(payee: &Payee, field: &str, message: &str) -> EngineError {
    EngineError::InvalidPayee {
        payee_id: payee.id.clone(),
        field: field.to_string(),
        message: message.to_string(),
    }
}
