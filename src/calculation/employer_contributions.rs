//! Employer-side costs: fringe, payroll tax and union contributions.
//!
//! None of these are deducted from the payee; the company pays them on top
//! of net pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollRates;
use crate::models::Payee;

use super::gross_pay;

/// Company contributions owed for one unionized payee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionContributions {
    /// Pension contribution.
    pub pension: Decimal,
    /// 401k contribution.
    pub k401: Decimal,
    /// Flat health fund contribution.
    pub health_fund: Decimal,
}

impl UnionContributions {
    /// Returns the sum of all three contributions.
    pub fn total(&self) -> Decimal {
        self.pension + self.k401 + self.health_fund
    }
}

/// Returns the flat employer fringe: `rates.employer_fringe` for a
/// unionized payee, zero otherwise.
pub fn employer_fringe(payee: &Payee, rates: &PayrollRates) -> Decimal {
    if payee.is_unionized() {
        rates.employer_fringe
    } else {
        Decimal::ZERO
    }
}

/// Returns the employer share of payroll tax: `gross_pay × employer_tax_rate`.
pub fn employer_taxes(payee: &Payee, rates: &PayrollRates) -> Decimal {
    gross_pay(payee) * rates.employer_tax_rate
}

/// Returns the salary pension and 401k accrue on: the rate, capped at the
/// union salary cap.
pub fn capped_salary(payee: &Payee, rates: &PayrollRates) -> Decimal {
    payee.rate.min(rates.union.salary_cap)
}

/// Returns the union contributions owed for `payee`, or `None` when the
/// payee has no union.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::union_contributions;
/// use payroll_engine::config::PayrollRates;
/// use payroll_engine::models::{Payee, PayeeType, RateType};
/// use rust_decimal::Decimal;
///
/// let mut payee = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(10000));
/// payee.union = Some("DGA".to_string());
///
/// let contributions = union_contributions(&payee, &PayrollRates::default()).unwrap();
/// assert_eq!(contributions.pension, Decimal::from(450));
/// assert_eq!(contributions.k401, Decimal::from(300));
/// assert_eq!(contributions.health_fund, Decimal::from(150));
/// ```
pub fn union_contributions(payee: &Payee, rates: &PayrollRates) -> Option<UnionContributions> {
    if !payee.is_unionized() {
        return None;
    }
    let salary = capped_salary(payee, rates);
    Some(UnionContributions {
        pension: salary * rates.union.pension_rate,
        k401: salary * rates.union.k401_rate,
        health_fund: rates.union.health_fund,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Adjustment, PayeeType, RateType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn payee(rate: &str, union: Option<&str>) -> Payee {
        let mut payee = Payee::new(
            "emp_001",
            "Dana Reyes",
            PayeeType::Employee,
            RateType::Weekly,
            dec(rate),
        );
        payee.union = union.map(str::to_string);
        payee
    }

    #[test]
    fn test_fringe_for_union_payee() {
        let rates = PayrollRates::default();
        assert_eq!(employer_fringe(&payee("2000", Some("IATSE")), &rates), dec("150"));
    }

    #[test]
    fn test_no_fringe_without_union() {
        let rates = PayrollRates::default();
        assert_eq!(employer_fringe(&payee("2000", None), &rates), Decimal::ZERO);
    }

    #[test]
    fn test_fringe_follows_configured_constant() {
        let rates = PayrollRates {
            employer_fringe: dec("175.25"),
            ..PayrollRates::default()
        };
        assert_eq!(
            employer_fringe(&payee("2000", Some("IATSE")), &rates),
            dec("175.25")
        );
    }

    #[test]
    fn test_employer_taxes_on_gross() {
        let rates = PayrollRates::default();
        let mut p = payee("2000", None);
        p.adjustments.push(Adjustment {
            rate: dec("250"),
            ..Adjustment::default()
        });
        // 2250 × 0.0765 = 172.125
        assert_eq!(employer_taxes(&p, &rates), dec("172.125"));
    }

    #[test]
    fn test_union_contributions_below_cap() {
        let rates = PayrollRates::default();
        let c = union_contributions(&payee("2000", Some("IATSE")), &rates).unwrap();
        assert_eq!(c.pension, dec("120"));
        assert_eq!(c.k401, dec("80"));
        assert_eq!(c.health_fund, dec("150"));
        assert_eq!(c.total(), dec("350"));
    }

    #[test]
    fn test_union_contributions_capped_at_salary_cap() {
        let rates = PayrollRates::default();
        let c = union_contributions(&payee("9000", Some("IATSE")), &rates).unwrap();
        assert_eq!(c.pension, dec("450"));
        assert_eq!(c.k401, dec("300"));
    }

    #[test]
    fn test_union_contributions_exactly_at_cap() {
        let rates = PayrollRates::default();
        assert_eq!(
            capped_salary(&payee("7500", Some("IATSE")), &rates),
            dec("7500")
        );
    }

    #[test]
    fn test_no_union_contributions_without_union() {
        let rates = PayrollRates::default();
        assert!(union_contributions(&payee("2000", None), &rates).is_none());
    }
}
