//! Union report generation.
//!
//! Selected payees are partitioned by union. Payees without a union are left
//! out entirely; there is no "unaffiliated" report.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::{adjustments_total, union_contributions};
use crate::config::{CompanyInfo, PayrollRates};
use crate::models::{Payee, UnionPayeeLine, UnionReport, UnionTotals};

use super::mask_ssn;

/// Builds one payee's union report line.
///
/// Dues are `dues_rate × gross`, where gross is salary plus adjustments and
/// increments. Pension and 401k accrue on the capped salary; health is the
/// flat health fund.
///
/// # Examples
///
/// ```
/// use payroll_engine::config::PayrollRates;
/// use payroll_engine::models::{Payee, PayeeType, RateType};
/// use payroll_engine::union_reports::union_payee_line;
/// use rust_decimal::Decimal;
///
/// let mut payee = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(2000));
/// payee.union = Some("IATSE".to_string());
///
/// let line = union_payee_line(&payee, &PayrollRates::default());
/// assert_eq!(line.dues, Decimal::from(50));
/// assert_eq!(line.masked_ssn, "XXXX");
/// ```
pub fn union_payee_line(payee: &Payee, rates: &PayrollRates) -> UnionPayeeLine {
    let salary = payee.rate;
    let adjustments = adjustments_total(payee);
    let gross = salary + adjustments;

    let (pension, k401, health) = match union_contributions(payee, rates) {
        Some(c) => (c.pension, c.k401, c.health_fund),
        None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
    };

    UnionPayeeLine {
        payee_id: payee.id.clone(),
        name: payee.name.clone(),
        job_title: payee.job_title_or(&rates.unassigned_label).to_string(),
        masked_ssn: mask_ssn(payee.ssn.as_deref()),
        salary,
        adjustments,
        gross,
        dues: gross * rates.union.dues_rate,
        health,
        pension,
        k401,
    }
}

/// Generates one report per union among the selected payees.
///
/// Membership comes from the payee's `union` field alone, so a selected
/// vendor, agent or manager carrying a union is reported alongside
/// employees. Reports are ordered by union name and lines by payee id.
/// Every report starts pending (`reviewed == false`).
pub fn generate_union_reports(
    payees: &[Payee],
    rates: &PayrollRates,
    company: &CompanyInfo,
) -> Vec<UnionReport> {
    let mut by_union: BTreeMap<&str, Vec<&Payee>> = BTreeMap::new();
    for payee in payees.iter().filter(|p| p.selected) {
        if let Some(union) = payee.union_name() {
            by_union.entry(union).or_default().push(payee);
        }
    }

    let reports: Vec<UnionReport> = by_union
        .into_iter()
        .map(|(union_name, mut members)| {
            members.sort_by(|a, b| a.id.cmp(&b.id));

            let mut job_title_totals: BTreeMap<String, UnionTotals> = BTreeMap::new();
            let mut union_totals = UnionTotals::default();
            let lines: Vec<UnionPayeeLine> = members
                .into_iter()
                .map(|payee| union_payee_line(payee, rates))
                .collect();

            for line in &lines {
                job_title_totals
                    .entry(line.job_title.clone())
                    .or_default()
                    .add(line);
                union_totals.add(line);
            }

            UnionReport {
                union_name: union_name.to_string(),
                company_info: company.clone(),
                payees: lines,
                job_title_totals,
                union_totals,
                reviewed: false,
            }
        })
        .collect();

    info!(
        unions = reports.len(),
        members = reports.iter().map(|r| r.payees.len()).sum::<usize>(),
        "Generated union reports"
    );

    reports
}
