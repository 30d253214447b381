//! The in-memory state of one payroll run.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{compute_payroll_summary, validate_bill, validate_payee, validate_payees};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    OneTimeBill, PayPeriod, Payee, PayeeGroup, PayrollSubmission, PayrollSummary,
    SubmissionDetails, UnionReport,
};
use crate::submission::SubmissionStore;
use crate::union_reports::{ensure_all_reviewed, generate_union_reports, ReviewLedger};

use super::step::{ReviewStep, WizardStep};

/// One user's payroll run, from payee selection to submit.
///
/// The session owns every piece of data the wizard collects. Navigating back
/// and forth never discards it. Totals and union reports are recomputed from
/// the current data each time they are asked for.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{PayPeriod, Payee, PayeeType, RateType};
/// use payroll_engine::submission::InMemorySubmissionStore;
/// use payroll_engine::wizard::WizardSession;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
/// };
/// let payee = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(1000));
///
/// let mut session = WizardSession::new(
///     period,
///     NaiveDate::from_ymd_opt(2026, 1, 23).unwrap(),
///     vec![payee],
///     PayrollConfig::default(),
/// )?;
/// session.set_selected("emp_001", true)?;
/// while !session.current_step().is_final() {
///     session.advance()?;
/// }
///
/// let store = InMemorySubmissionStore::new();
/// let submission = session.submit(&store)?;
/// assert_eq!(submission.details.number_of_payees, 1);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WizardSession {
    pay_period: PayPeriod,
    pay_date: NaiveDate,
    payees: Vec<Payee>,
    bills: Vec<OneTimeBill>,
    config: PayrollConfig,
    step: WizardStep,
    ledger: ReviewLedger,
    idempotency_key: Uuid,
    submitted: Option<Uuid>,
}

impl WizardSession {
    /// Opens a run over `payees`, starting at the employees step.
    ///
    /// Fails if the pay period is malformed or any payee is invalid.
    pub fn new(
        pay_period: PayPeriod,
        pay_date: NaiveDate,
        payees: Vec<Payee>,
        config: PayrollConfig,
    ) -> EngineResult<Self> {
        pay_period.validate(pay_date)?;
        validate_payees(&payees)?;

        let session = Self {
            pay_period,
            pay_date,
            payees,
            bills: Vec::new(),
            config,
            step: WizardStep::FIRST,
            ledger: ReviewLedger::new(),
            idempotency_key: Uuid::new_v4(),
            submitted: None,
        };
        info!(
            idempotency_key = %session.idempotency_key,
            payees = session.payees.len(),
            start_date = %pay_period.start_date,
            end_date = %pay_period.end_date,
            "Opened payroll session"
        );
        Ok(session)
    }

    /// Replaces the generated idempotency key with one supplied by a caller
    /// that retries on its own.
    pub fn with_idempotency_key(mut self, key: Uuid) -> Self {
        self.idempotency_key = key;
        self
    }

    /// Returns the step the wizard is on.
    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    /// Returns the key every submit attempt of this session carries.
    pub fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }

    /// Returns the id of the submission this session produced, if any.
    pub fn submission_id(&self) -> Option<Uuid> {
        self.submitted
    }

    /// Returns the period being paid.
    pub fn pay_period(&self) -> PayPeriod {
        self.pay_period
    }

    /// Returns the date the money goes out.
    pub fn pay_date(&self) -> NaiveDate {
        self.pay_date
    }

    /// Returns every payee, selected or not.
    pub fn payees(&self) -> &[Payee] {
        &self.payees
    }

    /// Returns the payees shown on the employees or vendors screen.
    pub fn payees_in_group(&self, group: PayeeGroup) -> Vec<&Payee> {
        self.payees
            .iter()
            .filter(|p| p.payee_type.group() == group)
            .collect()
    }

    /// Returns the one-time bills in entry order.
    pub fn bills(&self) -> &[OneTimeBill] {
        &self.bills
    }

    /// Moves to the next step if the current step's gate allows it.
    ///
    /// A refused move returns [`EngineError::StepBlocked`] and leaves the
    /// session where it was.
    pub fn advance(&mut self) -> EngineResult<WizardStep> {
        self.ensure_open()?;

        let Some(next) = self.step.next() else {
            return Err(EngineError::StepBlocked {
                step: self.step.to_string(),
                reason: "this is the last step; submit the payroll instead".to_string(),
            });
        };

        match self.step {
            WizardStep::Employees => self.ensure_payees_selected()?,
            WizardStep::Review(ReviewStep::UnionReports) => {
                ensure_all_reviewed(&self.union_reports())?
            }
            _ => {}
        }

        info!(from = %self.step, to = %next, "Wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Moves to the previous step. On the first step this stays put.
    pub fn back(&mut self) -> EngineResult<WizardStep> {
        self.ensure_open()?;
        if let Some(previous) = self.step.previous() {
            info!(from = %self.step, to = %previous, "Wizard moved back");
            self.step = previous;
        }
        Ok(self.step)
    }

    /// Includes or excludes a payee from the run.
    pub fn set_selected(&mut self, payee_id: &str, selected: bool) -> EngineResult<()> {
        self.ensure_open()?;
        let payee = self.payee_mut(payee_id)?;
        payee.selected = selected;
        debug!(payee_id = %payee_id, selected, "Payee selection changed");
        Ok(())
    }

    /// Flips a payee's selection and returns the new value.
    pub fn toggle_selected(&mut self, payee_id: &str) -> EngineResult<bool> {
        self.ensure_open()?;
        let payee = self.payee_mut(payee_id)?;
        payee.selected = !payee.selected;
        let selected = payee.selected;
        debug!(payee_id = %payee_id, selected, "Payee selection toggled");
        Ok(selected)
    }

    /// Adds a manually entered payee.
    pub fn add_payee(&mut self, payee: Payee) -> EngineResult<()> {
        self.ensure_open()?;
        validate_payee(&payee)?;
        if self.payees.iter().any(|p| p.id == payee.id) {
            return Err(EngineError::DuplicatePayee {
                payee_id: payee.id,
            });
        }
        info!(payee_id = %payee.id, payee_type = ?payee.payee_type, "Payee added");
        self.payees.push(payee);
        Ok(())
    }

    /// Edits a payee in place.
    ///
    /// The edit is applied to a copy and committed only if the result is
    /// valid, so a rejected edit leaves the payee untouched.
    pub fn update_payee<F>(&mut self, payee_id: &str, edit: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Payee),
    {
        self.ensure_open()?;
        let index = self.payee_index(payee_id)?;

        let mut edited = self.payees[index].clone();
        edit(&mut edited);
        validate_payee(&edited)?;
        if edited.id != payee_id && self.payees.iter().any(|p| p.id == edited.id) {
            return Err(EngineError::DuplicatePayee {
                payee_id: edited.id,
            });
        }

        debug!(payee_id = %payee_id, "Payee updated");
        self.payees[index] = edited;
        Ok(())
    }

    /// Adds a one-time bill and returns its position.
    pub fn add_bill(&mut self, bill: OneTimeBill) -> EngineResult<usize> {
        self.ensure_open()?;
        let index = self.bills.len();
        validate_bill(index, &bill)?;
        info!(index, business = %bill.business_name, amount = %bill.amount, "One-time bill added");
        self.bills.push(bill);
        Ok(index)
    }

    /// Removes the one-time bill at `index`. Later bills shift down.
    pub fn remove_bill(&mut self, index: usize) -> EngineResult<OneTimeBill> {
        self.ensure_open()?;
        if index >= self.bills.len() {
            return Err(EngineError::BillNotFound { index });
        }
        let bill = self.bills.remove(index);
        info!(index, business = %bill.business_name, "One-time bill removed");
        Ok(bill)
    }

    /// Computes the payroll summary for the current data.
    pub fn summary(&self) -> EngineResult<PayrollSummary> {
        compute_payroll_summary(&self.payees, &self.bills, self.config.rates())
    }

    /// Generates the union reports for the current selection with their
    /// review status.
    pub fn union_reports(&self) -> Vec<UnionReport> {
        let reports =
            generate_union_reports(&self.payees, self.config.rates(), self.config.company());
        self.ledger.apply(reports)
    }

    /// Approves the named union's report as it currently reads.
    pub fn mark_reviewed(&mut self, union_name: &str) -> EngineResult<()> {
        self.ensure_open()?;
        let report = self
            .union_reports()
            .into_iter()
            .find(|r| r.union_name == union_name)
            .ok_or_else(|| EngineError::UnionReportNotFound {
                union_name: union_name.to_string(),
            })?;
        self.ledger.mark_reviewed(&report);
        Ok(())
    }

    /// Withdraws approval of the named union's report.
    pub fn mark_unreviewed(&mut self, union_name: &str) -> EngineResult<()> {
        self.ensure_open()?;
        self.ledger.mark_unreviewed(union_name);
        Ok(())
    }

    /// Hands the run to `store`.
    ///
    /// Only allowed from final review with every gate still satisfied. A
    /// store failure leaves the session unchanged so the caller can retry;
    /// retries reuse the same idempotency key. On success the session
    /// closes.
    pub fn submit(&mut self, store: &dyn SubmissionStore) -> EngineResult<PayrollSubmission> {
        self.ensure_open()?;
        if !self.step.is_final() {
            return Err(EngineError::StepBlocked {
                step: self.step.to_string(),
                reason: "payroll can only be submitted from final review".to_string(),
            });
        }
        self.ensure_payees_selected()?;
        ensure_all_reviewed(&self.union_reports())?;

        let summary = self.summary()?;
        let details = SubmissionDetails::from_summary(self.pay_period, self.pay_date, &summary);

        match store.submit(details, self.idempotency_key) {
            Ok(submission) => {
                info!(
                    submission_id = %submission.id,
                    idempotency_key = %self.idempotency_key,
                    "Payroll submitted"
                );
                self.submitted = Some(submission.id);
                Ok(submission)
            }
            Err(e) => {
                warn!(
                    idempotency_key = %self.idempotency_key,
                    error = %e,
                    "Payroll submission failed; session kept for retry"
                );
                Err(e)
            }
        }
    }

    fn ensure_open(&self) -> EngineResult<()> {
        match self.submitted {
            Some(submission_id) => Err(EngineError::SessionClosed { submission_id }),
            None => Ok(()),
        }
    }

    fn ensure_payees_selected(&self) -> EngineResult<()> {
        if self.payees.iter().any(|p| p.selected) {
            return Ok(());
        }
        warn!("No payees selected");
        Err(EngineError::StepBlocked {
            step: WizardStep::Employees.to_string(),
            reason: "select at least one payee".to_string(),
        })
    }

    fn payee_index(&self, payee_id: &str) -> EngineResult<usize> {
        self.payees
            .iter()
            .position(|p| p.id == payee_id)
            .ok_or_else(|| EngineError::PayeeNotFound {
                payee_id: payee_id.to_string(),
            })
    }

    fn payee_mut(&mut self, payee_id: &str) -> EngineResult<&mut Payee> {
        let index = self.payee_index(payee_id)?;
        Ok(&mut self.payees[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PayeeType, RateType, SubmissionStatus};
    use crate::submission::InMemorySubmissionStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period() -> PayPeriod {
        PayPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
        }
    }

    fn pay_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 23).unwrap()
    }

    fn union_payee(id: &str, union: &str) -> Payee {
        let mut payee = Payee::new(id, id, PayeeType::Employee, RateType::Weekly, dec("2000"));
        payee.union = Some(union.to_string());
        payee
    }

    fn session(payees: Vec<Payee>) -> WizardSession {
        WizardSession::new(period(), pay_date(), payees, PayrollConfig::default()).unwrap()
    }

    fn walk_to(session: &mut WizardSession, target: WizardStep) {
        while session.current_step() != target {
            session.advance().unwrap();
        }
    }

    const FINAL: WizardStep = WizardStep::Review(ReviewStep::FinalReview);
    const UNION_REPORTS: WizardStep = WizardStep::Review(ReviewStep::UnionReports);

    /// Fails the first `failures` submits, then delegates.
    struct FlakyStore {
        failures: AtomicUsize,
        inner: InMemorySubmissionStore,
    }

    impl SubmissionStore for FlakyStore {
        fn submit(&self, details: SubmissionDetails, key: Uuid) -> EngineResult<PayrollSubmission> {
            if self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(EngineError::PersistenceFailed {
                    message: "connection reset".to_string(),
                });
            }
            self.inner.submit(details, key)
        }

        fn get(&self, id: Uuid) -> EngineResult<PayrollSubmission> {
            self.inner.get(id)
        }

        fn list(&self) -> EngineResult<Vec<PayrollSubmission>> {
            self.inner.list()
        }

        fn request_correction(&self, id: Uuid) -> EngineResult<PayrollSubmission> {
            self.inner.request_correction(id)
        }

        fn transition(&self, id: Uuid, status: SubmissionStatus) -> EngineResult<PayrollSubmission> {
            self.inner.transition(id, status)
        }
    }

    #[test]
    fn test_new_rejects_bad_pay_period() {
        let bad = PayPeriod {
            start_date: period().end_date,
            end_date: period().start_date,
        };
        assert!(matches!(
            WizardSession::new(bad, pay_date(), vec![], PayrollConfig::default()),
            Err(EngineError::InvalidPayPeriod { .. })
        ));
    }

    #[test]
    fn test_cannot_leave_employees_without_selection() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        match session.advance() {
            Err(EngineError::StepBlocked { step, .. }) => assert_eq!(step, "employees"),
            other => panic!("Expected StepBlocked, got {:?}", other),
        }
        assert_eq!(session.current_step(), WizardStep::Employees);

        session.set_selected("emp_001", true).unwrap();
        assert_eq!(session.advance().unwrap(), WizardStep::Vendors);
    }

    #[test]
    fn test_back_keeps_data_and_stops_at_first_step() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        session.set_selected("emp_001", true).unwrap();
        walk_to(&mut session, WizardStep::OneTimeBills);
        session.add_bill(OneTimeBill::new("Lens Rental Co", dec("300"))).unwrap();

        assert_eq!(session.back().unwrap(), WizardStep::Vendors);
        assert_eq!(session.back().unwrap(), WizardStep::Employees);
        assert_eq!(session.back().unwrap(), WizardStep::Employees);
        assert!(session.payees()[0].selected);
        assert_eq!(session.bills().len(), 1);
    }

    #[test]
    fn test_union_gate_blocks_until_every_report_reviewed() {
        let mut session = session(vec![
            union_payee("emp_001", "IATSE"),
            union_payee("emp_002", "Teamsters"),
        ]);
        session.set_selected("emp_001", true).unwrap();
        session.set_selected("emp_002", true).unwrap();
        walk_to(&mut session, UNION_REPORTS);

        session.mark_reviewed("IATSE").unwrap();
        match session.advance() {
            Err(EngineError::StepBlocked { step, reason }) => {
                assert_eq!(step, "union_reports");
                assert!(reason.contains("Teamsters"));
            }
            other => panic!("Expected StepBlocked, got {:?}", other),
        }

        session.mark_reviewed("Teamsters").unwrap();
        assert_eq!(session.advance().unwrap(), FINAL);
    }

    #[test]
    fn test_no_unions_passes_gate_vacuously() {
        let mut session = session(vec![Payee::new(
            "ven_001",
            "Grip Truck LLC",
            PayeeType::Vendor,
            RateType::Daily,
            dec("800"),
        )]);
        session.set_selected("ven_001", true).unwrap();
        walk_to(&mut session, FINAL);
        assert!(session.union_reports().is_empty());
    }

    #[test]
    fn test_edit_after_approval_reopens_report() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        session.set_selected("emp_001", true).unwrap();
        session.mark_reviewed("IATSE").unwrap();
        assert!(session.union_reports()[0].reviewed);

        session.update_payee("emp_001", |p| p.rate = dec("2500")).unwrap();
        assert!(!session.union_reports()[0].reviewed);

        session.mark_unreviewed("IATSE").unwrap();
        session.mark_reviewed("IATSE").unwrap();
        assert!(session.union_reports()[0].reviewed);
    }

    #[test]
    fn test_mark_reviewed_unknown_union() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        assert!(matches!(
            session.mark_reviewed("IATSE"),
            Err(EngineError::UnionReportNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_edit_is_not_committed() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        assert!(matches!(
            session.update_payee("emp_001", |p| p.rate = dec("-1")),
            Err(EngineError::InvalidPayee { .. })
        ));
        assert_eq!(session.payees()[0].rate, dec("2000"));
    }

    #[test]
    fn test_add_payee_rejects_duplicate_and_invalid() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        assert!(matches!(
            session.add_payee(union_payee("emp_001", "IATSE")),
            Err(EngineError::DuplicatePayee { .. })
        ));

        let mut negative = union_payee("emp_002", "IATSE");
        negative.rate = dec("-5");
        assert!(session.add_payee(negative).is_err());

        let vendor = Payee::new("ven_001", "Crafty", PayeeType::Vendor, RateType::Daily, dec("400"));
        session.add_payee(vendor).unwrap();
        assert_eq!(session.payees_in_group(PayeeGroup::Vendors).len(), 1);
        assert_eq!(session.payees_in_group(PayeeGroup::Employees).len(), 1);
    }

    #[test]
    fn test_bills_add_and_remove() {
        let mut session = session(vec![]);
        assert_eq!(session.add_bill(OneTimeBill::new("A", dec("10"))).unwrap(), 0);
        assert_eq!(session.add_bill(OneTimeBill::new("B", dec("20"))).unwrap(), 1);
        assert!(session.add_bill(OneTimeBill::new("C", dec("-1"))).is_err());

        assert_eq!(session.remove_bill(0).unwrap().business_name, "A");
        assert_eq!(session.bills()[0].business_name, "B");
        assert!(matches!(
            session.remove_bill(5),
            Err(EngineError::BillNotFound { index: 5 })
        ));
    }

    #[test]
    fn test_unknown_payee_selection() {
        let mut session = session(vec![]);
        assert!(matches!(
            session.toggle_selected("ghost"),
            Err(EngineError::PayeeNotFound { .. })
        ));
    }

    #[test]
    fn test_submit_only_from_final_review() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        session.set_selected("emp_001", true).unwrap();
        let store = InMemorySubmissionStore::new();
        assert!(matches!(
            session.submit(&store),
            Err(EngineError::StepBlocked { .. })
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_submit_rechecks_union_gate() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        session.set_selected("emp_001", true).unwrap();
        walk_to(&mut session, UNION_REPORTS);
        session.mark_reviewed("IATSE").unwrap();
        walk_to(&mut session, FINAL);

        session.update_payee("emp_001", |p| p.rate = dec("2100")).unwrap();
        let store = InMemorySubmissionStore::new();
        assert!(matches!(
            session.submit(&store),
            Err(EngineError::StepBlocked { .. })
        ));
    }

    #[test]
    fn test_submit_closes_session() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        session.set_selected("emp_001", true).unwrap();
        walk_to(&mut session, UNION_REPORTS);
        session.mark_reviewed("IATSE").unwrap();
        walk_to(&mut session, FINAL);

        let store = InMemorySubmissionStore::new();
        let submission = session.submit(&store).unwrap();
        assert_eq!(submission.status, SubmissionStatus::Submitted);
        assert_eq!(submission.idempotency_key, session.idempotency_key());
        assert_eq!(session.submission_id(), Some(submission.id));

        assert!(matches!(
            session.set_selected("emp_001", false),
            Err(EngineError::SessionClosed { .. })
        ));
        assert!(matches!(
            session.submit(&store),
            Err(EngineError::SessionClosed { .. })
        ));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_submit_is_retryable_with_same_key() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        session.set_selected("emp_001", true).unwrap();
        walk_to(&mut session, UNION_REPORTS);
        session.mark_reviewed("IATSE").unwrap();
        walk_to(&mut session, FINAL);

        let store = FlakyStore {
            failures: AtomicUsize::new(1),
            inner: InMemorySubmissionStore::new(),
        };
        assert!(matches!(
            session.submit(&store),
            Err(EngineError::PersistenceFailed { .. })
        ));
        assert_eq!(session.current_step(), FINAL);
        assert_eq!(session.submission_id(), None);

        let submission = session.submit(&store).unwrap();
        assert_eq!(submission.idempotency_key, session.idempotency_key());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_submission_matches_summary() {
        let mut session = session(vec![union_payee("emp_001", "IATSE")]);
        session.set_selected("emp_001", true).unwrap();
        session.mark_reviewed("IATSE").unwrap();
        walk_to(&mut session, FINAL);

        let summary = session.summary().unwrap();
        let submission = session.submit(&InMemorySubmissionStore::new()).unwrap();
        assert_eq!(submission.details.total_payroll_amount, summary.total_payroll_amount);
        assert_eq!(submission.details.gross_total, dec("2000"));
        assert_eq!(submission.details.pay_date, pay_date());
    }
}
