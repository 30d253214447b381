//! In-memory submission store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollSubmission, SubmissionDetails, SubmissionStatus};

use super::SubmissionStore;

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<Uuid, PayrollSubmission>,
    by_key: HashMap<Uuid, Uuid>,
}

/// A [`SubmissionStore`] kept in process memory.
///
/// # Example
///
/// ```
/// use payroll_engine::submission::{InMemorySubmissionStore, SubmissionStore};
///
/// let store = InMemorySubmissionStore::new();
/// assert!(store.list().unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemorySubmissionStore {
    records: Mutex<Records>,
}

impl InMemorySubmissionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, Records>> {
        self.records
            .lock()
            .map_err(|e| EngineError::PersistenceFailed {
                message: format!("submission store lock poisoned: {}", e),
            })
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn submit(
        &self,
        details: SubmissionDetails,
        idempotency_key: Uuid,
    ) -> EngineResult<PayrollSubmission> {
        let mut records = self.lock()?;

        if let Some(existing) = records
            .by_key
            .get(&idempotency_key)
            .and_then(|id| records.by_id.get(id))
        {
            info!(
                submission_id = %existing.id,
                idempotency_key = %idempotency_key,
                "Repeated submission returned existing record"
            );
            return Ok(existing.clone());
        }

        let submission = PayrollSubmission {
            id: Uuid::new_v4(),
            idempotency_key,
            status: SubmissionStatus::Submitted,
            created_at: Utc::now(),
            corrects: None,
            details,
        };
        records.by_key.insert(idempotency_key, submission.id);
        records.by_id.insert(submission.id, submission.clone());

        info!(
            submission_id = %submission.id,
            idempotency_key = %idempotency_key,
            payees = submission.details.number_of_payees,
            total_payroll_amount = %submission.details.total_payroll_amount,
            "Stored payroll submission"
        );
        Ok(submission)
    }

    fn get(&self, id: Uuid) -> EngineResult<PayrollSubmission> {
        self.lock()?
            .by_id
            .get(&id)
            .cloned()
            .ok_or(EngineError::SubmissionNotFound { id })
    }

    fn list(&self) -> EngineResult<Vec<PayrollSubmission>> {
        let mut submissions: Vec<PayrollSubmission> =
            self.lock()?.by_id.values().cloned().collect();
        submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(submissions)
    }

    fn request_correction(&self, id: Uuid) -> EngineResult<PayrollSubmission> {
        let mut records = self.lock()?;
        let original = records
            .by_id
            .get_mut(&id)
            .ok_or(EngineError::SubmissionNotFound { id })?;

        if !original.status.is_correctable() {
            return Err(EngineError::InvalidStatusTransition {
                id,
                from: original.status.to_string(),
                to: SubmissionStatus::Corrected.to_string(),
            });
        }

        original.status = SubmissionStatus::Corrected;
        let draft = PayrollSubmission {
            id: Uuid::new_v4(),
            idempotency_key: Uuid::new_v4(),
            status: SubmissionStatus::Draft,
            created_at: Utc::now(),
            corrects: Some(id),
            details: original.details.clone(),
        };
        records.by_key.insert(draft.idempotency_key, draft.id);
        records.by_id.insert(draft.id, draft.clone());

        info!(
            original_id = %id,
            draft_id = %draft.id,
            "Created correction draft"
        );
        Ok(draft)
    }

    fn transition(&self, id: Uuid, status: SubmissionStatus) -> EngineResult<PayrollSubmission> {
        let mut records = self.lock()?;
        let submission = records
            .by_id
            .get_mut(&id)
            .ok_or(EngineError::SubmissionNotFound { id })?;

        if !submission.status.can_transition_to(status) {
            return Err(EngineError::InvalidStatusTransition {
                id,
                from: submission.status.to_string(),
                to: status.to_string(),
            });
        }

        info!(
            submission_id = %id,
            from = %submission.status,
            to = %status,
            "Submission status changed"
        );
        submission.status = status;
        Ok(submission.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PayPeriod, PaymentSplit};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn details(total: i64) -> SubmissionDetails {
        SubmissionDetails {
            pay_period: PayPeriod {
                start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
            },
            pay_date: NaiveDate::from_ymd_opt(2026, 1, 23).unwrap(),
            number_of_payees: 1,
            employer_taxes: Decimal::ZERO,
            gross_total: Decimal::from(total),
            payments: PaymentSplit::default(),
            deductions: Decimal::ZERO,
            company_contributions: Decimal::ZERO,
            fees: Decimal::ZERO,
            total_payroll_amount: Decimal::from(total),
        }
    }

    #[test]
    fn test_submit_assigns_id_and_submitted_status() {
        let store = InMemorySubmissionStore::new();
        let key = Uuid::new_v4();
        let submission = store.submit(details(1000), key).unwrap();

        assert_eq!(submission.status, SubmissionStatus::Submitted);
        assert_eq!(submission.idempotency_key, key);
        assert_eq!(submission.corrects, None);
        assert_eq!(store.get(submission.id).unwrap(), submission);
    }

    #[test]
    fn test_repeated_key_does_not_double_submit() {
        let store = InMemorySubmissionStore::new();
        let key = Uuid::new_v4();
        let first = store.submit(details(1000), key).unwrap();
        let second = store.submit(details(1000), key).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_distinct_keys_create_distinct_submissions() {
        let store = InMemorySubmissionStore::new();
        store.submit(details(1000), Uuid::new_v4()).unwrap();
        store.submit(details(2000), Uuid::new_v4()).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_get_unknown_id() {
        let store = InMemorySubmissionStore::new();
        assert!(matches!(
            store.get(Uuid::new_v4()),
            Err(EngineError::SubmissionNotFound { .. })
        ));
    }

    #[test]
    fn test_correction_creates_new_draft_and_keeps_original() {
        let store = InMemorySubmissionStore::new();
        let original = store.submit(details(1000), Uuid::new_v4()).unwrap();

        let draft = store.request_correction(original.id).unwrap();
        assert_ne!(draft.id, original.id);
        assert_eq!(draft.status, SubmissionStatus::Draft);
        assert_eq!(draft.corrects, Some(original.id));
        assert_eq!(draft.details, original.details);

        let stored_original = store.get(original.id).unwrap();
        assert_eq!(stored_original.status, SubmissionStatus::Corrected);
        assert_eq!(stored_original.details, original.details);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_correction_rejected_twice_and_for_drafts() {
        let store = InMemorySubmissionStore::new();
        let original = store.submit(details(1000), Uuid::new_v4()).unwrap();
        let draft = store.request_correction(original.id).unwrap();

        assert!(matches!(
            store.request_correction(original.id),
            Err(EngineError::InvalidStatusTransition { .. })
        ));
        assert!(matches!(
            store.request_correction(draft.id),
            Err(EngineError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_status_lifecycle() {
        let store = InMemorySubmissionStore::new();
        let submission = store.submit(details(1000), Uuid::new_v4()).unwrap();

        let approved = store
            .transition(submission.id, SubmissionStatus::Approved)
            .unwrap();
        assert_eq!(approved.status, SubmissionStatus::Approved);

        assert!(matches!(
            store.transition(submission.id, SubmissionStatus::Submitted),
            Err(EngineError::InvalidStatusTransition { .. })
        ));

        let completed = store
            .transition(submission.id, SubmissionStatus::Completed)
            .unwrap();
        assert_eq!(completed.status, SubmissionStatus::Completed);

        // Completed payrolls can still be corrected.
        assert!(store.request_correction(submission.id).is_ok());
    }

    #[test]
    fn test_correction_draft_can_be_submitted() {
        let store = InMemorySubmissionStore::new();
        let original = store.submit(details(1000), Uuid::new_v4()).unwrap();
        let draft = store.request_correction(original.id).unwrap();

        let resubmitted = store
            .transition(draft.id, SubmissionStatus::Submitted)
            .unwrap();
        assert_eq!(resubmitted.status, SubmissionStatus::Submitted);
    }
}
