//! The persistence collaborator seam.

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{PayrollSubmission, SubmissionDetails, SubmissionStatus};

/// Stores payroll submissions and owns their durable identifiers.
///
/// Implementations must make `submit` safe to retry: a second call with an
/// idempotency key that was already accepted returns the stored record
/// instead of creating another payroll.
pub trait SubmissionStore: Send + Sync {
    /// Stores a new submission in `submitted` status.
    fn submit(&self, details: SubmissionDetails, idempotency_key: Uuid)
    -> EngineResult<PayrollSubmission>;

    /// Returns the submission with `id`.
    fn get(&self, id: Uuid) -> EngineResult<PayrollSubmission>;

    /// Returns every submission, newest first.
    fn list(&self) -> EngineResult<Vec<PayrollSubmission>>;

    /// Marks `id` as corrected and returns a new draft copied from it.
    ///
    /// The original record is kept; only its status changes.
    fn request_correction(&self, id: Uuid) -> EngineResult<PayrollSubmission>;

    /// Moves `id` to `status` if the lifecycle allows it.
    fn transition(&self, id: Uuid, status: SubmissionStatus) -> EngineResult<PayrollSubmission>;
}
