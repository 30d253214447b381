//! HTTP API for the payroll engine.
//!
//! This module provides the REST endpoints for computing payroll summaries
//! and union reports, submitting payroll runs and managing submissions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{IDEMPOTENCY_KEY_HEADER, create_router};
pub use request::{StatusUpdateRequest, SubmissionRequest, SummaryRequest, UnionReportsRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
