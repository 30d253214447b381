//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_payroll_summary;
use crate::error::EngineResult;
use crate::models::PayrollSubmission;
use crate::union_reports::generate_union_reports;
use crate::wizard::WizardSession;

use super::request::{
    StatusUpdateRequest, SubmissionRequest, SummaryRequest, UnionReportsRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the client's retry-safe submission key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/summary", post(summary_handler))
        .route("/payroll/union-reports", post(union_reports_handler))
        .route(
            "/submissions",
            post(create_submission_handler).get(list_submissions_handler),
        )
        .route("/submissions/:id", get(get_submission_handler))
        .route("/submissions/:id/correction", post(correction_handler))
        .route("/submissions/:id/status", post(status_handler))
        .with_state(state)
}

/// Handler for POST /payroll/summary.
///
/// Computes the rounded payroll summary for the posted payees and bills.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_payroll_summary(&request.payees, &request.one_time_bills, state.config().rates())
    {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                payees = summary.company.number_of_payees,
                bills = summary.company.number_of_bills,
                total_payroll_amount = %summary.total_payroll_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll summary computed"
            );
            json_response(StatusCode::OK, summary.rounded())
        }
        Err(err) => engine_error(correlation_id, err, "Payroll summary failed"),
    }
}

/// Handler for POST /payroll/union-reports.
///
/// Every returned report is pending; approvals are sent with the submission.
async fn union_reports_handler(
    State(state): State<AppState>,
    payload: Result<Json<UnionReportsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing union reports request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    if let Err(err) = crate::calculation::validate_payees(&request.payees) {
        return engine_error(correlation_id, err, "Union report request rejected");
    }

    let config = state.config();
    let reports = generate_union_reports(&request.payees, config.rates(), config.company());
    info!(
        correlation_id = %correlation_id,
        unions = reports.len(),
        "Union reports generated"
    );
    json_response(StatusCode::OK, reports)
}

/// Handler for POST /submissions.
///
/// Replays the run through a [`WizardSession`] so every gate applies, then
/// submits it under the request's `Idempotency-Key`.
async fn create_submission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll submission");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let idempotency_key = match headers.get(IDEMPOTENCY_KEY_HEADER) {
        Some(value) => {
            let raw = value.to_str().unwrap_or_default();
            match Uuid::parse_str(raw.trim()) {
                Ok(key) => key,
                Err(_) => {
                    warn!(correlation_id = %correlation_id, key = %raw, "Invalid idempotency key");
                    return ApiErrorResponse::bad_request(ApiError::invalid_idempotency_key(raw))
                        .into_response();
                }
            }
        }
        None => {
            let key = Uuid::new_v4();
            warn!(
                correlation_id = %correlation_id,
                idempotency_key = %key,
                "No Idempotency-Key header; retries of this request will not be deduplicated"
            );
            key
        }
    };

    match submit_run(&state, request, idempotency_key) {
        Ok(submission) => {
            info!(
                correlation_id = %correlation_id,
                submission_id = %submission.id,
                idempotency_key = %idempotency_key,
                "Payroll submission accepted"
            );
            json_response(StatusCode::CREATED, submission.rounded())
        }
        Err(err) => engine_error(correlation_id, err, "Payroll submission rejected"),
    }
}

/// Walks a run through every wizard step and submits it.
fn submit_run(
    state: &AppState,
    request: SubmissionRequest,
    idempotency_key: Uuid,
) -> EngineResult<PayrollSubmission> {
    let mut session = WizardSession::new(
        request.pay_period,
        request.pay_date,
        request.payees,
        state.config().config().clone(),
    )?
    .with_idempotency_key(idempotency_key);

    for bill in request.one_time_bills {
        session.add_bill(bill)?;
    }
    for union_name in &request.reviewed_unions {
        session.mark_reviewed(union_name)?;
    }
    while !session.current_step().is_final() {
        session.advance()?;
    }

    session.submit(state.store())
}

/// Handler for GET /submissions.
async fn list_submissions_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().list() {
        Ok(submissions) => {
            info!(
                correlation_id = %correlation_id,
                count = submissions.len(),
                "Listed payroll submissions"
            );
            let rounded: Vec<PayrollSubmission> =
                submissions.iter().map(PayrollSubmission::rounded).collect();
            json_response(StatusCode::OK, rounded)
        }
        Err(err) => engine_error(correlation_id, err, "Listing submissions failed"),
    }
}

/// Handler for GET /submissions/:id.
async fn get_submission_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };

    match state.store().get(id) {
        Ok(submission) => json_response(StatusCode::OK, submission.rounded()),
        Err(err) => engine_error(correlation_id, err, "Submission lookup failed"),
    }
}

/// Handler for POST /submissions/:id/correction.
///
/// Returns the new draft; the original is kept and marked corrected.
async fn correction_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, submission_id = %id, "Correction requested");

    match state.store().request_correction(id) {
        Ok(draft) => json_response(StatusCode::CREATED, draft.rounded()),
        Err(err) => engine_error(correlation_id, err, "Correction rejected"),
    }
}

/// Handler for POST /submissions/:id/status.
async fn status_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        submission_id = %id,
        status = %request.status,
        "Status change requested"
    );

    match state.store().transition(id, request.status) {
        Ok(submission) => json_response(StatusCode::OK, submission.rounded()),
        Err(err) => engine_error(correlation_id, err, "Status change rejected"),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error(
    correlation_id: Uuid,
    err: crate::error::EngineError,
    context: &'static str,
) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "{}", context);
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let message = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %message, "Invalid submission id");
    ApiErrorResponse::bad_request(ApiError::invalid_submission_id(message)).into_response()
}
