//! Response types for the payroll API.
//!
//! This module defines the error response structures and maps every
//! [`EngineError`] onto an HTTP status and a stable error code.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an error for an `Idempotency-Key` header that is not a UUID.
    pub fn invalid_idempotency_key(value: &str) -> Self {
        Self::with_details(
            "INVALID_IDEMPOTENCY_KEY",
            format!("Idempotency-Key is not a UUID: {}", value),
            "Send the same UUID on every retry of one submission",
        )
    }

    /// Creates an error for a submission id path segment that is not a UUID.
    pub fn invalid_submission_id(message: impl Into<String>) -> Self {
        Self::new("INVALID_SUBMISSION_ID", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps `error` as a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidPayee { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_PAYEE",
                    message,
                    "The payee data contains invalid information",
                ),
            ),
            EngineError::DuplicatePayee { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("DUPLICATE_PAYEE", message),
            ),
            EngineError::InvalidBill { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_BILL",
                    message,
                    "The one-time bill contains invalid information",
                ),
            ),
            EngineError::InvalidPayPeriod { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PAY_PERIOD", message),
            ),
            EngineError::PayeeNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("PAYEE_NOT_FOUND", message),
            ),
            EngineError::BillNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("BILL_NOT_FOUND", message),
            ),
            EngineError::UnionReportNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("UNION_REPORT_NOT_FOUND", message),
            ),
            EngineError::SubmissionNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("SUBMISSION_NOT_FOUND", message),
            ),
            EngineError::StepBlocked { reason, .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::with_details("STEP_BLOCKED", message, reason),
            ),
            EngineError::SessionClosed { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("SESSION_CLOSED", message),
            ),
            EngineError::InvalidStatusTransition { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("INVALID_STATUS_TRANSITION", message),
            ),
            EngineError::PersistenceFailed { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "PERSISTENCE_FAILED",
                    message,
                    "The payroll was not stored; retry with the same Idempotency-Key",
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_errors_are_bad_request() {
        let response: ApiErrorResponse = EngineError::InvalidPayee {
            payee_id: "emp_001".to_string(),
            field: "rate".to_string(),
            message: "must not be negative".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_PAYEE");
    }

    #[test]
    fn test_step_blocked_is_conflict_with_reason() {
        let response: ApiErrorResponse = EngineError::StepBlocked {
            step: "union_reports".to_string(),
            reason: "1 union report(s) still need review: IATSE".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "STEP_BLOCKED");
        assert_eq!(
            response.error.details.as_deref(),
            Some("1 union report(s) still need review: IATSE")
        );
    }

    #[test]
    fn test_not_found_and_server_errors() {
        let not_found: ApiErrorResponse = EngineError::SubmissionNotFound { id: Uuid::nil() }.into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let failed: ApiErrorResponse = EngineError::PersistenceFailed {
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failed.error.code, "PERSISTENCE_FAILED");
    }
}
