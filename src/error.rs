//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a payroll run can surface. None of them are fatal:
//! each one describes a recoverable, user-facing state.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A payee record failed validation.
    #[error("Invalid payee '{payee_id}' field '{field}': {message}")]
    InvalidPayee {
        /// The id of the payee (may be empty when the id itself is invalid).
        payee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Two payees in the same run share an id.
    #[error("Duplicate payee id: {payee_id}")]
    DuplicatePayee {
        /// The repeated id.
        payee_id: String,
    },

    /// No payee with the given id exists in the run.
    #[error("Payee not found: {payee_id}")]
    PayeeNotFound {
        /// The id that was looked up.
        payee_id: String,
    },

    /// A one-time bill failed validation.
    #[error("Invalid one-time bill #{index} field '{field}': {message}")]
    InvalidBill {
        /// Position of the bill in the run.
        index: usize,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No one-time bill exists at the given position.
    #[error("One-time bill not found at position {index}")]
    BillNotFound {
        /// The position that was looked up.
        index: usize,
    },

    /// The pay period is inconsistent.
    #[error("Invalid pay period: {message}")]
    InvalidPayPeriod {
        /// What is wrong with the period.
        message: String,
    },

    /// The wizard refused to move forward.
    #[error("Cannot leave step '{step}': {reason}")]
    StepBlocked {
        /// The step the wizard is on.
        step: String,
        /// The blocking explanation shown to the user.
        reason: String,
    },

    /// No union report with the given name exists for the current selection.
    #[error("Union report not found: {union_name}")]
    UnionReportNotFound {
        /// The union that was looked up.
        union_name: String,
    },

    /// The wizard session was already submitted.
    #[error("Payroll session already submitted as {submission_id}")]
    SessionClosed {
        /// The submission the session produced.
        submission_id: Uuid,
    },

    /// No submission with the given id is stored.
    #[error("Payroll submission not found: {id}")]
    SubmissionNotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// A submission cannot move between the two statuses.
    #[error("Payroll submission {id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// The submission id.
        id: Uuid,
        /// Its current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// The persistence collaborator failed; the draft is kept and the
    /// submission may be retried.
    #[error("Payroll persistence failed: {message}")]
    PersistenceFailed {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates.yaml"
        );
    }

    #[test]
    fn test_invalid_payee_displays_id_field_and_message() {
        let error = EngineError::InvalidPayee {
            payee_id: "emp_001".to_string(),
            field: "rate".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid payee 'emp_001' field 'rate': must not be negative"
        );
    }

    #[test]
    fn test_invalid_bill_displays_index() {
        let error = EngineError::InvalidBill {
            index: 2,
            field: "amount".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid one-time bill #2 field 'amount': must not be negative"
        );
    }

    #[test]
    fn test_step_blocked_displays_step_and_reason() {
        let error = EngineError::StepBlocked {
            step: "employees".to_string(),
            reason: "select at least one payee".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot leave step 'employees': select at least one payee"
        );
    }

    #[test]
    fn test_invalid_status_transition_displays_statuses() {
        let id = Uuid::nil();
        let error = EngineError::InvalidStatusTransition {
            id,
            from: "draft".to_string(),
            to: "completed".to_string(),
        };
        assert_eq!(
            error.to_string(),
            format!("Payroll submission {id} cannot move from draft to completed")
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::PayeeNotFound {
                payee_id: "ghost".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
