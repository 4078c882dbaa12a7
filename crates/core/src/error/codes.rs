use serde::{Deserialize, Serialize};
use std::fmt;

/// Standardized error codes shared by every evaluator and orchestrator.
///
/// Mirrors the taxonomy in the governance spec's error handling design:
/// validation, lookup, duplicate, precondition and unexpected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid enumeration value or malformed input.
    ValidationFailed,
    /// Referenced id absent from its owning evaluator's store.
    ResourceNotFound,
    /// Insert of an already-present unique key.
    DuplicateValue,
    /// State transition not allowed from the current state.
    PreconditionFailed,
    /// Anything else — caught, logged, and surfaced without a panic.
    InternalError,
}

impl ErrorCode {
    pub fn category(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "validation",
            ErrorCode::ResourceNotFound => "lookup",
            ErrorCode::DuplicateValue => "duplicate",
            ErrorCode::PreconditionFailed => "precondition",
            ErrorCode::InternalError => "internal",
        }
    }

    /// Whether this error class is safe to retry without changing input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::InternalError)
    }

    pub fn should_log_as_error(&self) -> bool {
        matches!(self, ErrorCode::InternalError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
