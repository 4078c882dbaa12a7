use super::{ErrorCode, ErrorContext};
use std::fmt;
use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Validation,
    Lookup,
    Duplicate,
    Precondition,
    Internal,
}

/// The single error type every evaluator and orchestrator returns.
///
/// Evaluators never panic or let an unexpected exception cross their public
/// boundary; anything not covered by the four named variants collapses into
/// `InternalError`, is logged at error level, and surfaced as a value.
#[derive(Debug, ThisError, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
    pub context: ErrorContext,
    pub severity: ErrorSeverity,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            context: ErrorContext::new(),
            severity: Self::default_severity_for_code(code),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    pub fn add_trace(mut self, trace: impl Into<String>) -> Self {
        self.context = self.context.add_trace(trace.into());
        self
    }

    pub fn category(&self) -> ErrorCategory {
        match self.code {
            ErrorCode::ValidationFailed => ErrorCategory::Validation,
            ErrorCode::ResourceNotFound => ErrorCategory::Lookup,
            ErrorCode::DuplicateValue => ErrorCategory::Duplicate,
            ErrorCode::PreconditionFailed => ErrorCategory::Precondition,
            ErrorCode::InternalError => ErrorCategory::Internal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    pub fn should_log_as_error(&self) -> bool {
        self.code.should_log_as_error() || matches!(self.severity, ErrorSeverity::High | ErrorSeverity::Critical)
    }

    fn default_severity_for_code(code: ErrorCode) -> ErrorSeverity {
        match code {
            ErrorCode::ValidationFailed | ErrorCode::ResourceNotFound => ErrorSeverity::Low,
            ErrorCode::DuplicateValue | ErrorCode::PreconditionFailed => ErrorSeverity::Medium,
            ErrorCode::InternalError => ErrorSeverity::Critical,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(serde::Serialize)]
        struct ErrorSer {
            code: ErrorCode,
            message: String,
            details: Option<String>,
            severity: ErrorSeverity,
        }

        ErrorSer {
            code: self.code,
            message: self.message.clone(),
            details: self.details.clone(),
            severity: self.severity,
        }
        .serialize(serializer)
    }
}

// Convenience constructors matching the taxonomy in the error handling design.
impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn not_found(entity: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ResourceNotFound, format!("{entity} not found: {id}"))
    }

    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateValue, format!("Exists: {}", key.into()))
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PreconditionFailed, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string()).add_trace("anyhow::Error conversion")
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::internal(err.to_string()).add_trace("config::ConfigError conversion")
    }
}
