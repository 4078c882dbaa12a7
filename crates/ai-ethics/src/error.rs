use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiEthicsError {
    #[error("Dataset not found: {id}")]
    DatasetNotFound { id: String },

    #[error("Detection not found: {id}")]
    DetectionNotFound { id: String },

    #[error("Rule not found: {id}")]
    RuleNotFound { id: String },

    #[error("Exception not found: {id}")]
    ExceptionNotFound { id: String },

    #[error("Alert not found: {id}")]
    AlertNotFound { id: String },

    #[error("Disclosure not found: {id}")]
    DisclosureNotFound { id: String },

    #[error("Invalid alert transition: {from} -> {to}")]
    InvalidAlertTransition { from: String, to: String },

    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Core error: {0}")]
    Core(#[from] governance_core::Error),
}

pub type Result<T> = std::result::Result<T, AiEthicsError>;
