use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Key not found: {id}")]
    KeyNotFound { id: String },

    #[error("Key already revoked: {id}")]
    KeyAlreadyRevoked { id: String },

    #[error("Schedule not found: {id}")]
    ScheduleNotFound { id: String },

    #[error("Pattern not found: {id}")]
    PatternNotFound { id: String },

    #[error("Leak not found: {id}")]
    LeakNotFound { id: String },

    #[error("Verification not found: {id}")]
    VerificationNotFound { id: String },

    #[error("Invalid verification transition: {from} -> {to}")]
    InvalidVerificationTransition { from: String, to: String },

    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Core error: {0}")]
    Core(#[from] governance_core::Error),
}

pub type Result<T> = std::result::Result<T, CredentialError>;
