use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("Framework not found: {id}")]
    FrameworkNotFound { id: String },

    #[error("Framework key already registered: {key}")]
    DuplicateFramework { key: String },

    #[error("Policy not found: {id}")]
    PolicyNotFound { id: String },

    #[error("Asset not found: {id}")]
    AssetNotFound { id: String },

    #[error("Invalid asset category: {category}")]
    InvalidCategory { category: String },

    #[error("Retention policy not found: {id}")]
    PolicyRecordNotFound { id: String },

    #[error("Consent record not found for user {user_id} purpose {purpose_id}")]
    ConsentNotFound { user_id: String, purpose_id: String },

    #[error("Invalid consent transition: {from} -> {to}")]
    InvalidConsentTransition { from: String, to: String },

    #[error("Gap not found: {id}")]
    GapNotFound { id: String },

    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Core error: {0}")]
    Core(#[from] governance_core::Error),
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
