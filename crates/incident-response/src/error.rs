use thiserror::Error;

#[derive(Error, Debug)]
pub enum IncidentError {
    #[error("Incident not found: {id}")]
    IncidentNotFound { id: String },

    #[error("Quarantine not found: {id}")]
    QuarantineNotFound { id: String },

    #[error("Suspension not found: {id}")]
    SuspensionNotFound { id: String },

    #[error("Evidence not found: {id}")]
    EvidenceNotFound { id: String },

    #[error("Analysis not found: {id}")]
    AnalysisNotFound { id: String },

    #[error("Action not found: {id}")]
    ActionNotFound { id: String },

    #[error("Playbook not found: {id}")]
    PlaybookNotFound { id: String },

    #[error("At least two incidents are required for correlation")]
    InsufficientIncidentsForCorrelation,

    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Core error: {0}")]
    Core(#[from] governance_core::Error),
}

pub type Result<T> = std::result::Result<T, IncidentError>;
