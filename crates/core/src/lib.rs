pub mod clock;
pub mod config;
pub mod decision_matrix;
pub mod error;
pub mod hashing;
pub mod ids;
pub mod severity;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GovernanceConfig;
pub use decision_matrix::{ActionType, DecisionMatrix, DecisionOutcome, RiskLevel, UrgencyLevel};
pub use error::{Error, ErrorCode, ErrorContext, ErrorMetrics, Result};
pub use hashing::{generate_key_fingerprint, sha256_hex, sha256_prefix};
pub use ids::OpaqueId;
pub use severity::Severity;
pub use store::{Identified, RecordStore};

// Re-export commonly used types from dependencies, as erp_core does.
pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;
