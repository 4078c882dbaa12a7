//! # Error Handling Framework
//!
//! Structured errors shared by every evaluator and orchestrator in the
//! governance platform.
//!
//! ## Error Categories
//!
//! - **Validation**: invalid enumeration value or malformed input
//! - **Lookup**: a referenced id is absent from its owning evaluator
//! - **Duplicate**: insertion of an already-present unique key
//! - **Precondition**: a state transition not allowed from the current state
//! - **Internal**: anything else — caught, logged, surfaced as a value
//!
//! ## Usage
//!
//! ```rust
//! use governance_core::error::{Error, Result};
//!
//! fn validate_severity(value: &str) -> Result<()> {
//!     if value.is_empty() {
//!         return Err(Error::validation("severity must not be empty"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod codes;
pub mod context;
pub mod framework;
pub mod metrics;

pub use codes::ErrorCode;
pub use context::ErrorContext;
pub use framework::{Error, ErrorCategory, ErrorSeverity, Result};
pub use metrics::ErrorMetrics;