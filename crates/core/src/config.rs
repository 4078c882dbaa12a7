//! # Configuration Management
//!
//! Hierarchical configuration for the governance platform, loaded from
//! (in order of increasing precedence):
//!
//! 1. `config/default.toml`
//! 2. `config/{GOVERNANCE_ENV}.toml`
//! 3. Environment variables (e.g. `AIETHICS_ENABLED=false`)
//!
//! The recognized keys mirror the external interface documented for the
//! platform: one block per orchestrator subsystem, each carrying the
//! feature toggles that subsystem's orchestrator consults before wiring
//! evaluators in.

use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GovernanceConfig {
    pub ai_ethics: AiEthicsConfig,
    pub compliance: ComplianceConfig,
    pub incident: IncidentConfig,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            ai_ethics: AiEthicsConfig::default(),
            compliance: ComplianceConfig::default(),
            incident: IncidentConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AiEthicsConfig {
    pub enabled: bool,
    pub bias_detection: bool,
    pub fairness_metrics: bool,
    pub auto_alert: bool,
    pub transparency_reports: bool,
}

impl Default for AiEthicsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bias_detection: true,
            fairness_metrics: true,
            auto_alert: true,
            transparency_reports: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ComplianceConfig {
    pub enabled: bool,
    pub frameworks: HashSet<String>,
    pub auto_remediate: bool,
    pub report_frequency: String,
    pub consent_required: bool,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        let mut frameworks = HashSet::new();
        frameworks.insert("gdpr".to_string());
        Self {
            enabled: true,
            frameworks,
            auto_remediate: false,
            report_frequency: "monthly".to_string(),
            consent_required: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct IncidentConfig {
    pub enabled: bool,
    pub auto_contain: bool,
    pub forensic_collection: bool,
    pub playbook_enabled: bool,
    pub lesson_learning: bool,
}

impl Default for IncidentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_contain: true,
            forensic_collection: true,
            playbook_enabled: true,
            lesson_learning: true,
        }
    }
}

impl GovernanceConfig {
    /// Loads configuration the way `erp_core::Config` does: TOML files
    /// layered under environment variables, selected by `GOVERNANCE_ENV`
    /// (defaults to `development`). Any source that is absent is skipped
    /// rather than treated as an error, so the platform runs with sane
    /// defaults when no `config/` directory exists at all.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = env::var("GOVERNANCE_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("GOVERNANCE").separator("_"));

        let loaded = builder.build()?;
        loaded.try_deserialize()
    }
}
