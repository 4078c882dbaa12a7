//! Facade crate wiring the four governance orchestrators behind a
//! single handle, the way a thin service layer wires its domain
//! crates together (minus the HTTP layer, which this platform has no
//! need for).

use ai_ethics::AiEthicsOrchestrator;
use compliance::ComplianceOrchestrator;
use credential_lifecycle::CredentialLifecycleOrchestrator;
use governance_core::{Clock, GovernanceConfig, SystemClock};
use incident_response::IncidentOrchestrator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSummary {
    pub ai_ethics: HashMap<String, u64>,
    pub compliance: HashMap<String, u64>,
    pub credential_lifecycle: HashMap<String, u64>,
    pub incident_response: HashMap<String, u64>,
}

pub struct GovernancePlatform {
    pub config: GovernanceConfig,
    pub ai_ethics: AiEthicsOrchestrator,
    pub compliance: ComplianceOrchestrator,
    pub credential_lifecycle: CredentialLifecycleOrchestrator,
    pub incident_response: IncidentOrchestrator,
}

impl GovernancePlatform {
    pub fn new(config: GovernanceConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            ai_ethics: AiEthicsOrchestrator::new(clock.clone(), 10_000, 0.2),
            compliance: ComplianceOrchestrator::new(clock.clone()),
            credential_lifecycle: CredentialLifecycleOrchestrator::new(clock.clone(), true),
            incident_response: IncidentOrchestrator::new(clock),
            config,
        }
    }

    pub fn get_summary(&self) -> PlatformSummary {
        PlatformSummary {
            ai_ethics: self.ai_ethics.get_summary().stats,
            compliance: self.compliance.get_summary().stats,
            credential_lifecycle: self.credential_lifecycle.get_summary().stats,
            incident_response: self.incident_response.get_summary().stats,
        }
    }
}

impl Default for GovernancePlatform {
    fn default() -> Self {
        Self::new(GovernanceConfig::default())
    }
}

/// An `EnvFilter` layered over the default formatting layer, falling
/// back to per-crate debug logging when `RUST_LOG` is unset.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "governance=debug,ai_ethics=debug,compliance=debug,credential_lifecycle=debug,incident_response=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
