//! Wires the credential-lifecycle evaluators together behind a single
//! handle.

use crate::error::{CredentialError, Result};
use crate::health_score::KeyHealthScore;
use crate::key_inventory::{KeyInventory, KeyStatus};
use crate::leak_detector::CredentialLeakDetector;
use crate::over_permission_detector::OverPermissionDetector;
use crate::revocator::InstantRevocator;
use crate::rotation_scheduler::{AutoRotationScheduler, RotationHistoryEntry, ScheduleId};
use crate::rotation_verifier::RotationVerifier;
use crate::usage_anomaly_analyzer::UsageAnomalyAnalyzer;
use governance_core::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialLifecycleSummary {
    pub stats: HashMap<String, u64>,
}

pub struct CredentialLifecycleOrchestrator {
    pub key_inventory: KeyInventory,
    pub rotation_scheduler: AutoRotationScheduler,
    pub usage_anomaly_analyzer: UsageAnomalyAnalyzer,
    pub over_permission_detector: OverPermissionDetector,
    pub leak_detector: CredentialLeakDetector,
    pub revocator: InstantRevocator,
    pub health_score: KeyHealthScore,
    pub rotation_verifier: RotationVerifier,
}

impl CredentialLifecycleOrchestrator {
    pub fn new(clock: Arc<dyn Clock>, auto_revoke: bool) -> Self {
        Self {
            key_inventory: KeyInventory::new(clock.clone()),
            rotation_scheduler: AutoRotationScheduler::new(),
            usage_anomaly_analyzer: UsageAnomalyAnalyzer::new(clock.clone()),
            over_permission_detector: OverPermissionDetector::new(),
            leak_detector: CredentialLeakDetector::new(clock, auto_revoke),
            revocator: InstantRevocator::new(),
            health_score: KeyHealthScore::default(),
            rotation_verifier: RotationVerifier::new(),
        }
    }

    /// Runs `execute_rotation` only when the schedule's key is still
    /// active in `KeyInventory`; a revoked key's schedule is rejected
    /// rather than silently rotated.
    pub fn execute_rotation_if_active(&self, schedule_id: ScheduleId, clock: &dyn Clock) -> Result<RotationHistoryEntry> {
        let schedule = self
            .rotation_scheduler
            .get_schedule(schedule_id)
            .ok_or_else(|| CredentialError::ScheduleNotFound { id: schedule_id.to_string() })?;
        let key = self.key_inventory.get_key(schedule.key_id)?;
        if key.status == KeyStatus::Revoked {
            return Err(CredentialError::KeyAlreadyRevoked { id: schedule.key_id.to_string() });
        }
        self.rotation_scheduler.execute_rotation(schedule_id, clock)
    }

    pub fn get_summary(&self) -> CredentialLifecycleSummary {
        let inventory_summary = self.key_inventory.get_summary();
        let mut stats = inventory_summary.by_status;
        stats.insert("total_keys".to_string(), inventory_summary.total);
        stats.insert("auto_revoked_leaks".to_string(), self.leak_detector.auto_revoked_key_ids().len() as u64);
        CredentialLifecycleSummary { stats }
    }
}

impl Default for CredentialLifecycleOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), true)
    }
}
