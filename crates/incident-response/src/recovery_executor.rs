//! Recovery plan execution with checkpointing and rollback.

use crate::error::{IncidentError, Result};
use crate::incident_detector::IncidentId;
use governance_core::{define_domain_id, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

define_domain_id!(PlanId, "rplan");
define_domain_id!(RecoveryActionId, "ract");
define_domain_id!(CheckpointId, "ckpt");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryActionStatus {
    Pending,
    Executed,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointStatus {
    Taken,
    Restored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryAction {
    pub id: RecoveryActionId,
    pub plan_id: PlanId,
    pub description: String,
    pub status: RecoveryActionStatus,
}

impl Identified<RecoveryActionId> for RecoveryAction {
    fn id(&self) -> RecoveryActionId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: CheckpointId,
    pub action_id: RecoveryActionId,
    pub status: CheckpointStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<CheckpointId> for Checkpoint {
    fn id(&self) -> CheckpointId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryPlan {
    pub id: PlanId,
    pub incident_id: IncidentId,
    pub action_ids: Vec<RecoveryActionId>,
}

impl Identified<PlanId> for RecoveryPlan {
    fn id(&self) -> PlanId {
        self.id
    }
}

pub struct RecoveryExecutor {
    plans: RecordStore<PlanId, RecoveryPlan>,
    actions: RecordStore<RecoveryActionId, RecoveryAction>,
    checkpoints: RecordStore<CheckpointId, Checkpoint>,
    action_checkpoints: std::sync::RwLock<HashMap<RecoveryActionId, CheckpointId>>,
    clock: Arc<dyn Clock>,
}

impl RecoveryExecutor {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            plans: RecordStore::new(),
            actions: RecordStore::new(),
            checkpoints: RecordStore::new(),
            action_checkpoints: std::sync::RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub fn create_plan(&self, incident_id: IncidentId, action_descriptions: Vec<String>) -> RecoveryPlan {
        let plan_id = PlanId::new();
        let action_ids = action_descriptions
            .into_iter()
            .map(|description| {
                let action = RecoveryAction { id: RecoveryActionId::new(), plan_id, description, status: RecoveryActionStatus::Pending };
                let id = action.id;
                self.actions.insert(action);
                id
            })
            .collect();
        let plan = RecoveryPlan { id: plan_id, incident_id, action_ids };
        self.plans.insert(plan.clone());
        plan
    }

    pub fn execute_recovery(&self, action_id: RecoveryActionId) -> Result<RecoveryAction> {
        let checkpoint = Checkpoint { id: CheckpointId::new(), action_id, status: CheckpointStatus::Taken, created_at: self.clock.now() };
        self.checkpoints.insert(checkpoint.clone());
        self.action_checkpoints.write().unwrap().insert(action_id, checkpoint.id);
        self.actions
            .update(action_id, |a| a.status = RecoveryActionStatus::Executed)
            .ok_or_else(|| IncidentError::ActionNotFound { id: action_id.to_string() })
    }

    pub fn rollback(&self, action_id: RecoveryActionId) -> Result<RecoveryAction> {
        let checkpoint_id = *self
            .action_checkpoints
            .read()
            .unwrap()
            .get(&action_id)
            .ok_or_else(|| IncidentError::ActionNotFound { id: action_id.to_string() })?;
        self.checkpoints.update(checkpoint_id, |c| c.status = CheckpointStatus::Restored);
        self.actions
            .update(action_id, |a| a.status = RecoveryActionStatus::RolledBack)
            .ok_or_else(|| IncidentError::ActionNotFound { id: action_id.to_string() })
    }

    /// Symbolic verification: every named check passes in this baseline.
    pub fn verify_recovery(&self, checks: &[String]) -> HashMap<String, bool> {
        checks.iter().map(|c| (c.clone(), true)).collect()
    }

    pub fn get_plan(&self, plan_id: PlanId) -> Option<RecoveryPlan> {
        self.plans.get(plan_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;

    fn executor() -> RecoveryExecutor {
        RecoveryExecutor::new(Arc::new(SystemClock))
    }

    #[test]
    fn execute_recovery_takes_checkpoint_before_action() {
        let executor = executor();
        let plan = executor.create_plan(IncidentId::new(), vec!["restore database from backup".to_string()]);
        let action_id = plan.action_ids[0];
        let executed = executor.execute_recovery(action_id).unwrap();
        assert_eq!(executed.status, RecoveryActionStatus::Executed);
    }

    #[test]
    fn rollback_restores_checkpoint_and_flips_action() {
        let executor = executor();
        let plan = executor.create_plan(IncidentId::new(), vec!["rotate credentials".to_string()]);
        let action_id = plan.action_ids[0];
        executor.execute_recovery(action_id).unwrap();
        let rolled_back = executor.rollback(action_id).unwrap();
        assert_eq!(rolled_back.status, RecoveryActionStatus::RolledBack);
    }

    #[test]
    fn rollback_without_execution_errors() {
        let executor = executor();
        assert!(executor.rollback(RecoveryActionId::new()).is_err());
    }

    #[test]
    fn verify_recovery_passes_all_checks_in_baseline() {
        let executor = executor();
        let results = executor.verify_recovery(&["service_health".to_string(), "data_integrity".to_string()]);
        assert!(results.values().all(|&ok| ok));
    }
}
