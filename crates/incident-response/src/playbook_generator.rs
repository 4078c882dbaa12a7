//! Playbooks: ordered procedures, automations and dry-run tests,
//! published under a monotonically incrementing version.

use crate::error::{IncidentError, Result};
use governance_core::{define_domain_id, Identified, RecordStore};
use serde::{Deserialize, Serialize};

define_domain_id!(PlaybookId, "pbook");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    pub step_order: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Automation {
    pub trigger_condition: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookTest {
    pub name: String,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playbook {
    pub id: PlaybookId,
    pub name: String,
    pub procedures: Vec<Procedure>,
    pub automations: Vec<Automation>,
    pub tests: Vec<PlaybookTest>,
    pub version: u32,
}

impl Identified<PlaybookId> for Playbook {
    fn id(&self) -> PlaybookId {
        self.id
    }
}

pub struct PlaybookGenerator {
    playbooks: RecordStore<PlaybookId, Playbook>,
}

impl PlaybookGenerator {
    pub fn new() -> Self {
        Self { playbooks: RecordStore::new() }
    }

    pub fn create_playbook(&self, name: String) -> Playbook {
        let playbook = Playbook { id: PlaybookId::new(), name, procedures: Vec::new(), automations: Vec::new(), tests: Vec::new(), version: 0 };
        self.playbooks.insert(playbook.clone());
        playbook
    }

    pub fn add_procedure(&self, playbook_id: PlaybookId, step_order: u32, description: String) -> Result<Playbook> {
        self.playbooks
            .update(playbook_id, |p| {
                p.procedures.push(Procedure { step_order, description });
                p.procedures.sort_by_key(|s| s.step_order);
            })
            .ok_or_else(|| IncidentError::PlaybookNotFound { id: playbook_id.to_string() })
    }

    pub fn add_automation(&self, playbook_id: PlaybookId, trigger_condition: String, action: String) -> Result<Playbook> {
        self.playbooks
            .update(playbook_id, |p| p.automations.push(Automation { trigger_condition, action }))
            .ok_or_else(|| IncidentError::PlaybookNotFound { id: playbook_id.to_string() })
    }

    /// Symbolic dry-run: every declared test passes.
    pub fn run_dry_run(&self, playbook_id: PlaybookId, test_names: &[String]) -> Result<Playbook> {
        self.playbooks
            .update(playbook_id, |p| {
                for name in test_names {
                    p.tests.push(PlaybookTest { name: name.clone(), passed: true });
                }
            })
            .ok_or_else(|| IncidentError::PlaybookNotFound { id: playbook_id.to_string() })
    }

    pub fn publish(&self, playbook_id: PlaybookId) -> Result<Playbook> {
        self.playbooks
            .update(playbook_id, |p| p.version += 1)
            .ok_or_else(|| IncidentError::PlaybookNotFound { id: playbook_id.to_string() })
    }

    pub fn get(&self, playbook_id: PlaybookId) -> Result<Playbook> {
        self.playbooks.get(playbook_id).ok_or_else(|| IncidentError::PlaybookNotFound { id: playbook_id.to_string() })
    }
}

impl Default for PlaybookGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedures_are_kept_sorted_by_step_order() {
        let generator = PlaybookGenerator::new();
        let playbook = generator.create_playbook("ransomware response".to_string());
        generator.add_procedure(playbook.id, 3, "notify legal".to_string()).unwrap();
        let updated = generator.add_procedure(playbook.id, 1, "isolate hosts".to_string()).unwrap();
        assert_eq!(updated.procedures[0].step_order, 1);
        assert_eq!(updated.procedures[1].step_order, 3);
    }

    #[test]
    fn publish_increments_version_monotonically() {
        let generator = PlaybookGenerator::new();
        let playbook = generator.create_playbook("phishing response".to_string());
        let v1 = generator.publish(playbook.id).unwrap();
        let v2 = generator.publish(playbook.id).unwrap();
        assert_eq!(v1.version, 1);
        assert_eq!(v2.version, 2);
    }

    #[test]
    fn dry_run_marks_every_declared_test_as_passed() {
        let generator = PlaybookGenerator::new();
        let playbook = generator.create_playbook("insider threat response".to_string());
        let updated = generator.run_dry_run(playbook.id, &["containment_step".to_string(), "notification_step".to_string()]).unwrap();
        assert!(updated.tests.iter().all(|t| t.passed));
    }

    #[test]
    fn unknown_playbook_id_errors() {
        let generator = PlaybookGenerator::new();
        assert!(generator.publish(PlaybookId::new()).is_err());
    }
}
