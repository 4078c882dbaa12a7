//! Pre-seeds built-in compliance frameworks and tracks custom ones.

use crate::error::{ComplianceError, Result};
use governance_core::{define_domain_id, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

define_domain_id!(RequirementId, "req");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Framework {
    pub key: String,
    pub name: String,
    pub categories: Vec<String>,
    pub nominal_requirement_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub id: RequirementId,
    pub framework_key: String,
    pub description: String,
}

impl Identified<RequirementId> for Requirement {
    fn id(&self) -> RequirementId {
        self.id
    }
}

pub struct ComplianceFrameworkLoader {
    frameworks: std::sync::RwLock<HashMap<String, Framework>>,
    requirements: RecordStore<RequirementId, Requirement>,
}

impl Default for ComplianceFrameworkLoader {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ComplianceFrameworkLoader {
    pub fn new() -> Self {
        Self { frameworks: std::sync::RwLock::new(HashMap::new()), requirements: RecordStore::new() }
    }

    /// Seeds the four frameworks the platform ships with out of the box.
    pub fn with_builtins() -> Self {
        let loader = Self::new();
        for (key, name, categories, count) in builtin_frameworks() {
            loader
                .frameworks
                .write()
                .unwrap()
                .insert(key.to_string(), Framework { key: key.to_string(), name: name.to_string(), categories, nominal_requirement_count: count });
        }
        loader
    }

    pub fn register_framework(&self, key: impl Into<String>, name: impl Into<String>, categories: Vec<String>) -> Result<()> {
        let key = key.into();
        let mut frameworks = self.frameworks.write().unwrap();
        if frameworks.contains_key(&key) {
            return Err(ComplianceError::DuplicateFramework { key });
        }
        frameworks.insert(key.clone(), Framework { key, name: name.into(), categories, nominal_requirement_count: 0 });
        Ok(())
    }

    pub fn get_framework(&self, key: &str) -> Result<Framework> {
        self.frameworks.read().unwrap().get(key).cloned().ok_or_else(|| ComplianceError::FrameworkNotFound { id: key.to_string() })
    }

    pub fn attach_requirement(&self, framework_key: &str, description: impl Into<String>) -> Result<RequirementId> {
        if !self.frameworks.read().unwrap().contains_key(framework_key) {
            return Err(ComplianceError::FrameworkNotFound { id: framework_key.to_string() });
        }
        let requirement = Requirement { id: RequirementId::new(), framework_key: framework_key.to_string(), description: description.into() };
        let id = requirement.id;
        self.requirements.insert(requirement);
        Ok(id)
    }

    pub fn requirement_count(&self, framework_key: &str) -> usize {
        self.requirements.all().iter().filter(|r| r.framework_key == framework_key).count()
    }

    pub fn list_frameworks(&self) -> Vec<Framework> {
        self.frameworks.read().unwrap().values().cloned().collect()
    }
}

fn builtin_frameworks() -> Vec<(&'static str, &'static str, Vec<String>, u32)> {
    vec![
        ("gdpr", "General Data Protection Regulation", vec!["privacy".to_string(), "consent".to_string()], 99),
        ("kvkk", "Kişisel Verilerin Korunması Kanunu", vec!["privacy".to_string()], 48),
        ("pci_dss", "Payment Card Industry Data Security Standard", vec!["security".to_string(), "financial".to_string()], 78),
        ("soc2", "SOC 2", vec!["security".to_string(), "availability".to_string()], 64),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_frameworks_are_preseeded() {
        let loader = ComplianceFrameworkLoader::with_builtins();
        assert_eq!(loader.list_frameworks().len(), 4);
        assert!(loader.get_framework("gdpr").is_ok());
    }

    #[test]
    fn duplicate_custom_framework_fails() {
        let loader = ComplianceFrameworkLoader::new();
        loader.register_framework("custom", "Custom Policy", vec![]).unwrap();
        assert!(loader.register_framework("custom", "Custom Policy", vec![]).is_err());
    }

    #[test]
    fn requirements_are_counted_per_framework() {
        let loader = ComplianceFrameworkLoader::with_builtins();
        loader.attach_requirement("gdpr", "data subject access requests").unwrap();
        loader.attach_requirement("gdpr", "right to erasure").unwrap();
        assert_eq!(loader.requirement_count("gdpr"), 2);
        assert_eq!(loader.requirement_count("kvkk"), 0);
    }

    #[test]
    fn attaching_to_unknown_framework_fails() {
        let loader = ComplianceFrameworkLoader::new();
        assert!(loader.attach_requirement("unknown", "x").is_err());
    }
}
