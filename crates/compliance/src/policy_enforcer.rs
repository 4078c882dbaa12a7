//! Evaluates context dictionaries against declared compliance policies.
//!
//! Shares its shape with `ai_ethics::EthicsRuleEngine` but each rule
//! names its operator explicitly instead of inferring a direction from
//! a fixed condition vocabulary.

use governance_core::{define_domain_id, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

define_domain_id!(PolicyId, "pol");
define_domain_id!(PolicyExceptionId, "pexc");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyOperator {
    Exists,
    Equals,
    NotEquals,
    Min,
    Max,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub name: String,
    pub field: String,
    pub operator: PolicyOperator,
    pub value: Value,
    pub auto_remediate: bool,
}

impl Identified<PolicyId> for Policy {
    fn id(&self) -> PolicyId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyException {
    pub id: PolicyExceptionId,
    pub policy_id: PolicyId,
    pub reason: String,
    pub active: bool,
}

impl Identified<PolicyExceptionId> for PolicyException {
    fn id(&self) -> PolicyExceptionId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyViolation {
    pub policy_id: PolicyId,
    pub field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remediation {
    pub policy_id: PolicyId,
    pub note: String,
}

pub struct PolicyEnforcer {
    policies: RecordStore<PolicyId, Policy>,
    exceptions: RecordStore<PolicyExceptionId, PolicyException>,
    remediations: RecordStore<PolicyId, Remediation>,
}

impl Identified<PolicyId> for Remediation {
    fn id(&self) -> PolicyId {
        self.policy_id
    }
}

impl Default for PolicyEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyEnforcer {
    pub fn new() -> Self {
        Self { policies: RecordStore::new(), exceptions: RecordStore::new(), remediations: RecordStore::new() }
    }

    pub fn add_policy(
        &self,
        name: impl Into<String>,
        field: impl Into<String>,
        operator: PolicyOperator,
        value: Value,
        auto_remediate: bool,
    ) -> PolicyId {
        let policy = Policy { id: PolicyId::new(), name: name.into(), field: field.into(), operator, value, auto_remediate };
        let id = policy.id;
        self.policies.insert(policy);
        id
    }

    pub fn add_exception(&self, policy_id: PolicyId, reason: impl Into<String>) -> PolicyExceptionId {
        let exception = PolicyException { id: PolicyExceptionId::new(), policy_id, reason: reason.into(), active: true };
        let id = exception.id;
        self.exceptions.insert(exception);
        id
    }

    pub fn revoke_exception(&self, exception_id: PolicyExceptionId) -> bool {
        self.exceptions.update(exception_id, |e| e.active = false).is_some()
    }

    fn has_active_exception(&self, policy_id: PolicyId) -> bool {
        self.exceptions.all().iter().any(|e| e.policy_id == policy_id && e.active)
    }

    pub fn evaluate(&self, context: &HashMap<String, Value>) -> Vec<PolicyViolation> {
        let mut violations = Vec::new();
        for policy in self.policies.all() {
            if self.has_active_exception(policy.id) {
                continue;
            }
            if operator_violates(&policy.operator, context.get(&policy.field), &policy.value) {
                debug!(policy = %policy.name, field = %policy.field, "compliance policy violated");
                violations.push(PolicyViolation { policy_id: policy.id, field: policy.field.clone() });
                if policy.auto_remediate {
                    self.remediations.insert(Remediation { policy_id: policy.id, note: format!("symbolic remediation for '{}'", policy.name) });
                }
            }
        }
        violations
    }

    pub fn remediation_history(&self) -> Vec<Remediation> {
        self.remediations.all()
    }

    pub fn get_summary(&self) -> HashMap<String, u64> {
        let mut stats = HashMap::new();
        stats.insert("policies".to_string(), self.policies.len() as u64);
        stats.insert("exceptions".to_string(), self.exceptions.len() as u64);
        stats.insert("remediations".to_string(), self.remediations.len() as u64);
        stats
    }
}

fn operator_violates(operator: &PolicyOperator, actual: Option<&Value>, expected: &Value) -> bool {
    match operator {
        PolicyOperator::Exists => actual.is_none(),
        PolicyOperator::Equals => actual != Some(expected),
        PolicyOperator::NotEquals => actual == Some(expected),
        PolicyOperator::Min => match (actual.and_then(Value::as_f64), expected.as_f64()) {
            (Some(a), Some(e)) => a < e,
            _ => false,
        },
        PolicyOperator::Max => match (actual.and_then(Value::as_f64), expected.as_f64()) {
            (Some(a), Some(e)) => a > e,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exists_violates_when_field_missing() {
        let enforcer = PolicyEnforcer::new();
        enforcer.add_policy("must have region", "region", PolicyOperator::Exists, Value::Null, false);
        let violations = enforcer.evaluate(&HashMap::new());
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn min_violates_below_threshold() {
        let enforcer = PolicyEnforcer::new();
        enforcer.add_policy("min score", "score", PolicyOperator::Min, json!(0.8), false);
        let mut ctx = HashMap::new();
        ctx.insert("score".to_string(), json!(0.5));
        assert_eq!(enforcer.evaluate(&ctx).len(), 1);
    }

    #[test]
    fn max_violates_above_threshold() {
        let enforcer = PolicyEnforcer::new();
        enforcer.add_policy("max risk", "risk", PolicyOperator::Max, json!(0.3), false);
        let mut ctx = HashMap::new();
        ctx.insert("risk".to_string(), json!(0.9));
        assert_eq!(enforcer.evaluate(&ctx).len(), 1);
    }

    #[test]
    fn auto_remediate_appends_symbolic_record() {
        let enforcer = PolicyEnforcer::new();
        enforcer.add_policy("max risk", "risk", PolicyOperator::Max, json!(0.3), true);
        let mut ctx = HashMap::new();
        ctx.insert("risk".to_string(), json!(0.9));
        enforcer.evaluate(&ctx);
        assert_eq!(enforcer.remediation_history().len(), 1);
    }

    /// Domain property 3: an active exception suppresses a violation
    /// that would otherwise fire; revoking it restores enforcement.
    #[test]
    fn active_exception_suppresses_violation() {
        let enforcer = PolicyEnforcer::new();
        let policy_id = enforcer.add_policy("max risk", "risk", PolicyOperator::Max, json!(0.3), false);
        let exception_id = enforcer.add_exception(policy_id, "reviewed and approved");
        let mut ctx = HashMap::new();
        ctx.insert("risk".to_string(), json!(0.9));
        assert!(enforcer.evaluate(&ctx).is_empty());

        enforcer.revoke_exception(exception_id);
        assert!(!enforcer.evaluate(&ctx).is_empty());
    }
}
