//! Evaluates context dictionaries against declared ethics rules.
//!
//! Shares its shape with `compliance::PolicyEnforcer` but fixes its
//! condition vocabulary to the ethics-specific metric names; any other
//! condition name falls back to a generic greater-than check.

use governance_core::{define_domain_id, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

define_domain_id!(RuleId, "erule");
define_domain_id!(ExceptionId, "eexc");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub condition: String,
    pub threshold: f64,
}

impl Identified<RuleId> for Rule {
    fn id(&self) -> RuleId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exception {
    pub id: ExceptionId,
    pub rule_id: RuleId,
    pub reason: String,
    pub active: bool,
}

impl Identified<ExceptionId> for Exception {
    fn id(&self) -> ExceptionId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: RuleId,
    pub condition: String,
    pub value: f64,
    pub threshold: f64,
}

pub struct EthicsRuleEngine {
    rules: RecordStore<RuleId, Rule>,
    exceptions: RecordStore<ExceptionId, Exception>,
}

impl Default for EthicsRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EthicsRuleEngine {
    pub fn new() -> Self {
        Self { rules: RecordStore::new(), exceptions: RecordStore::new() }
    }

    pub fn add_rule(&self, name: impl Into<String>, condition: impl Into<String>, threshold: f64) -> RuleId {
        let rule = Rule { id: RuleId::new(), name: name.into(), condition: condition.into(), threshold };
        let id = rule.id;
        self.rules.insert(rule);
        id
    }

    pub fn add_exception(&self, rule_id: RuleId, reason: impl Into<String>) -> ExceptionId {
        let exception = Exception { id: ExceptionId::new(), rule_id, reason: reason.into(), active: true };
        let id = exception.id;
        self.exceptions.insert(exception);
        id
    }

    pub fn revoke_exception(&self, exception_id: ExceptionId) -> bool {
        self.exceptions.update(exception_id, |e| e.active = false).is_some()
    }

    fn has_active_exception(&self, rule_id: RuleId) -> bool {
        self.exceptions.all().iter().any(|e| e.rule_id == rule_id && e.active)
    }

    pub fn evaluate(&self, context: &HashMap<String, f64>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in self.rules.all() {
            if self.has_active_exception(rule.id) {
                continue;
            }
            let Some(value) = context.get(context_key_for(&rule.condition)).copied() else {
                continue;
            };
            if condition_violates(&rule.condition, value, rule.threshold) {
                debug!(rule = %rule.name, condition = %rule.condition, value, threshold = rule.threshold, "ethics rule violated");
                violations.push(Violation {
                    rule_id: rule.id,
                    condition: rule.condition.clone(),
                    value,
                    threshold: rule.threshold,
                });
            }
        }
        violations
    }

    pub fn get_summary(&self) -> HashMap<String, u64> {
        let mut stats = HashMap::new();
        stats.insert("rules".to_string(), self.rules.len() as u64);
        stats.insert("exceptions".to_string(), self.exceptions.len() as u64);
        stats
    }
}

/// `transparency` reads its value from a differently-named context key
/// (`transparency_score`); every other built-in condition reads the
/// context key matching its own name.
fn context_key_for(condition: &str) -> &str {
    match condition {
        "transparency" => "transparency_score",
        other => other,
    }
}

/// The fixed ethics condition vocabulary has an intrinsic direction:
/// higher bias and disparity are bad, lower fairness and transparency
/// are bad. Any other condition name falls back to a plain `>` check
/// against `context[condition]`.
fn condition_violates(condition: &str, value: f64, threshold: f64) -> bool {
    match condition {
        "bias_score" => value > threshold,
        "fairness_score" => value < threshold,
        "disparity_ratio" => value < threshold,
        "transparency" => value < threshold,
        _ => value > threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_score_violates_above_threshold() {
        let engine = EthicsRuleEngine::new();
        engine.add_rule("bias cap", "bias_score", 0.3);
        let mut ctx = HashMap::new();
        ctx.insert("bias_score".to_string(), 0.5);
        let violations = engine.evaluate(&ctx);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn fairness_score_violates_below_threshold() {
        let engine = EthicsRuleEngine::new();
        engine.add_rule("fairness floor", "fairness_score", 0.8);
        let mut ctx = HashMap::new();
        ctx.insert("fairness_score".to_string(), 0.5);
        assert_eq!(engine.evaluate(&ctx).len(), 1);
    }

    #[test]
    fn active_exception_suppresses_violation() {
        let engine = EthicsRuleEngine::new();
        let rule_id = engine.add_rule("bias cap", "bias_score", 0.3);
        engine.add_exception(rule_id, "known limitation, approved by review board");
        let mut ctx = HashMap::new();
        ctx.insert("bias_score".to_string(), 0.9);
        assert!(engine.evaluate(&ctx).is_empty());
    }

    #[test]
    fn revoked_exception_restores_enforcement() {
        let engine = EthicsRuleEngine::new();
        let rule_id = engine.add_rule("bias cap", "bias_score", 0.3);
        let exception_id = engine.add_exception(rule_id, "temporary");
        engine.revoke_exception(exception_id);
        let mut ctx = HashMap::new();
        ctx.insert("bias_score".to_string(), 0.9);
        assert_eq!(engine.evaluate(&ctx).len(), 1);
    }

    #[test]
    fn missing_context_key_is_skipped() {
        let engine = EthicsRuleEngine::new();
        engine.add_rule("bias cap", "bias_score", 0.3);
        assert!(engine.evaluate(&HashMap::new()).is_empty());
    }

    /// A `transparency` rule reads `transparency_score` from the
    /// context, not a `transparency` key.
    #[test]
    fn transparency_rule_reads_transparency_score_key() {
        let engine = EthicsRuleEngine::new();
        engine.add_rule("transparency floor", "transparency", 0.8);
        let mut ctx = HashMap::new();
        ctx.insert("transparency_score".to_string(), 0.5);
        assert_eq!(engine.evaluate(&ctx).len(), 1);

        let mut wrong_key_ctx = HashMap::new();
        wrong_key_ctx.insert("transparency".to_string(), 0.5);
        assert!(engine.evaluate(&wrong_key_ctx).is_empty());
    }
}
