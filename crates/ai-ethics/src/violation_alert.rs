//! Central alert store for ethics violations, with escalation and a
//! linear acknowledge/resolve lifecycle.

use crate::error::{AiEthicsError, Result};
use governance_core::{define_domain_id, Clock, Identified, RecordStore, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

define_domain_id!(AlertId, "ealert");
define_domain_id!(EscalationId, "eesc");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Open,
    Acknowledged,
    Resolved,
    Dismissed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub severity: Severity,
    pub message: String,
    pub status: AlertStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<AlertId> for Alert {
    fn id(&self) -> AlertId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    pub id: EscalationId,
    pub alert_id: AlertId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<EscalationId> for Escalation {
    fn id(&self) -> EscalationId {
        self.id
    }
}

/// An alert rule is either a numeric-threshold condition (violated when
/// `context[field] > threshold`) or a boolean condition (violated when
/// `context[field] == true`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AlertCondition {
    Threshold { field: String, threshold: f64 },
    BooleanTrue { field: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub name: String,
    pub condition: AlertCondition,
    pub severity: Severity,
}

pub struct EthicsViolationAlert {
    alerts: RecordStore<AlertId, Alert>,
    escalations: RecordStore<EscalationId, Escalation>,
    clock: Arc<dyn Clock>,
    escalation_threshold: Severity,
}

impl EthicsViolationAlert {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            alerts: RecordStore::new(),
            escalations: RecordStore::new(),
            clock,
            escalation_threshold: Severity::High,
        }
    }

    pub fn raise_alert(&self, severity: Severity, message: impl Into<String>) -> AlertId {
        let alert = Alert {
            id: AlertId::new(),
            severity,
            message: message.into(),
            status: AlertStatus::Open,
            created_at: self.clock.now(),
        };
        let id = alert.id;
        self.alerts.insert(alert);

        if severity >= self.escalation_threshold {
            warn!(alert_id = %id, ?severity, "ethics alert escalated");
            self.escalations.insert(Escalation { id: EscalationId::new(), alert_id: id, created_at: self.clock.now() });
        }
        id
    }

    pub fn acknowledge(&self, alert_id: AlertId) -> Result<Alert> {
        self.transition(alert_id, AlertStatus::Open, AlertStatus::Acknowledged)
    }

    pub fn resolve(&self, alert_id: AlertId) -> Result<Alert> {
        self.transition(alert_id, AlertStatus::Acknowledged, AlertStatus::Resolved)
    }

    pub fn dismiss(&self, alert_id: AlertId) -> Result<Alert> {
        let current = self
            .alerts
            .get(alert_id)
            .ok_or_else(|| AiEthicsError::AlertNotFound { id: alert_id.to_string() })?;
        if current.status != AlertStatus::Open && current.status != AlertStatus::Acknowledged {
            return Err(AiEthicsError::InvalidAlertTransition {
                from: format!("{:?}", current.status),
                to: "Dismissed".to_string(),
            });
        }
        Ok(self.alerts.update(alert_id, |a| a.status = AlertStatus::Dismissed).unwrap())
    }

    fn transition(&self, alert_id: AlertId, from: AlertStatus, to: AlertStatus) -> Result<Alert> {
        let current = self
            .alerts
            .get(alert_id)
            .ok_or_else(|| AiEthicsError::AlertNotFound { id: alert_id.to_string() })?;
        if current.status != from {
            return Err(AiEthicsError::InvalidAlertTransition {
                from: format!("{:?}", current.status),
                to: format!("{to:?}"),
            });
        }
        Ok(self.alerts.update(alert_id, |a| a.status = to).unwrap())
    }

    pub fn check_violations(&self, rules: &[AlertRule], context: &HashMap<String, Value>) -> Vec<AlertId> {
        let mut raised = Vec::new();
        for rule in rules {
            let violated = match &rule.condition {
                AlertCondition::Threshold { field, threshold } => context
                    .get(field)
                    .and_then(Value::as_f64)
                    .map(|v| v > *threshold)
                    .unwrap_or(false),
                AlertCondition::BooleanTrue { field } => context.get(field).and_then(Value::as_bool).unwrap_or(false),
            };
            if violated {
                raised.push(self.raise_alert(rule.severity, format!("rule '{}' violated", rule.name)));
            }
        }
        raised
    }

    pub fn get_alert(&self, alert_id: AlertId) -> Result<Alert> {
        self.alerts.get(alert_id).ok_or_else(|| AiEthicsError::AlertNotFound { id: alert_id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;
    use serde_json::json;

    fn store() -> EthicsViolationAlert {
        EthicsViolationAlert::new(Arc::new(SystemClock))
    }

    #[test]
    fn high_severity_escalates() {
        let store = store();
        store.raise_alert(Severity::Critical, "bias threshold exceeded");
        assert_eq!(store.escalations.len(), 1);
    }

    #[test]
    fn low_severity_does_not_escalate() {
        let store = store();
        store.raise_alert(Severity::Low, "minor issue");
        assert_eq!(store.escalations.len(), 0);
    }

    #[test]
    fn lifecycle_is_linear() {
        let store = store();
        let id = store.raise_alert(Severity::Medium, "msg");
        assert!(store.resolve(id).is_err());
        store.acknowledge(id).unwrap();
        store.resolve(id).unwrap();
        assert!(store.acknowledge(id).is_err());
    }

    #[test]
    fn dismiss_is_terminal_from_open() {
        let store = store();
        let id = store.raise_alert(Severity::Medium, "msg");
        store.dismiss(id).unwrap();
        assert!(store.acknowledge(id).is_err());
    }

    #[test]
    fn check_violations_raises_for_threshold_and_boolean() {
        let store = store();
        let rules = vec![
            AlertRule {
                name: "bias".to_string(),
                condition: AlertCondition::Threshold { field: "bias_score".to_string(), threshold: 0.3 },
                severity: Severity::High,
            },
            AlertRule {
                name: "flagged".to_string(),
                condition: AlertCondition::BooleanTrue { field: "flagged".to_string() },
                severity: Severity::Medium,
            },
        ];
        let mut context = HashMap::new();
        context.insert("bias_score".to_string(), json!(0.5));
        context.insert("flagged".to_string(), json!(true));
        let raised = store.check_violations(&rules, &context);
        assert_eq!(raised.len(), 2);
    }
}
