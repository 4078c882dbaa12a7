//! The decision matrix is an external, consumed interface: a static
//! `(risk_level, urgency_level) -> (action_type, confidence)` table. The
//! core looks actions up in it; it does not own the table's contents in
//! production (callers may substitute their own), but it must ship with
//! a working default so every orchestrator that consults it compiles and
//! behaves reasonably out of the box.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Notify,
    Review,
    Approve,
    Reject,
    Escalate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub action: ActionType,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct DecisionMatrix {
    table: HashMap<(RiskLevel, UrgencyLevel), DecisionOutcome>,
}

impl DecisionMatrix {
    /// The default table the platform ships with: action escalates as
    /// either axis climbs, confidence reflects how unambiguous the
    /// combination is (corners are unambiguous, the middle is not).
    pub fn default_table() -> Self {
        use ActionType::*;
        use RiskLevel::*;
        use UrgencyLevel::*;

        let entries = [
            ((Low, Low), (Notify, 0.95)),
            ((Low, Medium), (Notify, 0.85)),
            ((Low, High), (Review, 0.7)),
            ((Low, Critical), (Review, 0.6)),
            ((Medium, Low), (Notify, 0.8)),
            ((Medium, Medium), (Review, 0.75)),
            ((Medium, High), (Review, 0.65)),
            ((Medium, Critical), (Escalate, 0.6)),
            ((High, Low), (Review, 0.7)),
            ((High, Medium), (Review, 0.65)),
            ((High, High), (Escalate, 0.75)),
            ((High, Critical), (Escalate, 0.85)),
            ((Critical, Low), (Review, 0.6)),
            ((Critical, Medium), (Escalate, 0.7)),
            ((Critical, High), (Escalate, 0.9)),
            ((Critical, Critical), (Reject, 0.95)),
        ];

        let table = entries
            .into_iter()
            .map(|(key, (action, confidence))| (key, DecisionOutcome { action, confidence }))
            .collect();

        Self { table }
    }

    pub fn lookup(&self, risk: RiskLevel, urgency: UrgencyLevel) -> DecisionOutcome {
        self.table
            .get(&(risk, urgency))
            .copied()
            .unwrap_or(DecisionOutcome {
                action: ActionType::Review,
                confidence: 0.5,
            })
    }
}

impl Default for DecisionMatrix {
    fn default() -> Self {
        Self::default_table()
    }
}
