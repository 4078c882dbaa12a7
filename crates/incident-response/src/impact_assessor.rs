//! Blast-radius scoring for an incident: category, user and financial
//! exposure folded into a single impact score.

use crate::incident_detector::IncidentId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Catastrophic,
    Severe,
    Major,
    Moderate,
    Minor,
    Negligible,
}

impl ImpactLevel {
    fn base(self) -> f64 {
        match self {
            ImpactLevel::Catastrophic => 1.0,
            ImpactLevel::Severe => 0.85,
            ImpactLevel::Major => 0.7,
            ImpactLevel::Moderate => 0.5,
            ImpactLevel::Minor => 0.3,
            ImpactLevel::Negligible => 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub incident_id: IncidentId,
    pub impact_level: ImpactLevel,
    pub affected_categories: Vec<String>,
    pub affected_users: u64,
    pub financial_exposure: f64,
    pub impact_score: f64,
}

fn cat_factor(categories: &[String]) -> f64 {
    (0.05 * categories.len() as f64).min(0.2)
}

fn user_factor(affected_users: u64) -> f64 {
    if affected_users > 10_000 {
        0.15
    } else if affected_users > 1_000 {
        0.10
    } else if affected_users > 100 {
        0.05
    } else {
        0.0
    }
}

fn fin_factor(financial_exposure: f64) -> f64 {
    if financial_exposure > 1_000_000.0 {
        0.15
    } else if financial_exposure > 100_000.0 {
        0.10
    } else if financial_exposure > 10_000.0 {
        0.05
    } else {
        0.0
    }
}

pub struct IncidentImpactAssessor;

impl IncidentImpactAssessor {
    pub fn new() -> Self {
        Self
    }

    pub fn assess_impact(
        &self,
        incident_id: IncidentId,
        impact_level: ImpactLevel,
        affected_categories: Vec<String>,
        affected_users: u64,
        financial_exposure: f64,
    ) -> ImpactAssessment {
        let score = (impact_level.base() + cat_factor(&affected_categories) + user_factor(affected_users) + fin_factor(financial_exposure)).min(1.0);
        ImpactAssessment {
            incident_id,
            impact_level,
            affected_categories,
            affected_users,
            financial_exposure,
            impact_score: score,
        }
    }
}

impl Default for IncidentImpactAssessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an incident severity to the impact level used by `assess_impact`,
/// per the orchestrator's `respond_to_incident` fan-out.
pub fn severity_to_impact(severity: governance_core::Severity) -> ImpactLevel {
    use governance_core::Severity;
    match severity {
        Severity::Critical | Severity::Emergency => ImpactLevel::Catastrophic,
        Severity::High => ImpactLevel::Severe,
        Severity::Medium => ImpactLevel::Moderate,
        Severity::Low => ImpactLevel::Minor,
        Severity::Info | Severity::None => ImpactLevel::Negligible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catastrophic_with_no_extras_scores_base_only() {
        let assessor = IncidentImpactAssessor::new();
        let assessment = assessor.assess_impact(IncidentId::new(), ImpactLevel::Catastrophic, vec![], 0, 0.0);
        assert_eq!(assessment.impact_score, 1.0);
    }

    #[test]
    fn score_is_capped_at_one() {
        let assessor = IncidentImpactAssessor::new();
        let assessment = assessor.assess_impact(
            IncidentId::new(),
            ImpactLevel::Catastrophic,
            vec!["pii".to_string(), "financial".to_string(), "health".to_string()],
            50_000,
            5_000_000.0,
        );
        assert_eq!(assessment.impact_score, 1.0);
    }

    #[test]
    fn moderate_with_user_and_financial_factors_sums_correctly() {
        let assessor = IncidentImpactAssessor::new();
        let assessment = assessor.assess_impact(IncidentId::new(), ImpactLevel::Moderate, vec![], 500, 50_000.0);
        assert!((assessment.impact_score - (0.5 + 0.05 + 0.05)).abs() < 1e-9);
    }

    #[test]
    fn severity_to_impact_maps_critical_to_catastrophic() {
        assert_eq!(severity_to_impact(governance_core::Severity::Critical), ImpactLevel::Catastrophic);
        assert_eq!(severity_to_impact(governance_core::Severity::Low), ImpactLevel::Minor);
    }
}
