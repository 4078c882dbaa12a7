//! Deterministic remediation suggestion templates keyed by bias type,
//! fairness metric, or severity bucket.

use crate::bias_detector::FindingType;
use crate::fairness_analyzer::FairnessMetric;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationPlan {
    pub steps: Vec<String>,
}

pub struct EthicsRemediationSuggester;

impl EthicsRemediationSuggester {
    pub fn suggest_for_bias(finding_type: FindingType) -> Vec<String> {
        match finding_type {
            FindingType::Demographic => vec![
                "apply reweighting to balance group outcome rates".to_string(),
                "evaluate adversarial debiasing during retraining".to_string(),
            ],
            FindingType::DisparateImpact => vec![
                "apply a disparate-impact remover transform".to_string(),
                "add continuous monitoring of the impact ratio".to_string(),
            ],
            FindingType::Representation => vec![
                "resample underrepresented groups in the training set".to_string(),
                "expand data collection to balance group coverage".to_string(),
            ],
        }
    }

    pub fn suggest_for_unknown_bias() -> Vec<String> {
        vec!["commission a general fairness audit".to_string()]
    }

    pub fn suggest_for_fairness(metric: FairnessMetric, score: f64) -> Vec<String> {
        let bucket = if score < 0.5 {
            "critical"
        } else if score < 0.7 {
            "high"
        } else if score < 0.8 {
            "medium"
        } else {
            "low"
        };
        vec![format!("{bucket} priority: review {metric:?} below the fairness threshold")]
    }

    /// Aggregates multiple issues into a single ordered plan.
    pub fn aggregate(plans: Vec<Vec<String>>) -> RemediationPlan {
        RemediationPlan { steps: plans.into_iter().flatten().collect() }
    }
}
