//! Produces model cards, decision explanations and stakeholder
//! reports, and tracks their draft/published lifecycle.

use crate::error::{AiEthicsError, Result};
use governance_core::{define_domain_id, Identified, RecordStore};
use serde::{Deserialize, Serialize};

define_domain_id!(DisclosureId, "disc");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCard {
    pub name: String,
    pub intended_use: String,
    pub limitations: Vec<String>,
    pub training_data_description: String,
    pub performance_metrics: Vec<(String, f64)>,
    pub ethical_considerations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedFactor {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionExplanation {
    pub decision_id: String,
    pub factors: Vec<WeightedFactor>,
    pub alternatives: Vec<String>,
    pub confidence: f64,
    pub audience: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeholderReport {
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DisclosureContent {
    ModelCard(ModelCard),
    DecisionExplanation(DecisionExplanation),
    StakeholderReport(StakeholderReport),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disclosure {
    pub id: DisclosureId,
    pub content: DisclosureContent,
    pub status: DisclosureStatus,
}

impl Identified<DisclosureId> for Disclosure {
    fn id(&self) -> DisclosureId {
        self.id
    }
}

pub struct TransparencyReporter {
    disclosures: RecordStore<DisclosureId, Disclosure>,
}

impl Default for TransparencyReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TransparencyReporter {
    pub fn new() -> Self {
        Self { disclosures: RecordStore::new() }
    }

    pub fn draft(&self, content: DisclosureContent) -> DisclosureId {
        let disclosure = Disclosure { id: DisclosureId::new(), content, status: DisclosureStatus::Draft };
        let id = disclosure.id;
        self.disclosures.insert(disclosure);
        id
    }

    pub fn publish(&self, disclosure_id: DisclosureId) -> Result<Disclosure> {
        self.disclosures
            .update(disclosure_id, |d| d.status = DisclosureStatus::Published)
            .ok_or_else(|| AiEthicsError::DisclosureNotFound { id: disclosure_id.to_string() })
    }

    pub fn get(&self, disclosure_id: DisclosureId) -> Result<Disclosure> {
        self.disclosures
            .get(disclosure_id)
            .ok_or_else(|| AiEthicsError::DisclosureNotFound { id: disclosure_id.to_string() })
    }

    pub fn list_published(&self) -> Vec<Disclosure> {
        self.disclosures.all().into_iter().filter(|d| d.status == DisclosureStatus::Published).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> ModelCard {
        ModelCard {
            name: "loan-scoring-v3".to_string(),
            intended_use: "consumer credit risk ranking".to_string(),
            limitations: vec!["not validated outside the US market".to_string()],
            training_data_description: "five years of anonymized application records".to_string(),
            performance_metrics: vec![("auc".to_string(), 0.84)],
            ethical_considerations: vec!["monitored for demographic parity".to_string()],
        }
    }

    #[test]
    fn disclosures_start_as_draft() {
        let reporter = TransparencyReporter::new();
        let id = reporter.draft(DisclosureContent::ModelCard(card()));
        let disclosure = reporter.get(id).unwrap();
        assert_eq!(disclosure.status, DisclosureStatus::Draft);
    }

    #[test]
    fn publish_moves_to_published() {
        let reporter = TransparencyReporter::new();
        let id = reporter.draft(DisclosureContent::ModelCard(card()));
        reporter.publish(id).unwrap();
        assert_eq!(reporter.list_published().len(), 1);
    }

    #[test]
    fn unknown_disclosure_errors() {
        let reporter = TransparencyReporter::new();
        assert!(reporter.get(DisclosureId::new()).is_err());
    }
}
