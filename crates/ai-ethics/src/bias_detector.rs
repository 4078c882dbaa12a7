//! Detects statistical disparities in a tabular dataset across a
//! protected attribute with respect to a binary outcome.

use crate::error::{AiEthicsError, Result};
use governance_core::{define_domain_id, Identified, RecordStore, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

define_domain_id!(DatasetId, "ds");
define_domain_id!(DetectionId, "bdet");

pub type DatasetRecord = HashMap<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub name: String,
    pub records: Vec<DatasetRecord>,
    pub protected_attrs: HashSet<String>,
    pub outcome_attr: String,
}

impl Identified<DatasetId> for Dataset {
    fn id(&self) -> DatasetId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingType {
    Demographic,
    DisparateImpact,
    Representation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub finding_type: FindingType,
    pub attribute: String,
    pub score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub id: DetectionId,
    pub dataset_id: DatasetId,
    pub findings: Vec<Finding>,
    pub bias_score: f64,
    pub severity: Severity,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<DetectionId> for Detection {
    fn id(&self) -> DetectionId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributePattern {
    pub attribute: String,
    pub entropy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasDetectorSummary {
    pub retrieved: bool,
    pub stats: HashMap<String, u64>,
}

/// Thresholds the demographic-parity, disparate-impact and
/// representation checks are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct BiasThresholds {
    pub parity_threshold: f64,
    pub impact_threshold: f64,
}

impl Default for BiasThresholds {
    fn default() -> Self {
        Self {
            parity_threshold: 0.8,
            impact_threshold: 0.8,
        }
    }
}

pub struct BiasDetector {
    datasets: RecordStore<DatasetId, Dataset>,
    detections: RecordStore<DetectionId, Detection>,
    thresholds: BiasThresholds,
}

impl BiasDetector {
    pub fn new(thresholds: BiasThresholds) -> Self {
        Self {
            datasets: RecordStore::new(),
            detections: RecordStore::new(),
            thresholds,
        }
    }

    pub fn add_dataset(
        &self,
        name: impl Into<String>,
        records: Vec<DatasetRecord>,
        protected_attrs: HashSet<String>,
        outcome_attr: impl Into<String>,
    ) -> Result<DatasetId> {
        let dataset = Dataset {
            id: DatasetId::new(),
            name: name.into(),
            records,
            protected_attrs,
            outcome_attr: outcome_attr.into(),
        };
        let id = dataset.id;
        debug!(dataset_id = %id, records = dataset.records.len(), "registered dataset for bias scanning");
        self.datasets.insert(dataset);
        Ok(id)
    }

    pub fn scan_for_bias(&self, dataset_id: DatasetId) -> Result<Detection> {
        let dataset = self
            .datasets
            .get(dataset_id)
            .ok_or_else(|| AiEthicsError::DatasetNotFound { id: dataset_id.to_string() })?;

        let mut findings = Vec::new();

        for attribute in &dataset.protected_attrs {
            let groups = group_positive_rates(&dataset.records, attribute, &dataset.outcome_attr);
            if groups.len() < 2 {
                continue;
            }

            if let Some(finding) = demographic_parity_finding(attribute, &groups, self.thresholds.parity_threshold) {
                findings.push(finding);
            }
            if let Some(finding) = disparate_impact_finding(attribute, &groups, self.thresholds.impact_threshold) {
                findings.push(finding);
            }
            if let Some(finding) = representation_finding(attribute, &dataset.records) {
                findings.push(finding);
            }
        }

        let bias_score = if findings.is_empty() {
            0.0
        } else {
            findings.iter().map(|f| f.score).sum::<f64>() / findings.len() as f64
        };
        let severity = Severity::from_score(bias_score);

        if !findings.is_empty() {
            warn!(dataset_id = %dataset_id, finding_count = findings.len(), bias_score, "bias findings emitted");
        }

        let detection = Detection {
            id: DetectionId::new(),
            dataset_id,
            findings,
            bias_score,
            severity,
            created_at: chrono::Utc::now(),
        };
        self.detections.insert(detection.clone());
        Ok(detection)
    }

    /// Shannon entropy of the value distribution for each protected
    /// attribute, as a simple measure of representation diversity.
    pub fn analyze_patterns(&self, dataset_id: DatasetId) -> Result<Vec<AttributePattern>> {
        let dataset = self
            .datasets
            .get(dataset_id)
            .ok_or_else(|| AiEthicsError::DatasetNotFound { id: dataset_id.to_string() })?;

        let patterns = dataset
            .protected_attrs
            .iter()
            .map(|attribute| AttributePattern {
                attribute: attribute.clone(),
                entropy: shannon_entropy(&dataset.records, attribute),
            })
            .collect();
        Ok(patterns)
    }

    pub fn get_detection_info(&self, detection_id: DetectionId) -> Result<Detection> {
        self.detections
            .get(detection_id)
            .ok_or_else(|| AiEthicsError::DetectionNotFound { id: detection_id.to_string() })
    }

    pub fn get_summary(&self) -> BiasDetectorSummary {
        let mut stats = HashMap::new();
        stats.insert("datasets".to_string(), self.datasets.len() as u64);
        stats.insert("detections".to_string(), self.detections.len() as u64);
        let finding_count: u64 = self
            .detections
            .all()
            .iter()
            .map(|d| d.findings.len() as u64)
            .sum();
        stats.insert("findings".to_string(), finding_count);
        BiasDetectorSummary { retrieved: true, stats }
    }
}

fn attribute_bucket(record: &DatasetRecord, attribute: &str) -> String {
    record
        .get(attribute)
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_positive_outcome(record: &DatasetRecord, outcome_attr: &str) -> bool {
    match record.get(outcome_attr) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f > 0.0).unwrap_or(false),
        _ => false,
    }
}

/// `(group -> (positive_count, total_count))`
fn group_positive_rates(
    records: &[DatasetRecord],
    attribute: &str,
    outcome_attr: &str,
) -> HashMap<String, (u64, u64)> {
    let mut groups: HashMap<String, (u64, u64)> = HashMap::new();
    for record in records {
        let bucket = attribute_bucket(record, attribute);
        let entry = groups.entry(bucket).or_insert((0, 0));
        entry.1 += 1;
        if is_positive_outcome(record, outcome_attr) {
            entry.0 += 1;
        }
    }
    groups
}

fn positive_rates(groups: &HashMap<String, (u64, u64)>) -> Vec<f64> {
    groups
        .values()
        .map(|(positive, total)| if *total == 0 { 0.0 } else { *positive as f64 / *total as f64 })
        .collect()
}

fn demographic_parity_finding(attribute: &str, groups: &HashMap<String, (u64, u64)>, parity_threshold: f64) -> Option<Finding> {
    let rates = positive_rates(groups);
    let max = rates.iter().cloned().fold(f64::MIN, f64::max);
    let min = rates.iter().cloned().fold(f64::MAX, f64::min);
    let gap = max - min;

    if gap > 1.0 - parity_threshold {
        let score = (gap * 2.0).min(1.0);
        Some(Finding {
            finding_type: FindingType::Demographic,
            attribute: attribute.to_string(),
            score,
            severity: Severity::from_score(score),
        })
    } else {
        None
    }
}

fn disparate_impact_finding(attribute: &str, groups: &HashMap<String, (u64, u64)>, impact_threshold: f64) -> Option<Finding> {
    let rates = positive_rates(groups);
    let max = rates.iter().cloned().fold(f64::MIN, f64::max);
    let min = rates.iter().cloned().fold(f64::MAX, f64::min);
    if max <= 0.0 {
        return None;
    }
    let ratio = min / max;

    if ratio < impact_threshold {
        let score = (1.0 - ratio).max(0.0);
        Some(Finding {
            finding_type: FindingType::DisparateImpact,
            attribute: attribute.to_string(),
            score,
            severity: Severity::from_score(score),
        })
    } else {
        None
    }
}

fn representation_finding(attribute: &str, records: &[DatasetRecord]) -> Option<Finding> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records {
        *counts.entry(attribute_bucket(record, attribute)).or_insert(0) += 1;
    }
    if counts.len() < 2 {
        return None;
    }
    let total = records.len() as f64;
    let num_groups = counts.len() as f64;
    let expected = total / num_groups;
    let max_dev = counts
        .values()
        .map(|count| (*count as f64 - expected).abs())
        .fold(0.0, f64::max)
        / expected.max(1.0);

    if max_dev > 0.5 {
        let score = max_dev.min(1.0);
        Some(Finding {
            finding_type: FindingType::Representation,
            attribute: attribute.to_string(),
            score,
            severity: Severity::from_score(score),
        })
    } else {
        None
    }
}

fn shannon_entropy(records: &[DatasetRecord], attribute: &str) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records {
        *counts.entry(attribute_bucket(record, attribute)).or_insert(0) += 1;
    }
    let total = records.len() as f64;
    -counts
        .values()
        .map(|count| {
            let p = *count as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(gender: &str, result: bool) -> DatasetRecord {
        let mut r = HashMap::new();
        r.insert("gender".to_string(), json!(gender));
        r.insert("result".to_string(), json!(result));
        r
    }

    /// A skewed demographic outcome split should surface as a high or
    /// critical bias finding.
    #[test]
    fn s1_bias_demographic() {
        let detector = BiasDetector::new(BiasThresholds::default());
        let mut records = Vec::new();
        for _ in 0..20 {
            records.push(record("M", true));
        }
        for _ in 0..20 {
            records.push(record("F", false));
        }
        let mut protected = HashSet::new();
        protected.insert("gender".to_string());

        let dataset_id = detector.add_dataset("loans", records, protected, "result").unwrap();
        let detection = detector.scan_for_bias(dataset_id).unwrap();

        assert!(detection.findings.len() >= 1);
        assert!(detection.bias_score > 0.0);
        assert!(matches!(detection.severity, Severity::High | Severity::Critical));
    }

    #[test]
    fn fewer_than_two_groups_emits_no_finding() {
        let detector = BiasDetector::new(BiasThresholds::default());
        let records = vec![record("M", true), record("M", false)];
        let mut protected = HashSet::new();
        protected.insert("gender".to_string());
        let dataset_id = detector.add_dataset("single-group", records, protected, "result").unwrap();
        let detection = detector.scan_for_bias(dataset_id).unwrap();
        assert!(detection.findings.is_empty());
        assert_eq!(detection.bias_score, 0.0);
    }

    #[test]
    fn empty_dataset_scores_zero() {
        let detector = BiasDetector::new(BiasThresholds::default());
        let mut protected = HashSet::new();
        protected.insert("gender".to_string());
        let dataset_id = detector.add_dataset("empty", Vec::new(), protected, "result").unwrap();
        let detection = detector.scan_for_bias(dataset_id).unwrap();
        assert_eq!(detection.bias_score, 0.0);
    }

    /// Domain property 1: monotonicity of the demographic parity gap.
    #[test]
    fn demographic_parity_gap_is_monotonic_in_one_group_rate() {
        let groups_before: HashMap<String, (u64, u64)> =
            [("M".to_string(), (5, 10)), ("F".to_string(), (5, 10))].into_iter().collect();
        let groups_after: HashMap<String, (u64, u64)> =
            [("M".to_string(), (9, 10)), ("F".to_string(), (5, 10))].into_iter().collect();

        let before = demographic_parity_finding("gender", &groups_before, 0.8);
        let after = demographic_parity_finding("gender", &groups_after, 0.8);
        let before_score = before.map(|f| f.score).unwrap_or(0.0);
        let after_score = after.map(|f| f.score).unwrap_or(0.0);
        assert!(after_score >= before_score);
    }

    #[test]
    fn unknown_attribute_value_buckets_as_unknown() {
        let mut r = HashMap::new();
        r.insert("result".to_string(), json!(true));
        assert_eq!(attribute_bucket(&r, "gender"), "unknown");
    }

    #[test]
    fn get_summary_reports_non_negative_counts() {
        let detector = BiasDetector::new(BiasThresholds::default());
        let summary = detector.get_summary();
        assert!(summary.retrieved);
        assert_eq!(summary.stats["datasets"], 0);
    }
}
