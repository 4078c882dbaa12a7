//! Computes fairness metrics over a sequence of model predictions.

use governance_core::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub group: String,
    pub actual: bool,
    pub predicted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FairnessMetric {
    DemographicParity,
    EqualOpportunity,
    EqualizedOdds,
    Calibration,
    GroupFairness,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricResult {
    pub metric: FairnessMetric,
    pub score: f64,
    pub passes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessReport {
    pub metrics: Vec<MetricResult>,
    pub fairness_score: f64,
    pub is_fair: bool,
    pub severity: Severity,
}

#[derive(Default)]
struct GroupCounts {
    total: u64,
    predicted_positive: u64,
    actual_positive: u64,
    true_positive: u64,
    false_positive: u64,
    correct: u64,
}

pub struct FairnessAnalyzer {
    pub fairness_threshold: f64,
}

impl Default for FairnessAnalyzer {
    fn default() -> Self {
        Self { fairness_threshold: 0.8 }
    }
}

impl FairnessAnalyzer {
    pub fn new(fairness_threshold: f64) -> Self {
        Self { fairness_threshold }
    }

    pub fn analyze(&self, predictions: &[Prediction]) -> FairnessReport {
        let groups = group_counts(predictions);

        let metrics = vec![
            MetricResult {
                metric: FairnessMetric::DemographicParity,
                score: ratio_of(&groups, |g| rate(g.predicted_positive, g.total)),
                passes: false,
            },
            MetricResult {
                metric: FairnessMetric::EqualOpportunity,
                score: ratio_of(&groups, |g| rate(g.true_positive, g.actual_positive)),
                passes: false,
            },
            MetricResult {
                metric: FairnessMetric::EqualizedOdds,
                score: equalized_odds(&groups),
                passes: false,
            },
            MetricResult {
                metric: FairnessMetric::Calibration,
                score: ratio_of(&groups, |g| rate(g.true_positive, g.predicted_positive)),
                passes: false,
            },
            MetricResult {
                metric: FairnessMetric::GroupFairness,
                score: ratio_of(&groups, |g| rate(g.correct, g.total)),
                passes: false,
            },
        ]
        .into_iter()
        .map(|mut m| {
            m.passes = m.score >= self.fairness_threshold;
            m
        })
        .collect::<Vec<_>>();

        let fairness_score = metrics.iter().map(|m| m.score).sum::<f64>() / metrics.len() as f64;
        let is_fair = fairness_score >= self.fairness_threshold;
        let severity = if is_fair {
            Severity::None
        } else {
            Severity::from_score(1.0 - fairness_score)
        };

        FairnessReport { metrics, fairness_score, is_fair, severity }
    }
}

fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn group_counts(predictions: &[Prediction]) -> HashMap<String, GroupCounts> {
    let mut groups: HashMap<String, GroupCounts> = HashMap::new();
    for p in predictions {
        let entry = groups.entry(p.group.clone()).or_default();
        entry.total += 1;
        if p.predicted {
            entry.predicted_positive += 1;
        }
        if p.actual {
            entry.actual_positive += 1;
        }
        if p.actual && p.predicted {
            entry.true_positive += 1;
        }
        if !p.actual && p.predicted {
            entry.false_positive += 1;
        }
        if p.actual == p.predicted {
            entry.correct += 1;
        }
    }
    groups
}

/// `min(rates) / max(rates)`, or 1.0 when there is a single group.
fn ratio_of<F>(groups: &HashMap<String, GroupCounts>, rate_fn: F) -> f64
where
    F: Fn(&GroupCounts) -> f64,
{
    if groups.len() < 2 {
        return 1.0;
    }
    let rates: Vec<f64> = groups.values().map(rate_fn).collect();
    let max = rates.iter().cloned().fold(f64::MIN, f64::max);
    let min = rates.iter().cloned().fold(f64::MAX, f64::min);
    if max <= 0.0 {
        1.0
    } else {
        min / max
    }
}

fn equalized_odds(groups: &HashMap<String, GroupCounts>) -> f64 {
    if groups.len() < 2 {
        return 1.0;
    }
    let tprs: Vec<f64> = groups.values().map(|g| rate(g.true_positive, g.actual_positive)).collect();
    let fprs: Vec<f64> = groups
        .values()
        .map(|g| rate(g.false_positive, g.total - g.actual_positive))
        .collect();

    let tpr_max = tprs.iter().cloned().fold(f64::MIN, f64::max);
    let tpr_min = tprs.iter().cloned().fold(f64::MAX, f64::min);
    let tpr_ratio = if tpr_max <= 0.0 { 1.0 } else { tpr_min / tpr_max };

    let fpr_max = fprs.iter().cloned().fold(f64::MIN, f64::max);
    let fpr_min = fprs.iter().cloned().fold(f64::MAX, f64::min);
    let fpr_component = 1.0 - (fpr_max - fpr_min);

    (tpr_ratio + fpr_component) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pred(group: &str, actual: bool, predicted: bool) -> Prediction {
        Prediction { group: group.to_string(), actual, predicted }
    }

    /// Domain property 2: reordering predictions never changes the result.
    #[test]
    fn fairness_is_order_independent() {
        let analyzer = FairnessAnalyzer::default();
        let mut preds = vec![
            pred("A", true, true),
            pred("A", false, false),
            pred("B", true, false),
            pred("B", false, false),
        ];
        let report_a = analyzer.analyze(&preds);
        preds.reverse();
        let report_b = analyzer.analyze(&preds);
        assert_eq!(report_a.fairness_score, report_b.fairness_score);
    }

    #[test]
    fn single_group_is_trivially_fair() {
        let analyzer = FairnessAnalyzer::default();
        let preds = vec![pred("A", true, true), pred("A", false, false)];
        let report = analyzer.analyze(&preds);
        assert!(report.is_fair);
        assert_eq!(report.fairness_score, 1.0);
    }

    /// Scenario S2: a 20/20 split where group M is always predicted
    /// positive and group F is always predicted negative (both with the
    /// same actual outcome) fails a 0.9 fairness threshold.
    #[test]
    fn s2_fairness_parity() {
        let analyzer = FairnessAnalyzer::new(0.9);
        let mut preds = Vec::new();
        for _ in 0..20 {
            preds.push(pred("M", true, true));
        }
        for _ in 0..20 {
            preds.push(pred("F", true, false));
        }
        let report = analyzer.analyze(&preds);
        assert!(!report.is_fair);
        assert!(report.fairness_score < 0.9);
    }

    #[test]
    fn disparate_groups_lower_the_score() {
        let analyzer = FairnessAnalyzer::default();
        let mut preds = Vec::new();
        for _ in 0..10 {
            preds.push(pred("A", true, true));
        }
        for _ in 0..10 {
            preds.push(pred("B", true, false));
        }
        let report = analyzer.analyze(&preds);
        assert!(!report.is_fair);
        assert!(report.fairness_score < 0.8);
    }
}
