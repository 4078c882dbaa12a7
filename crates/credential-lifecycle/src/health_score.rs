//! Weighted composite health score for a managed key.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorWeights {
    pub age: f64,
    pub usage: f64,
    pub permission: f64,
    pub rotation: f64,
    pub anomaly: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self { age: 0.20, usage: 0.25, permission: 0.20, rotation: 0.20, anomaly: 0.15 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthInputs {
    pub age_days: f64,
    pub max_age_days: f64,
    pub never_used: bool,
    pub error_rate: f64,
    pub idle_days: f64,
    pub unused_scopes: u32,
    pub total_scopes: u32,
    pub has_admin: bool,
    pub days_since_rotation: Option<f64>,
    pub policy_days: f64,
    pub critical_anomalies: u64,
    pub non_critical_anomalies: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthGrade {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScore {
    pub age_score: f64,
    pub usage_score: f64,
    pub permission_score: f64,
    pub rotation_score: f64,
    pub anomaly_score: f64,
    pub overall: f64,
    pub grade: HealthGrade,
}

fn age_factor(age_days: f64, max_age_days: f64) -> f64 {
    if age_days <= 0.0 {
        return 100.0;
    }
    (100.0 * (1.0 - age_days / max_age_days)).clamp(0.0, 100.0)
}

fn usage_factor(never_used: bool, error_rate: f64, idle_days: f64) -> f64 {
    if never_used {
        return 30.0;
    }
    let mut score: f64 = 100.0;
    if error_rate > 0.5 {
        score -= 40.0;
    } else if error_rate > 0.2 {
        score -= 20.0;
    } else if error_rate > 0.1 {
        score -= 10.0;
    }
    if idle_days > 90.0 {
        score -= 30.0;
    } else if idle_days > 30.0 {
        score -= 15.0;
    }
    score.max(0.0)
}

fn permission_factor(unused_scopes: u32, total_scopes: u32, has_admin: bool) -> f64 {
    if total_scopes == 0 {
        return 100.0;
    }
    let mut score: f64 = 100.0;
    score -= (10.0 * unused_scopes as f64).min(40.0);
    if has_admin {
        score -= 20.0;
    }
    if total_scopes > 10 {
        score -= 15.0;
    } else if total_scopes > 5 {
        score -= 5.0;
    }
    score.max(0.0)
}

fn rotation_factor(days_since_rotation: Option<f64>, policy_days: f64) -> f64 {
    let Some(days) = days_since_rotation else {
        return 60.0;
    };
    let ratio = days / policy_days;
    if ratio > 2.0 {
        10.0
    } else if ratio > 1.5 {
        30.0
    } else if ratio > 1.0 {
        50.0
    } else if ratio > 0.8 {
        70.0
    } else {
        100.0
    }
}

fn anomaly_factor(critical_anomalies: u64, non_critical_anomalies: u64) -> f64 {
    let mut score: f64 = 100.0;
    score -= (30.0 * critical_anomalies as f64).min(60.0);
    score -= (10.0 * non_critical_anomalies as f64).min(30.0);
    score.max(0.0)
}

fn grade_for(overall: f64) -> HealthGrade {
    if overall >= 90.0 {
        HealthGrade::Excellent
    } else if overall >= 70.0 {
        HealthGrade::Good
    } else if overall >= 50.0 {
        HealthGrade::Fair
    } else if overall >= 30.0 {
        HealthGrade::Poor
    } else {
        HealthGrade::Critical
    }
}

pub struct KeyHealthScore {
    pub weights: FactorWeights,
}

impl Default for KeyHealthScore {
    fn default() -> Self {
        Self { weights: FactorWeights::default() }
    }
}

impl KeyHealthScore {
    pub fn new(weights: FactorWeights) -> Self {
        Self { weights }
    }

    pub fn compute(&self, inputs: &HealthInputs) -> HealthScore {
        let age_score = age_factor(inputs.age_days, inputs.max_age_days);
        let usage_score = usage_factor(inputs.never_used, inputs.error_rate, inputs.idle_days);
        let permission_score = permission_factor(inputs.unused_scopes, inputs.total_scopes, inputs.has_admin);
        let rotation_score = rotation_factor(inputs.days_since_rotation, inputs.policy_days);
        let anomaly_score = anomaly_factor(inputs.critical_anomalies, inputs.non_critical_anomalies);

        let w = &self.weights;
        let overall = age_score * w.age + usage_score * w.usage + permission_score * w.permission + rotation_score * w.rotation + anomaly_score * w.anomaly;

        HealthScore { age_score, usage_score, permission_score, rotation_score, anomaly_score, overall, grade: grade_for(overall) }
    }
}
