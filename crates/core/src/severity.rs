//! Shared severity tiers.
//!
//! The source system treats severity as an ordered categorical label;
//! each evaluator picks whichever subset of the ordering it needs
//! (`EthicsViolationAlert` uses `info..critical`, `CredentialLeakDetector`
//! additionally uses `emergency`). `Severity` models the full tier so
//! every evaluator shares one ordering instead of redefining it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Info,
    Low,
    Medium,
    High,
    Critical,
    Emergency,
}

impl Severity {
    pub fn rank(&self) -> u8 {
        match self {
            Severity::None => 0,
            Severity::Info => 1,
            Severity::Low => 2,
            Severity::Medium => 3,
            Severity::High => 4,
            Severity::Critical => 5,
            Severity::Emergency => 6,
        }
    }

    /// Maps a finding score in `[0, 1]` to a severity tier using the
    /// boundaries shared by `BiasDetector`, `FairnessAnalyzer`'s
    /// remediation suggester, and `ProtectedClassMonitor`:
    /// `<0.1 none; <0.3 low; <0.5 medium; <0.7 high; >=0.7 critical`.
    pub fn from_score(score: f64) -> Self {
        if score < 0.1 {
            Severity::None
        } else if score < 0.3 {
            Severity::Low
        } else if score < 0.5 {
            Severity::Medium
        } else if score < 0.7 {
            Severity::High
        } else {
            Severity::Critical
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::None => "none",
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Emergency => "emergency",
        };
        write!(f, "{label}")
    }
}
