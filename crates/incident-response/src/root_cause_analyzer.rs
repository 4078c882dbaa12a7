//! Root-cause analysis: accumulates root causes, a timeline,
//! entry points and propagation paths for an incident.

use crate::error::{IncidentError, Result};
use crate::incident_detector::IncidentId;
use governance_core::{define_domain_id, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

define_domain_id!(AnalysisId, "rca");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootCause {
    pub description: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub description: String,
    pub at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Propagation {
    pub from_system: String,
    pub to_system: String,
    pub method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: AnalysisId,
    pub incident_id: IncidentId,
    pub root_causes: Vec<RootCause>,
    pub timeline: Vec<TimelineEvent>,
    pub entry_points: Vec<String>,
    pub propagations: Vec<Propagation>,
    pub linked_vulnerabilities: Vec<String>,
    pub status: AnalysisStatus,
    pub conclusion: Option<String>,
}

impl Identified<AnalysisId> for Analysis {
    fn id(&self) -> AnalysisId {
        self.id
    }
}

pub struct IncidentRootCauseAnalyzer {
    analyses: RecordStore<AnalysisId, Analysis>,
    #[allow(dead_code)]
    clock: Arc<dyn Clock>,
}

impl IncidentRootCauseAnalyzer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { analyses: RecordStore::new(), clock }
    }

    pub fn start_analysis(&self, incident_id: IncidentId) -> Analysis {
        let analysis = Analysis {
            id: AnalysisId::new(),
            incident_id,
            root_causes: Vec::new(),
            timeline: Vec::new(),
            entry_points: Vec::new(),
            propagations: Vec::new(),
            linked_vulnerabilities: Vec::new(),
            status: AnalysisStatus::InProgress,
            conclusion: None,
        };
        self.analyses.insert(analysis.clone());
        analysis
    }

    pub fn add_root_cause(&self, analysis_id: AnalysisId, description: String, confidence: f64) -> Result<Analysis> {
        let clamped = confidence.clamp(0.0, 1.0);
        self.analyses
            .update(analysis_id, |a| a.root_causes.push(RootCause { description, confidence: clamped }))
            .ok_or_else(|| IncidentError::AnalysisNotFound { id: analysis_id.to_string() })
    }

    pub fn add_timeline_event(&self, analysis_id: AnalysisId, description: String, at: chrono::DateTime<chrono::Utc>) -> Result<Analysis> {
        self.analyses
            .update(analysis_id, |a| {
                a.timeline.push(TimelineEvent { description, at });
                a.timeline.sort_by_key(|e| e.at);
            })
            .ok_or_else(|| IncidentError::AnalysisNotFound { id: analysis_id.to_string() })
    }

    pub fn add_entry_point(&self, analysis_id: AnalysisId, entry_point: String) -> Result<Analysis> {
        self.analyses
            .update(analysis_id, |a| a.entry_points.push(entry_point))
            .ok_or_else(|| IncidentError::AnalysisNotFound { id: analysis_id.to_string() })
    }

    pub fn add_propagation(&self, analysis_id: AnalysisId, from_system: String, to_system: String, method: String) -> Result<Analysis> {
        self.analyses
            .update(analysis_id, |a| a.propagations.push(Propagation { from_system, to_system, method }))
            .ok_or_else(|| IncidentError::AnalysisNotFound { id: analysis_id.to_string() })
    }

    pub fn link_vulnerability(&self, analysis_id: AnalysisId, cve_or_ref: String) -> Result<Analysis> {
        self.analyses
            .update(analysis_id, |a| a.linked_vulnerabilities.push(cve_or_ref))
            .ok_or_else(|| IncidentError::AnalysisNotFound { id: analysis_id.to_string() })
    }

    pub fn complete_analysis(&self, analysis_id: AnalysisId, conclusion: String) -> Result<Analysis> {
        self.analyses
            .update(analysis_id, |a| {
                a.status = AnalysisStatus::Completed;
                a.conclusion = Some(conclusion);
            })
            .ok_or_else(|| IncidentError::AnalysisNotFound { id: analysis_id.to_string() })
    }

    pub fn get_analysis(&self, analysis_id: AnalysisId) -> Result<Analysis> {
        self.analyses.get(analysis_id).ok_or_else(|| IncidentError::AnalysisNotFound { id: analysis_id.to_string() })
    }
}
