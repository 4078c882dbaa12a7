//! Incident detection, containment, forensics, root-cause analysis,
//! impact assessment, recovery and playbook management.

pub mod containment;
pub mod error;
pub mod forensic_collector;
pub mod impact_assessor;
pub mod incident_detector;
pub mod lesson_learner;
pub mod orchestrator;
pub mod playbook_generator;
pub mod recovery_executor;
pub mod root_cause_analyzer;

pub use containment::{AutoContainment, ContainmentAction, ContainmentId, ContainmentStatus, Quarantine, Suspension};
pub use error::{IncidentError, Result};
pub use forensic_collector::{CustodyAction, CustodyEntry, Evidence, EvidenceType, ForensicCollector, Snapshot};
pub use impact_assessor::{severity_to_impact, ImpactAssessment, ImpactLevel, IncidentImpactAssessor};
pub use incident_detector::{Correlation, Incident, IncidentDetector, IncidentId, IncidentStatus, IncidentType, Pattern};
pub use lesson_learner::{IncidentLessonLearner, Lesson};
pub use orchestrator::{IncidentOrchestrator, IncidentResponseResult, IncidentSummary};
pub use playbook_generator::{Automation, Playbook, PlaybookGenerator, Procedure};
pub use recovery_executor::{Checkpoint, RecoveryAction, RecoveryExecutor, RecoveryPlan};
pub use root_cause_analyzer::{Analysis, AnalysisStatus, IncidentRootCauseAnalyzer, Propagation, RootCause, TimelineEvent};
