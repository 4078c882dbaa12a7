//! Post-incident lesson capture.

use crate::incident_detector::IncidentId;
use governance_core::{define_domain_id, Identified, RecordStore};
use serde::{Deserialize, Serialize};

define_domain_id!(LessonId, "lsn");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub incident_id: IncidentId,
    pub what_went_well: Vec<String>,
    pub what_went_wrong: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Identified<LessonId> for Lesson {
    fn id(&self) -> LessonId {
        self.id
    }
}

pub struct IncidentLessonLearner {
    lessons: RecordStore<LessonId, Lesson>,
}

impl IncidentLessonLearner {
    pub fn new() -> Self {
        Self { lessons: RecordStore::new() }
    }

    pub fn record_lesson(
        &self,
        incident_id: IncidentId,
        what_went_well: Vec<String>,
        what_went_wrong: Vec<String>,
        recommendations: Vec<String>,
    ) -> Lesson {
        let lesson = Lesson { id: LessonId::new(), incident_id, what_went_well, what_went_wrong, recommendations };
        self.lessons.insert(lesson.clone());
        lesson
    }

    pub fn lessons_for(&self, incident_id: IncidentId) -> Vec<Lesson> {
        self.lessons.all().into_iter().filter(|l| l.incident_id == incident_id).collect()
    }

    pub fn all_recommendations(&self) -> Vec<String> {
        self.lessons.all().into_iter().flat_map(|l| l.recommendations).collect()
    }
}

impl Default for IncidentLessonLearner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_lesson_is_retrievable_by_incident() {
        let learner = IncidentLessonLearner::new();
        let incident_id = IncidentId::new();
        learner.record_lesson(
            incident_id,
            vec!["fast detection".to_string()],
            vec!["slow containment".to_string()],
            vec!["automate quarantine".to_string()],
        );
        assert_eq!(learner.lessons_for(incident_id).len(), 1);
    }

    #[test]
    fn all_recommendations_aggregates_across_lessons() {
        let learner = IncidentLessonLearner::new();
        learner.record_lesson(IncidentId::new(), vec![], vec![], vec!["a".to_string()]);
        learner.record_lesson(IncidentId::new(), vec![], vec![], vec!["b".to_string()]);
        assert_eq!(learner.all_recommendations().len(), 2);
    }
}
