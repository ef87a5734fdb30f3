use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::{AssignmentId, CourseId, LessonId, ModuleId};
use crate::model::quiz::Quiz;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("lesson {0} appears more than once in the course")]
    DuplicateLesson(LessonId),
}

//
// ─── COURSE TREE ───────────────────────────────────────────────────────────────
//

/// A course as served by `GET /courses/{id}/`: modules in display order, each
/// holding its lessons in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
    /// Lessons the current learner has finished. Filled from the enrollment.
    #[serde(default)]
    pub completed_lessons: Vec<LessonId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    /// Markdown body of the lesson.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub video_url: Option<String>,
    /// Estimated duration in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_points: Option<u32>,
}

/// Catalog row returned by `GET /courses/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

impl Course {
    /// Iterate every lesson in module order, then lesson order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> + '_ {
        self.modules.iter().flat_map(|module| module.lessons.iter())
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|module| module.lessons.len()).sum()
    }

    #[must_use]
    pub fn contains_lesson(&self, lesson_id: LessonId) -> bool {
        self.lessons().any(|lesson| lesson.id == lesson_id)
    }

    /// Check that lesson ids are unique across all modules.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::DuplicateLesson` with the first repeated id.
    pub fn validate_structure(&self) -> Result<(), CourseError> {
        let mut seen = HashSet::with_capacity(self.lesson_count());
        for lesson in self.lessons() {
            if !seen.insert(lesson.id) {
                return Err(CourseError::DuplicateLesson(lesson.id));
            }
        }
        Ok(())
    }

    /// Replace the completed list with `completed` and sync every lesson's flag.
    ///
    /// Used after a fresh enrollment fetch; the server list wins over anything
    /// appended locally.
    pub fn reconcile_completed(&mut self, completed: &[LessonId]) {
        let mut deduped = Vec::with_capacity(completed.len());
        for id in completed {
            if !deduped.contains(id) {
                deduped.push(*id);
            }
        }
        for module in &mut self.modules {
            for lesson in &mut module.lessons {
                lesson.completed = deduped.contains(&lesson.id);
            }
        }
        self.completed_lessons = deduped;
    }

    pub(crate) fn lesson_mut(&mut self, lesson_id: LessonId) -> Option<&mut Lesson> {
        self.modules
            .iter_mut()
            .flat_map(|module| module.lessons.iter_mut())
            .find(|lesson| lesson.id == lesson_id)
    }
}

impl Lesson {
    #[must_use]
    pub fn has_activities(&self) -> bool {
        !self.quizzes.is_empty() || !self.assignments.is_empty()
    }
}
