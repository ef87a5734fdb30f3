use crate::model::{Course, CourseId, Enrollment, LessonId};
use crate::navigation::{self, ActiveLesson, Direction};
use crate::progress::{self, CourseProgress};

/// Result of applying a completion to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The lesson id was appended to the completed list.
    Recorded,
    /// The lesson was already completed; nothing changed.
    AlreadyCompleted,
    /// The lesson is not part of this course; nothing changed.
    UnknownLesson,
}

/// Course-player state: the loaded course plus the lesson on screen.
///
/// The active lesson is either `None` (empty course) or a lesson of the course.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    course: Course,
    active: Option<LessonId>,
}

impl PlayerState {
    /// Start on `preferred` when it belongs to the course, else on the first lesson.
    #[must_use]
    pub fn new(course: Course, preferred: Option<LessonId>) -> Self {
        let active = preferred
            .filter(|id| course.contains_lesson(*id))
            .or_else(|| navigation::first_lesson(&course).map(|lesson| lesson.id));
        Self { course, active }
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course.id
    }

    #[must_use]
    pub fn active_id(&self) -> Option<LessonId> {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Option<ActiveLesson<'_>> {
        navigation::resolve_active(&self.course, self.active)
    }

    /// Make `lesson_id` active. Returns `false` and leaves state untouched when
    /// the lesson is not part of the course.
    pub fn select(&mut self, lesson_id: LessonId) -> bool {
        if !self.course.contains_lesson(lesson_id) {
            return false;
        }
        self.active = Some(lesson_id);
        true
    }

    /// Move to the neighbouring lesson. Returns the new active id, or `None`
    /// at a boundary (state unchanged).
    pub fn step(&mut self, direction: Direction) -> Option<LessonId> {
        let target = self.neighbour(direction)?;
        self.active = Some(target);
        Some(target)
    }

    #[must_use]
    pub fn can_step(&self, direction: Direction) -> bool {
        self.neighbour(direction).is_some()
    }

    fn neighbour(&self, direction: Direction) -> Option<LessonId> {
        let current = self.active?;
        navigation::adjacent_lesson(&self.course, current, direction).map(|lesson| lesson.id)
    }

    #[must_use]
    pub fn progress(&self) -> CourseProgress {
        progress::course_progress(&self.course)
    }

    /// Record a server-confirmed completion without refetching the course.
    ///
    /// Appending is idempotent: a lesson id is never listed twice.
    pub fn mark_completed(&mut self, lesson_id: LessonId) -> CompletionOutcome {
        let Some(lesson) = self.course.lesson_mut(lesson_id) else {
            return CompletionOutcome::UnknownLesson;
        };
        lesson.completed = true;
        if self.course.completed_lessons.contains(&lesson_id) {
            return CompletionOutcome::AlreadyCompleted;
        }
        self.course.completed_lessons.push(lesson_id);
        CompletionOutcome::Recorded
    }

    /// Adopt the enrollment's completed list; the server copy wins.
    pub fn reconcile(&mut self, enrollment: &Enrollment) {
        if enrollment.course == self.course.id {
            self.course.reconcile_completed(&enrollment.completed_lessons);
        }
    }
}
