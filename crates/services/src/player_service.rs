use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use course_core::model::{Course, CourseId, Enrollment, LessonId};
use course_core::{CompletionOutcome, Direction, PlayerState};
use storage::ResumeRepository;

use crate::Clock;
use crate::api::{ApiClient, endpoints};
use crate::error::{ApiError, PlayerError};

#[derive(Debug, Serialize)]
struct CompleteLessonRequest {
    course_id: CourseId,
    lesson_id: LessonId,
}

/// Loads a course for the learner and drives lesson navigation and completion.
#[derive(Clone)]
pub struct PlayerService {
    clock: Clock,
    api: Arc<ApiClient>,
    resume: Arc<dyn ResumeRepository>,
}

impl PlayerService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<ApiClient>, resume: Arc<dyn ResumeRepository>) -> Self {
        Self { clock, api, resume }
    }

    /// Fetch the course tree and the learner's enrollment, then open the
    /// player on the remembered lesson (or the first one).
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::NotEnrolled` when the learner has no enrollment,
    /// and `PlayerError::Api` for other backend failures.
    pub async fn load(&self, course_id: CourseId) -> Result<PlayerState, PlayerError> {
        let mut course: Course = self.api.get(&endpoints::course(course_id)).await?;
        if let Err(err) = course.validate_structure() {
            warn!(%course_id, error = %err, "course structure is inconsistent; first match wins");
        }

        let enrollment: Enrollment = match self
            .api
            .get(&endpoints::enrollment_for_course(course_id))
            .await
        {
            Ok(enrollment) => enrollment,
            Err(ApiError::NotFound) => return Err(PlayerError::NotEnrolled(course_id)),
            Err(err) => return Err(err.into()),
        };
        course.reconcile_completed(&enrollment.completed_lessons);

        let preferred = match self.resume.last_lesson(course_id).await {
            Ok(lesson) => lesson,
            Err(err) => {
                warn!(%course_id, error = %err, "could not read resume position");
                None
            }
        };

        let state = PlayerState::new(course, preferred);
        debug!(%course_id, active = ?state.active_id(), "player loaded");
        Ok(state)
    }

    /// Re-read the enrollment and adopt the server's completed list.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Api` if the enrollment cannot be fetched.
    pub async fn reconcile(&self, state: &mut PlayerState) -> Result<(), PlayerError> {
        let enrollment: Enrollment = self
            .api
            .get(&endpoints::enrollment_for_course(state.course_id()))
            .await?;
        state.reconcile(&enrollment);
        Ok(())
    }

    /// Make `lesson_id` active and remember it as the resume position.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::LessonNotFound` if the lesson is not in the course.
    pub async fn select_lesson(
        &self,
        state: &mut PlayerState,
        lesson_id: LessonId,
    ) -> Result<(), PlayerError> {
        if !state.select(lesson_id) {
            return Err(PlayerError::LessonNotFound(lesson_id));
        }
        self.remember(state.course_id(), lesson_id).await;
        Ok(())
    }

    /// Move to the previous/next lesson; `None` at a boundary.
    pub async fn step(&self, state: &mut PlayerState, direction: Direction) -> Option<LessonId> {
        let lesson_id = state.step(direction)?;
        self.remember(state.course_id(), lesson_id).await;
        Some(lesson_id)
    }

    /// Store the resume position. Failures are logged and otherwise ignored.
    pub async fn remember(&self, course_id: CourseId, lesson_id: LessonId) {
        if let Err(err) = self
            .resume
            .remember_lesson(course_id, lesson_id, self.clock.now())
            .await
        {
            warn!(%course_id, %lesson_id, error = %err, "could not store resume position");
        }
    }

    /// Tell the backend that `lesson_id` is complete. Local state is untouched.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Api` when the backend call fails; the failure is
    /// also logged.
    pub async fn record_completion(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
    ) -> Result<(), PlayerError> {
        let request = CompleteLessonRequest {
            course_id,
            lesson_id,
        };
        if let Err(err) = self.api.post_unit(endpoints::COMPLETE_LESSON, &request).await {
            warn!(%course_id, %lesson_id, error = %err, "marking lesson complete failed");
            return Err(err.into());
        }
        Ok(())
    }

    /// Mark a lesson complete on the backend, then record it locally.
    ///
    /// Local state changes only after the backend confirmed, so a failure
    /// leaves `state` exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::LessonNotFound` for lessons outside the course and
    /// `PlayerError::Api` when the backend call fails.
    pub async fn complete_lesson(
        &self,
        state: &mut PlayerState,
        lesson_id: LessonId,
    ) -> Result<CompletionOutcome, PlayerError> {
        if !state.course().contains_lesson(lesson_id) {
            return Err(PlayerError::LessonNotFound(lesson_id));
        }
        self.record_completion(state.course_id(), lesson_id).await?;
        Ok(state.mark_completed(lesson_id))
    }
}
