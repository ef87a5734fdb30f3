use course_core::model::{Assignment, CourseId, Lesson, LessonId, QuizId};
use course_core::{CompletionOutcome, Direction, PlayerState};
use services::PlayerService;

use crate::views::ViewError;
use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::time_fmt::{format_datetime, format_minutes};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarLessonVm {
    pub id: LessonId,
    pub title: String,
    pub completed: bool,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarModuleVm {
    pub title: String,
    pub lessons: Vec<SidebarLessonVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizLinkVm {
    pub id: QuizId,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentVm {
    pub title: String,
    pub instructions_html: String,
    pub due_label: Option<String>,
    pub points_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub id: LessonId,
    pub title: String,
    pub module_title: String,
    pub content_html: String,
    pub video_url: Option<String>,
    pub duration_label: Option<String>,
    pub completed: bool,
    pub has_activities: bool,
    pub quizzes: Vec<QuizLinkVm>,
    pub assignments: Vec<AssignmentVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub percent: u8,
    pub label: String,
    pub complete: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavVm {
    pub can_previous: bool,
    pub can_next: bool,
}

/// Course player screen state. Wraps `PlayerState` and talks to `PlayerService`.
#[derive(Clone)]
pub struct PlayerVm {
    state: PlayerState,
}

impl PlayerVm {
    #[must_use]
    pub fn new(state: PlayerState) -> Self {
        Self { state }
    }

    /// # Errors
    ///
    /// Returns the `ViewError` matching the load failure.
    pub async fn load(player: &PlayerService, course_id: CourseId) -> Result<Self, ViewError> {
        let state = player
            .load(course_id)
            .await
            .map_err(|err| ViewError::from_player(&err))?;
        Ok(Self::new(state))
    }

    #[must_use]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.state.course().title
    }

    #[must_use]
    pub fn sidebar(&self) -> Vec<SidebarModuleVm> {
        let active = self.state.active_id();
        self.state
            .course()
            .modules
            .iter()
            .map(|module| SidebarModuleVm {
                title: module.title.clone(),
                lessons: module
                    .lessons
                    .iter()
                    .map(|lesson| SidebarLessonVm {
                        id: lesson.id,
                        title: lesson.title.clone(),
                        completed: lesson.completed,
                        active: Some(lesson.id) == active,
                    })
                    .collect(),
            })
            .collect()
    }

    #[must_use]
    pub fn lesson(&self) -> Option<LessonVm> {
        let active = self.state.active()?;
        Some(map_lesson(active.lesson, &active.module.title))
    }

    #[must_use]
    pub fn progress(&self) -> ProgressVm {
        let progress = self.state.progress();
        ProgressVm {
            percent: progress.percent,
            label: format!(
                "{} of {} lessons complete ({}%)",
                progress.completed, progress.total, progress.percent
            ),
            complete: progress.is_complete(),
        }
    }

    #[must_use]
    pub fn nav(&self) -> NavVm {
        NavVm {
            can_previous: self.state.can_step(Direction::Previous),
            can_next: self.state.can_step(Direction::Next),
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::NotFound` when the lesson is not in this course.
    pub async fn select(
        &mut self,
        player: &PlayerService,
        lesson_id: LessonId,
    ) -> Result<(), ViewError> {
        player
            .select_lesson(&mut self.state, lesson_id)
            .await
            .map_err(|err| ViewError::from_player(&err))
    }

    pub async fn step(&mut self, player: &PlayerService, direction: Direction) -> Option<LessonId> {
        player.step(&mut self.state, direction).await
    }

    /// Adopt the server's completed list for this course.
    ///
    /// # Errors
    ///
    /// Returns the `ViewError` for the failed enrollment fetch.
    pub async fn sync(&mut self, player: &PlayerService) -> Result<(), ViewError> {
        player
            .reconcile(&mut self.state)
            .await
            .map_err(|err| ViewError::from_player(&err))
    }

    /// Mark the active lesson complete.
    ///
    /// # Errors
    ///
    /// Returns the `ViewError` for the failed request; the lesson stays incomplete.
    pub async fn complete_active(
        &mut self,
        player: &PlayerService,
    ) -> Result<CompletionOutcome, ViewError> {
        let Some(lesson_id) = self.state.active_id() else {
            return Err(ViewError::NotFound);
        };
        player
            .complete_lesson(&mut self.state, lesson_id)
            .await
            .map_err(|err| ViewError::from_player(&err))
    }
}

fn map_lesson(lesson: &Lesson, module_title: &str) -> LessonVm {
    LessonVm {
        id: lesson.id,
        title: lesson.title.clone(),
        module_title: module_title.to_string(),
        content_html: markdown_to_html(&lesson.content),
        video_url: lesson.video_url.clone().filter(|url| !url.trim().is_empty()),
        duration_label: lesson.duration.map(format_minutes),
        completed: lesson.completed,
        has_activities: lesson.has_activities(),
        quizzes: lesson
            .quizzes
            .iter()
            .map(|quiz| QuizLinkVm {
                id: quiz.id,
                title: quiz.title.clone(),
            })
            .collect(),
        assignments: lesson.assignments.iter().map(map_assignment).collect(),
    }
}

fn map_assignment(assignment: &Assignment) -> AssignmentVm {
    AssignmentVm {
        title: assignment.title.clone(),
        instructions_html: markdown_to_html(&assignment.instructions),
        due_label: assignment
            .due_date
            .map(|due| format!("Due {}", format_datetime(due))),
        points_label: assignment.max_points.map(|points| format!("{points} points")),
    }
}
