//! Instructor dashboard: one list/form screen per level of the course tree.

mod courses;
mod lessons;
mod modules;
mod questions;
mod quizzes;
mod shared;

pub use courses::DashboardView;
pub use lessons::ModuleLessonsView;
pub use modules::CourseModulesView;
pub use questions::QuizQuestionsView;
pub use quizzes::LessonQuizzesView;
