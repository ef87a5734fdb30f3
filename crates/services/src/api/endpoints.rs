//! Backend paths, relative to `ApiConfig::base_url`.

use course_core::model::{CourseId, QuizId};

pub const LOGIN: &str = "/auth/login/";
pub const REGISTER: &str = "/auth/register/";
pub const TOKEN_REFRESH: &str = "/auth/token/refresh/";
pub const PROFILE: &str = "/auth/profile/";
pub const ENROLLMENTS: &str = "/enrollments/";
pub const COMPLETE_LESSON: &str = "/enrollments/complete-lesson/";

#[must_use]
pub fn course(id: CourseId) -> String {
    Collection::Courses.item(id.value())
}

#[must_use]
pub fn enrollment_for_course(id: CourseId) -> String {
    format!("/enrollments/course/{id}/")
}

#[must_use]
pub fn quiz(id: QuizId) -> String {
    Collection::Quizzes.item(id.value())
}

#[must_use]
pub fn quiz_submit(id: QuizId) -> String {
    format!("/quizzes/{id}/submit/")
}

/// CRUD collections used by the catalog and the instructor dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Courses,
    Modules,
    Lessons,
    Quizzes,
    Questions,
}

impl Collection {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Collection::Courses => "/courses/",
            Collection::Modules => "/modules/",
            Collection::Lessons => "/lessons/",
            Collection::Quizzes => "/quizzes/",
            Collection::Questions => "/questions/",
        }
    }

    #[must_use]
    pub fn item(self, id: u64) -> String {
        format!("{}{id}/", self.path())
    }

    /// Query parameter naming the parent, for collections that have one.
    #[must_use]
    pub fn parent_param(self) -> Option<&'static str> {
        match self {
            Collection::Courses => None,
            Collection::Modules => Some("course"),
            Collection::Lessons => Some("module"),
            Collection::Quizzes => Some("lesson"),
            Collection::Questions => Some("quiz"),
        }
    }

    /// Collection filtered to the children of `parent_id`.
    #[must_use]
    pub fn children_of(self, parent_id: u64) -> String {
        match self.parent_param() {
            Some(param) => format!("{}?{param}={parent_id}", self.path()),
            None => self.path().to_string(),
        }
    }
}
