use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{CourseId, EnrollmentId, LessonId, UserId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    Instructor,
    Admin,
}

impl Role {
    /// Instructors and admins may use the content dashboard.
    #[must_use]
    pub fn can_author(self) -> bool {
        matches!(self, Role::Instructor | Role::Admin)
    }
}

/// Profile of the signed-in user, as returned by `/auth/profile/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    /// Full name when known, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// A learner's registration in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub course: CourseId,
    #[serde(default)]
    pub completed_lessons: Vec<LessonId>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}
