use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// Backend primary keys are plain integers; every id serializes as a bare number.
macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

backend_id!(
    /// Unique identifier for a Course
    CourseId
);
backend_id!(
    /// Unique identifier for a Module within a course
    ModuleId
);
backend_id!(
    /// Unique identifier for a Lesson
    LessonId
);
backend_id!(
    /// Unique identifier for a Quiz
    QuizId
);
backend_id!(
    /// Unique identifier for a Question
    QuestionId
);
backend_id!(
    /// Unique identifier for an Assignment
    AssignmentId
);
backend_id!(
    /// Unique identifier for a User
    UserId
);
backend_id!(
    /// Unique identifier for an Enrollment
    EnrollmentId
);

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_id_display() {
        let id = LessonId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "LessonId(42)");
    }

    #[test]
    fn test_course_id_from_str() {
        let id: CourseId = " 123 ".parse().unwrap();
        assert_eq!(id, CourseId::new(123));
    }

    #[test]
    fn test_quiz_id_from_str_invalid() {
        let err = "not-a-number".parse::<QuizId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse QuizId from string");
    }

    #[test]
    fn test_ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&ModuleId::new(7)).unwrap();
        assert_eq!(json, "7");
        let parsed: LessonId = serde_json::from_str("19").unwrap();
        assert_eq!(parsed, LessonId::new(19));
    }
}
