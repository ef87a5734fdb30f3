mod course;
mod ids;
mod quiz;
mod user;

pub use ids::{
    AssignmentId, CourseId, EnrollmentId, LessonId, ModuleId, ParseIdError, QuestionId, QuizId,
    UserId,
};

pub use course::{Assignment, Course, CourseError, CourseSummary, Lesson, Module};
pub use quiz::{Choice, Question, QuestionKind, Quiz, QuizAnswer, QuizResult};
pub use user::{Enrollment, Role, UserProfile};
