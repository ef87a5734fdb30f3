//! Deterministic course builders for tests.

use crate::model::{Course, CourseId, Lesson, LessonId, Module, ModuleId};

/// A lesson with a generated title and empty content.
#[must_use]
pub fn lesson(id: u64) -> Lesson {
    Lesson {
        id: LessonId::new(id),
        title: format!("Lesson {id}"),
        content: String::new(),
        video_url: None,
        duration: None,
        quizzes: Vec::new(),
        assignments: Vec::new(),
        completed: false,
    }
}

/// Build course 1 with one module per slice entry, holding the given lesson ids.
///
/// Module ids are assigned 1.. in order. `completed` is applied through
/// `Course::reconcile_completed`, so lesson flags match the list.
#[must_use]
pub fn course_with(modules: &[&[u64]], completed: &[u64]) -> Course {
    let modules = modules
        .iter()
        .zip(1_u64..)
        .map(|(lesson_ids, module_id)| Module {
            id: ModuleId::new(module_id),
            title: format!("Module {module_id}"),
            position: u32::try_from(module_id).unwrap_or(u32::MAX),
            lessons: lesson_ids.iter().copied().map(lesson).collect(),
        })
        .collect();

    let mut course = Course {
        id: CourseId::new(1),
        title: "Fixture Course".to_string(),
        description: None,
        instructor_name: None,
        modules,
        completed_lessons: Vec::new(),
    };
    let completed: Vec<LessonId> = completed.iter().copied().map(LessonId::new).collect();
    course.reconcile_completed(&completed);
    course
}
