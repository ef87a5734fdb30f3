use crate::model::{Course, Lesson, LessonId, Module};

/// Direction for the player's Previous/Next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

/// The lesson on screen together with the module that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveLesson<'a> {
    pub module: &'a Module,
    pub lesson: &'a Lesson,
}

/// Find `lesson_id` by scanning modules in order; first match wins.
///
/// Returns `None` when no id is given (nothing loaded yet) or when the id is
/// not part of the course.
#[must_use]
pub fn resolve_active(course: &Course, lesson_id: Option<LessonId>) -> Option<ActiveLesson<'_>> {
    let lesson_id = lesson_id?;
    course.modules.iter().find_map(|module| {
        module
            .lessons
            .iter()
            .find(|lesson| lesson.id == lesson_id)
            .map(|lesson| ActiveLesson { module, lesson })
    })
}

/// All lessons flattened in module order, then lesson order.
#[must_use]
pub fn flatten_lessons(course: &Course) -> Vec<&Lesson> {
    course.lessons().collect()
}

/// The lesson next to `current` in `direction`.
///
/// Returns `None` at either end of the course or when `current` is unknown.
#[must_use]
pub fn adjacent_lesson(course: &Course, current: LessonId, direction: Direction) -> Option<&Lesson> {
    let lessons = flatten_lessons(course);
    let index = lessons.iter().position(|lesson| lesson.id == current)?;
    let target = match direction {
        Direction::Previous => index.checked_sub(1)?,
        Direction::Next => index + 1,
    };
    lessons.get(target).copied()
}

/// First lesson of the first non-empty module.
#[must_use]
pub fn first_lesson(course: &Course) -> Option<&Lesson> {
    course.lessons().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::course_with;
    use crate::model::ModuleId;

    fn ids(lesson: Option<&Lesson>) -> Option<u64> {
        lesson.map(|l| l.id.value())
    }

    #[test]
    fn resolve_returns_owning_module() {
        let course = course_with(&[&[1, 2], &[3]], &[]);
        let active = resolve_active(&course, Some(LessonId::new(3))).unwrap();
        assert_eq!(active.module.id, ModuleId::new(2));
        assert_eq!(active.lesson.id, LessonId::new(3));
    }

    #[test]
    fn resolve_unknown_or_missing_id_is_none() {
        let course = course_with(&[&[1, 2], &[3]], &[]);
        assert!(resolve_active(&course, Some(LessonId::new(42))).is_none());
        assert!(resolve_active(&course, None).is_none());
    }

    #[test]
    fn resolve_prefers_first_match() {
        let mut course = course_with(&[&[1], &[2]], &[]);
        let mut dup = course.modules[1].lessons[0].clone();
        dup.id = LessonId::new(1);
        dup.title = "Duplicate".into();
        course.modules[1].lessons.push(dup);
        let active = resolve_active(&course, Some(LessonId::new(1))).unwrap();
        assert_eq!(active.module.id, ModuleId::new(1));
        assert_eq!(active.lesson.title, "Lesson 1");
    }

    #[test]
    fn next_crosses_module_boundary() {
        let course = course_with(&[&[1, 2], &[3]], &[]);
        let next = adjacent_lesson(&course, LessonId::new(2), Direction::Next);
        assert_eq!(ids(next), Some(3));
        let prev = adjacent_lesson(&course, LessonId::new(3), Direction::Previous);
        assert_eq!(ids(prev), Some(2));
    }

    #[test]
    fn boundaries_return_none() {
        let course = course_with(&[&[1, 2], &[3]], &[]);
        assert!(adjacent_lesson(&course, LessonId::new(1), Direction::Previous).is_none());
        assert!(adjacent_lesson(&course, LessonId::new(3), Direction::Next).is_none());
    }

    #[test]
    fn empty_modules_are_skipped() {
        let course = course_with(&[&[], &[5], &[], &[6]], &[]);
        assert_eq!(ids(first_lesson(&course)), Some(5));
        let next = adjacent_lesson(&course, LessonId::new(5), Direction::Next);
        assert_eq!(ids(next), Some(6));
    }

    #[test]
    fn unknown_current_has_no_neighbours() {
        let course = course_with(&[&[1, 2]], &[]);
        assert!(adjacent_lesson(&course, LessonId::new(9), Direction::Next).is_none());
    }
}
