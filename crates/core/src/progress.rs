use std::collections::HashSet;

use crate::model::{Course, LessonId};

/// Completion summary for one course, as shown in the player header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseProgress {
    pub total: usize,
    pub completed: usize,
    /// Whole-number percentage, 0..=100.
    pub percent: u8,
}

impl CourseProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Compute progress from the course's own completed-lesson list.
#[must_use]
pub fn course_progress(course: &Course) -> CourseProgress {
    progress_with(course, &course.completed_lessons)
}

/// Compute progress for `course` given an explicit completed-lesson list.
///
/// Ids that are repeated or do not belong to the course are ignored, so the
/// percentage never exceeds 100. An empty course reports 0%.
#[must_use]
pub fn progress_with(course: &Course, completed: &[LessonId]) -> CourseProgress {
    let total = course.lesson_count();
    let done: HashSet<LessonId> = completed
        .iter()
        .copied()
        .filter(|id| course.contains_lesson(*id))
        .collect();
    let completed = done.len();

    CourseProgress {
        total,
        completed,
        percent: rounded_percent(completed, total),
    }
}

/// round(100 * part / whole) with halves rounded up; 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u128;
    let whole = whole as u128;
    let pct = (part * 200 + whole) / (whole * 2);
    u8::try_from(pct).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::course_with;

    #[test]
    fn one_of_three_is_33_percent() {
        let course = course_with(&[&[1, 2], &[3]], &[1]);
        let progress = course_progress(&course);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.percent, 33);
    }

    #[test]
    fn two_of_three_is_67_percent() {
        let course = course_with(&[&[1, 2], &[3]], &[1, 2]);
        assert_eq!(course_progress(&course).percent, 67);
    }

    #[test]
    fn empty_course_is_zero_percent() {
        let course = course_with(&[], &[]);
        let progress = course_progress(&course);
        assert_eq!(progress.total, 0);
        assert_eq!(progress.percent, 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn foreign_and_repeated_ids_are_ignored() {
        let course = course_with(&[&[1, 2]], &[]);
        let completed = [LessonId::new(1), LessonId::new(1), LessonId::new(99)];
        let progress = progress_with(&course, &completed);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.percent, 50);
    }

    #[test]
    fn all_done_is_complete() {
        let course = course_with(&[&[1], &[2]], &[2, 1]);
        let progress = course_progress(&course);
        assert_eq!(progress.percent, 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn rounded_percent_matches_formula_for_small_courses() {
        for whole in 1..=40_usize {
            for part in 0..=whole {
                let expected = (100.0 * part as f64 / whole as f64 + 0.5).floor() as u8;
                assert_eq!(rounded_percent(part, whole), expected, "{part}/{whole}");
            }
        }
    }
}
