use std::collections::HashSet;

use course_core::model::{CourseId, CourseSummary, Enrollment};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub instructor_label: Option<String>,
    pub enrolled: bool,
}

impl CourseCardVm {
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty()
            || self.title.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
    }
}

/// Published courses in backend order, flagged with the learner's enrollments.
#[must_use]
pub fn map_course_cards(courses: &[CourseSummary], enrollments: &[Enrollment]) -> Vec<CourseCardVm> {
    let enrolled: HashSet<CourseId> = enrollments.iter().map(|e| e.course).collect();
    courses
        .iter()
        .filter(|course| course.is_published)
        .map(|course| CourseCardVm {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone().unwrap_or_default(),
            instructor_label: course
                .instructor_name
                .as_ref()
                .filter(|name| !name.trim().is_empty())
                .map(|name| format!("by {name}")),
            enrolled: enrolled.contains(&course.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::EnrollmentId;

    fn summary(id: u64, title: &str, published: bool) -> CourseSummary {
        CourseSummary {
            id: CourseId::new(id),
            title: title.to_string(),
            description: Some(format!("About {title}")),
            instructor_name: Some("Grace".into()),
            is_published: published,
        }
    }

    #[test]
    fn drafts_are_hidden_and_enrollments_flagged() {
        let courses = [
            summary(1, "Rust", true),
            summary(2, "Draft", false),
            summary(3, "Go", true),
        ];
        let enrollments = [Enrollment {
            id: EnrollmentId::new(9),
            course: CourseId::new(3),
            completed_lessons: Vec::new(),
            enrolled_at: None,
        }];

        let cards = map_course_cards(&courses, &enrollments);
        assert_eq!(cards.len(), 2);
        assert!(!cards[0].enrolled);
        assert!(cards[1].enrolled);
        assert_eq!(cards[1].instructor_label.as_deref(), Some("by Grace"));
    }

    #[test]
    fn query_matches_title_or_description() {
        let cards = map_course_cards(&[summary(1, "Rust", true)], &[]);
        assert!(cards[0].matches_query("rust"));
        assert!(cards[0].matches_query("about"));
        assert!(!cards[0].matches_query("python"));
    }
}
