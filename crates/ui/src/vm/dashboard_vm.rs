//! Form state for the instructor dashboard. Inputs stay as raw strings until submit.

use course_core::model::{
    CourseId, CourseSummary, Lesson, LessonId, Module, ModuleId, Question, QuestionKind, Quiz,
    QuizId,
};
use services::{ChoiceDraft, CourseDraft, LessonDraft, ModuleDraft, QuestionDraft, QuizDraft};

use crate::vm::markdown_vm::normalize_markdown;

fn parse_optional<T: std::str::FromStr>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseForm {
    pub title: String,
    pub description: String,
    pub is_published: bool,
}

impl CourseForm {
    #[must_use]
    pub fn from_course(course: &CourseSummary) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone().unwrap_or_default(),
            is_published: course.is_published,
        }
    }

    #[must_use]
    pub fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            is_published: self.is_published,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleForm {
    pub title: String,
    pub position: String,
}

impl ModuleForm {
    /// Empty form placed after the existing modules.
    #[must_use]
    pub fn next_after(modules: &[Module]) -> Self {
        let next = modules.iter().map(|m| m.position).max().map_or(1, |p| p + 1);
        Self {
            title: String::new(),
            position: next.to_string(),
        }
    }

    #[must_use]
    pub fn from_module(module: &Module) -> Self {
        Self {
            title: module.title.clone(),
            position: module.position.to_string(),
        }
    }

    #[must_use]
    pub fn to_draft(&self, course: CourseId) -> ModuleDraft {
        ModuleDraft {
            course,
            title: self.title.trim().to_string(),
            position: parse_optional(&self.position).unwrap_or(0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LessonForm {
    pub title: String,
    pub content: String,
    pub video_url: String,
    pub duration: String,
}

impl LessonForm {
    #[must_use]
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            title: lesson.title.clone(),
            content: lesson.content.clone(),
            video_url: lesson.video_url.clone().unwrap_or_default(),
            duration: lesson.duration.map(|d| d.to_string()).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn to_draft(&self, module: ModuleId) -> LessonDraft {
        LessonDraft {
            module,
            title: self.title.trim().to_string(),
            content: normalize_markdown(&self.content),
            video_url: optional_text(&self.video_url),
            duration: parse_optional(&self.duration),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizForm {
    pub title: String,
    pub description: String,
    pub max_attempts: String,
    pub pass_mark: String,
}

impl QuizForm {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title.clone(),
            description: quiz.description.clone().unwrap_or_default(),
            max_attempts: quiz.max_attempts.map(|a| a.to_string()).unwrap_or_default(),
            pass_mark: quiz.pass_mark.map(|m| m.to_string()).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn to_draft(&self, lesson: LessonId) -> QuizDraft {
        QuizDraft {
            lesson,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            max_attempts: parse_optional(&self.max_attempts),
            pass_mark: parse_optional(&self.pass_mark),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceRow {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionForm {
    pub text: String,
    pub kind: QuestionKind,
    pub points: String,
    pub choices: Vec<ChoiceRow>,
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: QuestionKind::SingleChoice,
            points: "1".to_string(),
            choices: vec![Self::blank_choice(), Self::blank_choice()],
        }
    }
}

impl QuestionForm {
    fn blank_choice() -> ChoiceRow {
        ChoiceRow {
            text: String::new(),
            is_correct: false,
        }
    }

    /// Answer options can't be recovered from a fetched question, so editing
    /// starts with the visible choice texts and no correct flags.
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            text: question.text.clone(),
            kind: question.kind,
            points: question.points.to_string(),
            choices: question
                .choices
                .iter()
                .map(|c| ChoiceRow {
                    text: c.text.clone(),
                    is_correct: false,
                })
                .collect(),
        }
    }

    /// Switch kind; true/false gets its two fixed rows, short answer drops choices.
    pub fn set_kind(&mut self, kind: QuestionKind) {
        self.kind = kind;
        match kind {
            QuestionKind::TrueFalse => {
                self.choices = ["True", "False"]
                    .into_iter()
                    .map(|text| ChoiceRow {
                        text: text.to_string(),
                        is_correct: false,
                    })
                    .collect();
            }
            QuestionKind::ShortAnswer => self.choices.clear(),
            QuestionKind::SingleChoice | QuestionKind::MultipleChoice => {
                while self.choices.len() < 2 {
                    self.choices.push(Self::blank_choice());
                }
            }
        }
    }

    pub fn add_choice(&mut self) {
        self.choices.push(Self::blank_choice());
    }

    pub fn remove_choice(&mut self, index: usize) {
        if index < self.choices.len() {
            self.choices.remove(index);
        }
    }

    /// Mark `index` correct. Single-answer kinds keep exactly one correct row.
    pub fn toggle_correct(&mut self, index: usize) {
        let single = !matches!(self.kind, QuestionKind::MultipleChoice);
        for (i, row) in self.choices.iter_mut().enumerate() {
            if i == index {
                row.is_correct = if single { true } else { !row.is_correct };
            } else if single {
                row.is_correct = false;
            }
        }
    }

    #[must_use]
    pub fn to_draft(&self, quiz: QuizId) -> QuestionDraft {
        QuestionDraft {
            quiz,
            text: self.text.trim().to_string(),
            question_type: self.kind,
            choices: self
                .choices
                .iter()
                .filter(|row| !row.text.trim().is_empty())
                .map(|row| ChoiceDraft {
                    text: row.text.trim().to_string(),
                    is_correct: row.is_correct,
                })
                .collect(),
            points: parse_optional(&self.points).unwrap_or(1),
        }
    }
}

#[must_use]
pub fn question_kind_label(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::SingleChoice => "Single choice",
        QuestionKind::MultipleChoice => "Multiple choice",
        QuestionKind::TrueFalse => "True / false",
        QuestionKind::ShortAnswer => "Short answer",
    }
}

#[must_use]
pub fn question_kind_value(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::SingleChoice => "single_choice",
        QuestionKind::MultipleChoice => "multiple_choice",
        QuestionKind::TrueFalse => "true_false",
        QuestionKind::ShortAnswer => "short_answer",
    }
}

#[must_use]
pub fn parse_question_kind(value: &str) -> Option<QuestionKind> {
    [
        QuestionKind::SingleChoice,
        QuestionKind::MultipleChoice,
        QuestionKind::TrueFalse,
        QuestionKind::ShortAnswer,
    ]
    .into_iter()
    .find(|kind| question_kind_value(*kind) == value)
}
