use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;

use course_core::model::{
    CourseId, CourseSummary, Lesson, LessonId, Module, ModuleId, Question, QuestionId,
    QuestionKind, Quiz, QuizId,
};

use crate::api::{ApiClient, Collection};
use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDraft {
    pub course: CourseId,
    pub title: String,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonDraft {
    pub module: ModuleId,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizDraft {
    pub lesson: LessonId,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_mark: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceDraft {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDraft {
    pub quiz: QuizId,
    pub text: String,
    pub question_type: QuestionKind,
    pub choices: Vec<ChoiceDraft>,
    pub points: u32,
}

/// Course authoring for instructors: CRUD over every level of the course tree.
#[derive(Clone)]
pub struct InstructorService {
    api: Arc<ApiClient>,
}

impl InstructorService {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    // Courses

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn courses(&self) -> Result<Vec<CourseSummary>, ApiError> {
        self.api.get_list(Collection::Courses.path()).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn create_course(&self, draft: &CourseDraft) -> Result<CourseSummary, ApiError> {
        self.create(Collection::Courses, draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn update_course(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<CourseSummary, ApiError> {
        self.update(Collection::Courses, id.value(), draft).await
    }

    /// Publish or hide a course without resending the rest of it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` when the course belongs to someone else.
    pub async fn set_published(
        &self,
        id: CourseId,
        published: bool,
    ) -> Result<CourseSummary, ApiError> {
        let course: CourseSummary = self
            .api
            .patch(
                &Collection::Courses.item(id.value()),
                &json!({ "is_published": published }),
            )
            .await?;
        info!(course_id = %id, published, "course visibility changed");
        Ok(course)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` when the course belongs to someone else.
    pub async fn delete_course(&self, id: CourseId) -> Result<(), ApiError> {
        self.remove(Collection::Courses, id.value()).await
    }

    // Modules

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn modules(&self, course: CourseId) -> Result<Vec<Module>, ApiError> {
        self.children(Collection::Modules, course.value()).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn create_module(&self, draft: &ModuleDraft) -> Result<Module, ApiError> {
        self.create(Collection::Modules, draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn update_module(&self, id: ModuleId, draft: &ModuleDraft) -> Result<Module, ApiError> {
        self.update(Collection::Modules, id.value(), draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn delete_module(&self, id: ModuleId) -> Result<(), ApiError> {
        self.remove(Collection::Modules, id.value()).await
    }

    // Lessons

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn lessons(&self, module: ModuleId) -> Result<Vec<Lesson>, ApiError> {
        self.children(Collection::Lessons, module.value()).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn create_lesson(&self, draft: &LessonDraft) -> Result<Lesson, ApiError> {
        self.create(Collection::Lessons, draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn update_lesson(&self, id: LessonId, draft: &LessonDraft) -> Result<Lesson, ApiError> {
        self.update(Collection::Lessons, id.value(), draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn delete_lesson(&self, id: LessonId) -> Result<(), ApiError> {
        self.remove(Collection::Lessons, id.value()).await
    }

    // Quizzes

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn quizzes(&self, lesson: LessonId) -> Result<Vec<Quiz>, ApiError> {
        self.children(Collection::Quizzes, lesson.value()).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn create_quiz(&self, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        self.create(Collection::Quizzes, draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        self.update(Collection::Quizzes, id.value(), draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), ApiError> {
        self.remove(Collection::Quizzes, id.value()).await
    }

    // Questions

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn questions(&self, quiz: QuizId) -> Result<Vec<Question>, ApiError> {
        self.children(Collection::Questions, quiz.value()).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, ApiError> {
        self.create(Collection::Questions, draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the draft is rejected.
    pub async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Question, ApiError> {
        self.update(Collection::Questions, id.value(), draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), ApiError> {
        self.remove(Collection::Questions, id.value()).await
    }

    async fn children<T: DeserializeOwned>(
        &self,
        collection: Collection,
        parent: u64,
    ) -> Result<Vec<T>, ApiError> {
        self.api.get_list(&collection.children_of(parent)).await
    }

    async fn create<B, T>(&self, collection: Collection, draft: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let created = self.api.post(collection.path(), draft).await?;
        info!(collection = collection.path(), "created");
        Ok(created)
    }

    async fn update<B, T>(&self, collection: Collection, id: u64, draft: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.api.put(&collection.item(id), draft).await
    }

    async fn remove(&self, collection: Collection, id: u64) -> Result<(), ApiError> {
        self.api.delete(&collection.item(id)).await?;
        info!(collection = collection.path(), id, "deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_draft_omits_empty_optionals() {
        let draft = LessonDraft {
            module: ModuleId::new(2),
            title: "Intro".into(),
            content: "# Hello".into(),
            video_url: None,
            duration: Some(12),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["module"], 2);
        assert_eq!(value["duration"], 12);
        assert!(value.get("video_url").is_none());
    }

    #[test]
    fn question_draft_uses_backend_type_names() {
        let draft = QuestionDraft {
            quiz: QuizId::new(5),
            text: "2 + 2?".into(),
            question_type: QuestionKind::SingleChoice,
            choices: vec![
                ChoiceDraft { text: "4".into(), is_correct: true },
                ChoiceDraft { text: "5".into(), is_correct: false },
            ],
            points: 2,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["question_type"], "single_choice");
        assert_eq!(value["choices"][0]["is_correct"], true);
    }
}
