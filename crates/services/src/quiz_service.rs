use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use course_core::model::{Quiz, QuizAnswer, QuizId, QuizResult};

use crate::api::{ApiClient, endpoints};
use crate::error::{ApiError, QuizError};

#[derive(Debug, Serialize)]
struct Submission<'a> {
    answers: &'a [QuizAnswer],
}

/// Quiz fetch and submission for learners.
#[derive(Clone)]
pub struct QuizService {
    api: Arc<ApiClient>,
}

impl QuizService {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown quizzes.
    pub async fn quiz(&self, quiz_id: QuizId) -> Result<Quiz, ApiError> {
        self.api.get(&endpoints::quiz(quiz_id)).await
    }

    /// Submit answers for grading.
    ///
    /// Refused locally, without a request, when the quiz has no attempts left.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoAttemptsLeft` or `QuizError::Api`.
    pub async fn submit(&self, quiz: &Quiz, answers: &[QuizAnswer]) -> Result<QuizResult, QuizError> {
        if !quiz.can_attempt() {
            return Err(QuizError::NoAttemptsLeft(quiz.id));
        }
        let result: QuizResult = self
            .api
            .post(&endpoints::quiz_submit(quiz.id), &Submission { answers })
            .await?;
        info!(quiz_id = %quiz.id, score = result.score, passed = result.passed, "quiz submitted");
        Ok(result)
    }
}
