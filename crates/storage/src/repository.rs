use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::{CourseId, LessonId, UserProfile};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted auth session: the token pair plus the cached profile.
///
/// Only one session is stored at a time; saving replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub user: Option<UserProfile>,
    pub saved_at: DateTime<Utc>,
}

/// Repository contract for the signed-in session.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or the row is corrupt.
    async fn load_session(&self) -> Result<Option<SessionRecord>, StorageError>;

    /// Persist `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn save_session(&self, session: &SessionRecord) -> Result<(), StorageError>;

    /// Forget the stored session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the delete.
    async fn clear_session(&self) -> Result<(), StorageError>;
}

/// Repository contract for the per-course resume position.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Last lesson the learner opened in `course_id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn last_lesson(&self, course_id: CourseId) -> Result<Option<LessonId>, StorageError>;

    /// Remember `lesson_id` as the resume position for `course_id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the position cannot be stored.
    async fn remember_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    session: Arc<Mutex<Option<SessionRecord>>>,
    positions: Arc<Mutex<HashMap<CourseId, LessonId>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn load_session(&self) -> Result<Option<SessionRecord>, StorageError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_session(&self, session: &SessionRecord) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[async_trait]
impl ResumeRepository for InMemoryRepository {
    async fn last_lesson(&self, course_id: CourseId) -> Result<Option<LessonId>, StorageError> {
        let guard = self
            .positions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&course_id).copied())
    }

    async fn remember_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
        _at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .positions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(course_id, lesson_id);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
    pub resume: Arc<dyn ResumeRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo.clone());
        let resume: Arc<dyn ResumeRepository> = Arc::new(repo);
        Self { sessions, resume }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{Role, UserId};
    use course_core::time::fixed_now;

    fn record(token: &str) -> SessionRecord {
        SessionRecord {
            access_token: format!("access-{token}"),
            refresh_token: format!("refresh-{token}"),
            user: Some(UserProfile {
                id: UserId::new(1),
                username: "ada".into(),
                email: "ada@example.com".into(),
                first_name: String::new(),
                last_name: String::new(),
                role: Role::Student,
            }),
            saved_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn save_replaces_previous_session() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_session().await.unwrap().is_none());

        repo.save_session(&record("a")).await.unwrap();
        repo.save_session(&record("b")).await.unwrap();
        let loaded = repo.load_session().await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "access-b");

        repo.clear_session().await.unwrap();
        repo.clear_session().await.unwrap();
        assert!(repo.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resume_position_is_per_course() {
        let storage = Storage::in_memory();
        let course_a = CourseId::new(1);
        let course_b = CourseId::new(2);
        storage
            .resume
            .remember_lesson(course_a, LessonId::new(10), fixed_now())
            .await
            .unwrap();
        storage
            .resume
            .remember_lesson(course_a, LessonId::new(11), fixed_now())
            .await
            .unwrap();

        assert_eq!(
            storage.resume.last_lesson(course_a).await.unwrap(),
            Some(LessonId::new(11))
        );
        assert_eq!(storage.resume.last_lesson(course_b).await.unwrap(), None);
    }
}
