use std::sync::{Arc, PoisonError, RwLock};

use course_core::model::UserProfile;
use storage::{SessionRecord, SessionRepository, StorageError};
use tracing::{debug, info};

use crate::Clock;

/// Access/refresh token pair issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// The signed-in session, cached in memory and mirrored to local storage.
///
/// Reads are synchronous so the API client can grab the bearer token without
/// awaiting; writes update memory first, then persist.
pub struct SessionStore {
    clock: Clock,
    repo: Arc<dyn SessionRepository>,
    current: RwLock<Option<SessionRecord>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            clock,
            repo,
            current: RwLock::new(None),
        }
    }

    /// Load the persisted session into memory.
    ///
    /// Returns the cached profile when a session was found.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the repository cannot be read.
    pub async fn restore(&self) -> Result<Option<UserProfile>, StorageError> {
        let record = self.repo.load_session().await?;
        let user = record.as_ref().and_then(|r| r.user.clone());
        if record.is_some() {
            info!("restored saved session");
        }
        *self.write_guard() = record;
        Ok(user)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<SessionRecord> {
        self.read_guard().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_guard().is_some()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read_guard().as_ref().map(|r| r.access_token.clone())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read_guard().as_ref().map(|r| r.refresh_token.clone())
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.read_guard().as_ref().and_then(|r| r.user.clone())
    }

    /// Begin a new session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be persisted.
    pub async fn start(
        &self,
        tokens: AuthTokens,
        user: Option<UserProfile>,
    ) -> Result<(), StorageError> {
        let record = SessionRecord {
            access_token: tokens.access,
            refresh_token: tokens.refresh,
            user,
            saved_at: self.clock.now(),
        };
        *self.write_guard() = Some(record.clone());
        self.repo.save_session(&record).await
    }

    /// Swap in a refreshed access token (and rotated refresh token, if any).
    ///
    /// Does nothing when signed out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be persisted.
    pub async fn update_tokens(
        &self,
        access: String,
        refresh: Option<String>,
    ) -> Result<(), StorageError> {
        let updated = {
            let mut guard = self.write_guard();
            let Some(record) = guard.as_mut() else {
                return Ok(());
            };
            record.access_token = access;
            if let Some(refresh) = refresh {
                record.refresh_token = refresh;
            }
            record.saved_at = self.clock.now();
            record.clone()
        };
        debug!("access token refreshed");
        self.repo.save_session(&updated).await
    }

    /// Cache a freshly fetched profile. Does nothing when signed out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be persisted.
    pub async fn set_user(&self, user: UserProfile) -> Result<(), StorageError> {
        let updated = {
            let mut guard = self.write_guard();
            let Some(record) = guard.as_mut() else {
                return Ok(());
            };
            record.user = Some(user);
            record.clone()
        };
        self.repo.save_session(&updated).await
    }

    /// Sign out locally and forget the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the persisted session cannot be removed.
    pub async fn clear(&self) -> Result<(), StorageError> {
        *self.write_guard() = None;
        self.repo.clear_session().await
    }

    fn read_guard(&self) -> std::sync::RwLockReadGuard<'_, Option<SessionRecord>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Option<SessionRecord>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{Role, UserId};
    use course_core::time::{fixed_clock, fixed_now};
    use storage::InMemoryRepository;

    fn tokens(tag: &str) -> AuthTokens {
        AuthTokens {
            access: format!("a-{tag}"),
            refresh: format!("r-{tag}"),
        }
    }

    fn user() -> UserProfile {
        UserProfile {
            id: UserId::new(2),
            username: "lin".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::Student,
        }
    }

    #[tokio::test]
    async fn start_persists_and_restore_reloads() {
        let repo = Arc::new(InMemoryRepository::new());
        let store = SessionStore::new(fixed_clock(), repo.clone());
        store.start(tokens("1"), Some(user())).await.unwrap();
        assert_eq!(store.access_token().as_deref(), Some("a-1"));

        let reopened = SessionStore::new(fixed_clock(), repo);
        assert!(!reopened.is_authenticated());
        let restored = reopened.restore().await.unwrap();
        assert_eq!(restored, Some(user()));
        assert_eq!(reopened.refresh_token().as_deref(), Some("r-1"));
        assert_eq!(reopened.snapshot().unwrap().saved_at, fixed_now());
    }

    #[tokio::test]
    async fn update_tokens_keeps_refresh_unless_rotated() {
        let repo = Arc::new(InMemoryRepository::new());
        let store = SessionStore::new(fixed_clock(), repo.clone());
        store.start(tokens("1"), None).await.unwrap();

        store.update_tokens("a-2".into(), None).await.unwrap();
        assert_eq!(store.refresh_token().as_deref(), Some("r-1"));

        store
            .update_tokens("a-3".into(), Some("r-3".into()))
            .await
            .unwrap();
        let saved = repo.load_session().await.unwrap().unwrap();
        assert_eq!(saved.access_token, "a-3");
        assert_eq!(saved.refresh_token, "r-3");
    }

    #[tokio::test]
    async fn signed_out_updates_are_ignored() {
        let repo = Arc::new(InMemoryRepository::new());
        let store = SessionStore::new(fixed_clock(), repo.clone());
        store.update_tokens("a".into(), None).await.unwrap();
        store.set_user(user()).await.unwrap();
        assert!(!store.is_authenticated());
        assert!(repo.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_forgets_persisted_session() {
        let repo = Arc::new(InMemoryRepository::new());
        let store = SessionStore::new(fixed_clock(), repo.clone());
        store.start(tokens("1"), Some(user())).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.user().is_none());
        assert!(repo.load_session().await.unwrap().is_none());
    }
}
