use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::UserProfile;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, ser};
use crate::repository::{SessionRecord, SessionRepository, StorageError};

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn load_session(&self) -> Result<Option<SessionRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT access_token, refresh_token, user_json, saved_at
            FROM auth_session
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let access_token: String = row.try_get("access_token").map_err(ser)?;
        let refresh_token: String = row.try_get("refresh_token").map_err(ser)?;
        let user_json: Option<String> = row.try_get("user_json").map_err(ser)?;
        let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser)?;
        let user = user_json
            .map(|raw| serde_json::from_str::<UserProfile>(&raw))
            .transpose()
            .map_err(ser)?;

        Ok(Some(SessionRecord {
            access_token,
            refresh_token,
            user,
            saved_at,
        }))
    }

    async fn save_session(&self, session: &SessionRecord) -> Result<(), StorageError> {
        let user_json = session
            .user
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO auth_session (id, access_token, refresh_token, user_json, saved_at)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                user_json = excluded.user_json,
                saved_at = excluded.saved_at
            ",
        )
        .bind(&session.access_token)
        .bind(&session.refresh_token)
        .bind(user_json)
        .bind(session.saved_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM auth_session WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
