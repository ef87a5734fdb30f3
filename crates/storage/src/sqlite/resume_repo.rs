use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::{CourseId, LessonId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, course_id_to_i64, lesson_id_from_i64, lesson_id_to_i64, ser};
use crate::repository::{ResumeRepository, StorageError};

#[async_trait]
impl ResumeRepository for SqliteRepository {
    async fn last_lesson(&self, course_id: CourseId) -> Result<Option<LessonId>, StorageError> {
        let row = sqlx::query("SELECT lesson_id FROM resume_positions WHERE course_id = ?1")
            .bind(course_id_to_i64(course_id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.map(|row| {
            let raw: i64 = row.try_get("lesson_id").map_err(ser)?;
            lesson_id_from_i64(raw)
        })
        .transpose()
    }

    async fn remember_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO resume_positions (course_id, lesson_id, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(course_id) DO UPDATE SET
                lesson_id = excluded.lesson_id,
                updated_at = excluded.updated_at
            ",
        )
        .bind(course_id_to_i64(course_id)?)
        .bind(lesson_id_to_i64(lesson_id)?)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
