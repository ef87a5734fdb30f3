use std::sync::Arc;

use serde_json::json;

use course_core::model::{CourseId, CourseSummary, Enrollment};

use crate::api::{ApiClient, Collection, endpoints};
use crate::error::ApiError;

/// Course browsing and enrollment.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<ApiClient>,
}

impl CatalogService {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn list_courses(&self) -> Result<Vec<CourseSummary>, ApiError> {
        self.api.get_list(Collection::Courses.path()).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` when already enrolled or enrollment is closed.
    pub async fn enroll(&self, course_id: CourseId) -> Result<Enrollment, ApiError> {
        self.api
            .post(endpoints::ENROLLMENTS, &json!({ "course": course_id }))
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport or auth failures.
    pub async fn my_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.api.get_list(endpoints::ENROLLMENTS).await
    }
}
