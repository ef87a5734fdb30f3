//! Shared error types for the services crate.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use course_core::model::{CourseId, LessonId, QuizId};
use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Validation feedback from a 4xx response body.
///
/// The backend answers with `{"detail": "..."}`, `{"field": ["msg", ...]}`,
/// or a mix of both; `non_field_errors` is folded into `detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub detail: Option<String>,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    #[must_use]
    pub fn detail(message: impl Into<String>) -> Self {
        Self {
            detail: Some(message.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Parse a response body. Non-JSON bodies become the detail text.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            let trimmed = body.trim();
            return if trimmed.is_empty() {
                Self::default()
            } else {
                Self::detail(trimmed)
            };
        };

        let mut errors = Self::default();
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    let messages = messages_of(&value);
                    if messages.is_empty() {
                        continue;
                    }
                    if key == "detail" || key == "non_field_errors" {
                        let joined = messages.join(" ");
                        errors.detail = Some(match errors.detail.take() {
                            Some(existing) => format!("{existing} {joined}"),
                            None => joined,
                        });
                    } else {
                        errors.fields.insert(key, messages);
                    }
                }
            }
            other => {
                let messages = messages_of(&other);
                if !messages.is_empty() {
                    errors.detail = Some(messages.join(" "));
                }
            }
        }
        errors
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detail.is_none() && self.fields.is_empty()
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(messages_of).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(detail) = &self.detail {
            parts.push(detail.clone());
        }
        for (field, messages) in &self.fields {
            parts.push(format!("{field}: {}", messages.join(" ")));
        }
        if parts.is_empty() {
            write!(f, "request was rejected")
        } else {
            write!(f, "{}", parts.join("; "))
        }
    }
}

/// Errors emitted by the API client and every service built on it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Validation(FieldErrors),
    #[error("not signed in")]
    Unauthorized,
    #[error("permission denied")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl ApiError {
    /// Transport-level failures (no usable HTTP response).
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// The session is gone and the user has to sign in again.
    #[must_use]
    pub fn needs_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Errors emitted by `PlayerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("not enrolled in course {0}")]
    NotEnrolled(CourseId),
    #[error("lesson {0} is not part of this course")]
    LessonNotFound(LessonId),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no attempts left for quiz {0}")]
    NoAttemptsLeft(QuizId),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
