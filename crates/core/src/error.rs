use thiserror::Error;

use crate::model::{CourseError, ParseIdError};

/// Umbrella error for domain-level failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}
