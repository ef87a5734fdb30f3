use dioxus::prelude::*;
use services::{ApiError, PlayerError, QuizError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    Offline,
    SignedOut,
    Forbidden,
    NotFound,
    NotEnrolled,
    NoAttemptsLeft,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::Offline => "Could not reach the server. Check your connection and retry.",
            ViewError::SignedOut => "Your session has ended. Please sign in again.",
            ViewError::Forbidden => "You do not have permission to do that.",
            ViewError::NotFound => "That item no longer exists.",
            ViewError::NotEnrolled => "You are not enrolled in this course yet.",
            ViewError::NoAttemptsLeft => "You have used all attempts for this quiz.",
        }
    }

    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ViewError::SignedOut,
            ApiError::Forbidden => ViewError::Forbidden,
            ApiError::NotFound => ViewError::NotFound,
            err if err.is_network() => ViewError::Offline,
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn from_player(err: &PlayerError) -> Self {
        match err {
            PlayerError::NotEnrolled(_) => ViewError::NotEnrolled,
            PlayerError::LessonNotFound(_) => ViewError::NotFound,
            PlayerError::Api(api) => Self::from_api(api),
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn from_quiz(err: &QuizError) -> Self {
        match err {
            QuizError::NoAttemptsLeft(_) => ViewError::NoAttemptsLeft,
            QuizError::Api(api) => Self::from_api(api),
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn needs_login(self) -> bool {
        self == ViewError::SignedOut
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{CourseId, QuizId};
    use services::FieldErrors;

    #[test]
    fn api_errors_map_to_banners() {
        assert_eq!(ViewError::from_api(&ApiError::Unauthorized), ViewError::SignedOut);
        assert_eq!(
            ViewError::from_api(&ApiError::Network("timeout".into())),
            ViewError::Offline
        );
        assert_eq!(
            ViewError::from_api(&ApiError::Validation(FieldErrors::detail("bad"))),
            ViewError::Unknown
        );
        assert!(ViewError::SignedOut.needs_login());
    }

    #[test]
    fn service_errors_keep_their_category() {
        assert_eq!(
            ViewError::from_player(&PlayerError::NotEnrolled(CourseId::new(1))),
            ViewError::NotEnrolled
        );
        assert_eq!(
            ViewError::from_player(&PlayerError::Api(ApiError::Forbidden)),
            ViewError::Forbidden
        );
        assert_eq!(
            ViewError::from_quiz(&QuizError::NoAttemptsLeft(QuizId::new(2))),
            ViewError::NoAttemptsLeft
        );
    }
}
