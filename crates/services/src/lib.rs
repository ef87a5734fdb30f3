#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod instructor_service;
pub mod player_service;
pub mod quiz_service;
pub mod session_store;

pub use course_core::Clock;

pub use api::{ApiClient, ApiRequest, ApiResponse, HttpMethod, HttpTransport, ReqwestTransport};
pub use app_services::AppServices;
pub use auth_service::{AuthService, Credentials, ProfileUpdate, Registration};
pub use catalog_service::CatalogService;
pub use config::ApiConfig;
pub use error::{ApiError, AppServicesError, FieldErrors, PlayerError, QuizError};
pub use instructor_service::{
    ChoiceDraft, CourseDraft, InstructorService, LessonDraft, ModuleDraft, QuestionDraft,
    QuizDraft,
};
pub use player_service::PlayerService;
pub use quiz_service::QuizService;
pub use session_store::{AuthTokens, SessionStore};
