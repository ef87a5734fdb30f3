use std::sync::Arc;

use storage::Storage;

use crate::Clock;
use crate::api::{ApiClient, HttpTransport, ReqwestTransport};
use crate::auth_service::AuthService;
use crate::catalog_service::CatalogService;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::instructor_service::InstructorService;
use crate::player_service::PlayerService;
use crate::quiz_service::QuizService;
use crate::session_store::SessionStore;

/// Assembles the app-facing services around one API client and one session.
#[derive(Clone)]
pub struct AppServices {
    api: Arc<ApiClient>,
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    player: Arc<PlayerService>,
    quizzes: Arc<QuizService>,
    instructor: Arc<InstructorService>,
}

impl AppServices {
    /// Build services talking to the configured backend over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Api` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig, storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), storage, clock))
    }

    /// Build services backed by `SQLite` storage at `db_url`, then restore any saved session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization, session restore or
    /// HTTP client setup fails.
    pub async fn new_sqlite(
        config: ApiConfig,
        db_url: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let services = Self::new(config, &storage, clock)?;
        services.api.session().restore().await?;
        Ok(services)
    }

    /// Build services over an arbitrary transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn HttpTransport>, storage: &Storage, clock: Clock) -> Self {
        let session = Arc::new(SessionStore::new(clock, Arc::clone(&storage.sessions)));
        let api = Arc::new(ApiClient::new(transport, session));

        Self {
            auth: Arc::new(AuthService::new(Arc::clone(&api))),
            catalog: Arc::new(CatalogService::new(Arc::clone(&api))),
            player: Arc::new(PlayerService::new(
                clock,
                Arc::clone(&api),
                Arc::clone(&storage.resume),
            )),
            quizzes: Arc::new(QuizService::new(Arc::clone(&api))),
            instructor: Arc::new(InstructorService::new(Arc::clone(&api))),
            api,
        }
    }

    #[must_use]
    pub fn api(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn player(&self) -> Arc<PlayerService> {
        Arc::clone(&self.player)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn instructor(&self) -> Arc<InstructorService> {
        Arc::clone(&self.instructor)
    }
}
