use std::sync::Arc;

use course_core::model::UserProfile;
use dioxus::prelude::*;
use dioxus_router::{Navigator, use_navigator};
use services::{
    ApiError, AuthService, CatalogService, InstructorService, PlayerService, QuizService,
};
use tracing::info;

use crate::routes::Route;
use crate::views::ViewError;

pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn player(&self) -> Arc<PlayerService>;
    fn quizzes(&self) -> Arc<QuizService>;
    fn instructor(&self) -> Arc<InstructorService>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    player: Arc<PlayerService>,
    quizzes: Arc<QuizService>,
    instructor: Arc<InstructorService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            catalog: app.catalog(),
            player: app.player(),
            quizzes: app.quizzes(),
            instructor: app.instructor(),
        }
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

/// Signed-in user, shared by the layout and the auth screens.
#[derive(Clone, Copy)]
pub struct CurrentUser(pub Signal<Option<UserProfile>>);

impl CurrentUser {
    #[must_use]
    pub fn get(&self) -> Option<UserProfile> {
        self.0.read().clone()
    }

    pub fn set(&mut self, user: Option<UserProfile>) {
        self.0.set(user);
    }

    #[must_use]
    pub fn can_author(&self) -> bool {
        self.0.read().as_ref().is_some_and(|u| u.role.can_author())
    }
}

/// Sends the user back to sign in once the backend has refused the session.
///
/// The API client already cleared the stored tokens by the time a view sees
/// `ViewError::SignedOut`; this drops the in-memory user and leaves the screen.
#[derive(Clone, Copy)]
pub struct SessionGuard {
    user: CurrentUser,
    navigator: Navigator,
}

impl SessionGuard {
    /// Returns `true` when `err` ended the session; the caller shows nothing else.
    pub fn ended(mut self, err: ViewError) -> bool {
        if !err.needs_login() {
            return false;
        }
        info!("session ended; returning to sign in");
        self.user.set(None);
        let _ = self.navigator.push(Route::Login {});
        true
    }

    pub fn ended_api(self, err: &ApiError) -> bool {
        self.ended(ViewError::from_api(err))
    }
}

pub fn use_session_guard() -> SessionGuard {
    SessionGuard {
        user: use_context::<CurrentUser>(),
        navigator: use_navigator(),
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Provide `CurrentUser`, seeded from the restored session.
pub fn use_current_user_provider(ctx: &AppContext) -> CurrentUser {
    let auth = ctx.auth();
    use_context_provider(|| CurrentUser(Signal::new(auth.current_user())))
}
