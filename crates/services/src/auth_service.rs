use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use course_core::model::{Role, UserProfile};

use crate::api::{ApiClient, endpoints};
use crate::error::{ApiError, FieldErrors};
use crate::session_store::{AuthTokens, SessionStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Editable part of the profile, sent with `PUT /auth/profile/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&UserProfile> for ProfileUpdate {
    fn from(user: &UserProfile) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access: String,
    refresh: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

/// Sign-in, sign-up, sign-out and profile management.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        let session = api.session();
        Self { api, session }
    }

    /// Load a previously saved session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if local storage cannot be read.
    pub async fn restore(&self) -> Result<Option<UserProfile>, ApiError> {
        Ok(self.session.restore().await?)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.user()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Exchange credentials for tokens and start a session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for rejected credentials and other
    /// `ApiError`s for transport or storage failures.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError> {
        let response: LoginResponse = self
            .api
            .post_anonymous(endpoints::LOGIN, credentials)
            .await
            .map_err(|err| match err {
                ApiError::Unauthorized => {
                    ApiError::Validation(FieldErrors::detail("Invalid username or password."))
                }
                other => other,
            })?;

        let tokens = AuthTokens {
            access: response.access,
            refresh: response.refresh,
        };
        self.session.start(tokens, response.user.clone()).await?;

        let user = match response.user {
            Some(user) => user,
            None => self.profile().await?,
        };
        info!(username = %user.username, "signed in");
        Ok(user)
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` with the backend's field errors when the
    /// registration is rejected.
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        let _created: serde_json::Value = self
            .api
            .post_anonymous(endpoints::REGISTER, registration)
            .await?;
        info!(username = %registration.username, "account created");

        self.login(&Credentials {
            username: registration.username.clone(),
            password: registration.password.clone(),
        })
        .await
    }

    /// Forget the local session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the saved session cannot be removed.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.session.clear().await?;
        info!("signed out");
        Ok(())
    }

    /// Fetch the profile and cache it in the session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport, auth or storage failures.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let user: UserProfile = self.api.get(endpoints::PROFILE).await?;
        self.session.set_user(user.clone()).await?;
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` with field errors when the update is rejected.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let user: UserProfile = self.api.put(endpoints::PROFILE, update).await?;
        self.session.set_user(user.clone()).await?;
        Ok(user)
    }
}
