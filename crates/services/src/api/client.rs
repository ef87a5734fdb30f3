use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::endpoints;
use super::transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};
use crate::error::{ApiError, FieldErrors};
use crate::session_store::SessionStore;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// List endpoints answer either with a bare array or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Plain(Vec<T>),
    Page { results: Vec<T> },
}

impl<T> ListPayload<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Plain(items) | ListPayload::Page { results: items } => items,
        }
    }
}

/// Resource-oriented HTTP client with bearer auth and one-shot token refresh.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport failures, non-success statuses, or bodies
    /// that do not match `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(HttpMethod::Get, path, None).await?;
        decode(&response)
    }

    /// Fetch a list endpoint, accepting both plain and paginated bodies.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` as for [`ApiClient::get`].
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let payload: ListPayload<T> = self.get(path).await?;
        Ok(payload.into_vec())
    }

    /// # Errors
    ///
    /// Returns `ApiError` as for [`ApiClient::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(HttpMethod::Post, path, Some(serde_json::to_value(body)?))
            .await?;
        decode(&response)
    }

    /// POST whose response body is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or non-success statuses.
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(HttpMethod::Post, path, Some(serde_json::to_value(body)?))
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError` as for [`ApiClient::get`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(HttpMethod::Put, path, Some(serde_json::to_value(body)?))
            .await?;
        decode(&response)
    }

    /// # Errors
    ///
    /// Returns `ApiError` as for [`ApiClient::get`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(HttpMethod::Patch, path, Some(serde_json::to_value(body)?))
            .await?;
        decode(&response)
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or non-success statuses.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(HttpMethod::Delete, path, None).await?;
        Ok(())
    }

    /// POST without a bearer token and without refresh handling (login, register).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` as for [`ApiClient::get`].
    pub async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(HttpMethod::Post, path).with_body(serde_json::to_value(body)?);
        let response = self.transport.send(request).await?;
        check_status(&response)?;
        decode(&response)
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Returns `Ok(None)` when there is nothing to refresh or the backend
    /// rejected the refresh token; in the latter case the session is cleared.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures (the session is kept, so a
    /// later retry can still succeed) or when a rejected session cannot be
    /// cleared from storage.
    pub async fn refresh_access(&self) -> Result<Option<String>, ApiError> {
        let Some(refresh) = self.session.refresh_token() else {
            return Ok(None);
        };

        let request = ApiRequest::new(HttpMethod::Post, endpoints::TOKEN_REFRESH)
            .with_body(json!({ "refresh": refresh }));
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            warn!(status = response.status, "token refresh rejected; signing out");
            self.session.clear().await?;
            return Ok(None);
        }

        let tokens: RefreshResponse = decode(&response)?;
        // The new token is already live in memory; only the disk copy is stale.
        if let Err(err) = self
            .session
            .update_tokens(tokens.access.clone(), tokens.refresh)
            .await
        {
            warn!(error = %err, "could not persist refreshed tokens");
        }
        Ok(Some(tokens.access))
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let bearer = self.session.access_token();
        let authenticated = bearer.is_some();
        let mut request = ApiRequest::new(method, path).with_bearer(bearer);
        request.body = body;

        debug!(method = method.as_str(), path, "api request");
        let response = self.transport.send(request.clone()).await?;

        if response.status != 401 || !authenticated {
            check_status(&response)?;
            return Ok(response);
        }

        let Some(access) = self.refresh_access().await? else {
            return Err(ApiError::Unauthorized);
        };

        debug!(method = method.as_str(), path, "retrying after token refresh");
        let retry = request.with_bearer(Some(access));
        let response = self.transport.send(retry).await?;
        check_status(&response)?;
        Ok(response)
    }
}

fn check_status(response: &ApiResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(match response.status {
        400 | 409 | 422 => ApiError::Validation(FieldErrors::from_body(&response.body)),
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        404 => ApiError::NotFound,
        status => ApiError::Status {
            status,
            detail: FieldErrors::from_body(&response.body).detail,
        },
    })
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
    // 204 and empty bodies decode as JSON null so `()`/`Option<_>` targets work.
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(check_status(&ApiResponse::new(204, "")).is_ok());
        assert!(matches!(
            check_status(&ApiResponse::new(400, r#"{"title": ["required"]}"#)),
            Err(ApiError::Validation(errors)) if errors.field("title").is_some()
        ));
        assert!(matches!(
            check_status(&ApiResponse::new(401, "")),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            check_status(&ApiResponse::new(403, "")),
            Err(ApiError::Forbidden)
        ));
        assert!(matches!(
            check_status(&ApiResponse::new(404, "")),
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            check_status(&ApiResponse::new(503, r#"{"detail": "maintenance"}"#)),
            Err(ApiError::Status { status: 503, detail: Some(d) }) if d == "maintenance"
        ));
    }

    #[test]
    fn empty_body_decodes_as_null() {
        decode::<()>(&ApiResponse::new(204, "")).unwrap();
        let none: Option<u32> = decode(&ApiResponse::new(200, "  ")).unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn list_payload_accepts_both_shapes() {
        let plain: ListPayload<u32> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2]);
        let page: ListPayload<u32> =
            serde_json::from_str(r#"{"count": 1, "next": null, "results": [3]}"#).unwrap();
        assert_eq!(page.into_vec(), vec![3]);
    }
}
