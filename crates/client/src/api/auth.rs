//! Authentication endpoints
//!
//! Login, registration, logout, and the credential refresh transport. The
//! refresh credential never appears in application code: the backend sets
//! it as an HTTP-only cookie at login, the shared cookie jar returns it on
//! `POST /auth/refresh`, and only the short-lived access credential comes
//! back in the body.

use std::sync::Arc;

use async_trait::async_trait;
use peakform_common::auth::{RefreshTransport, SessionError, SessionManager, TokenResponse};
use peakform_domain::constants::{
    AUTH_LOGIN_PATH, AUTH_LOGOUT_PATH, AUTH_ME_PATH, AUTH_REFRESH_PATH, AUTH_REGISTER_PATH,
};
use peakform_domain::{LoginRequest, RegisterRequest, User};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info};

use super::client::ApiClient;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Login response body
///
/// The refresh credential rides alongside as a `Set-Cookie` header, handled
/// entirely by the cookie jar.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    user: User,
}

/// Refresh transport against `POST /auth/refresh`
///
/// Deliberately bypasses [`ApiClient`]: the refresh call is the one request
/// that must not carry the bearer credential and must never re-enter the
/// recovery path.
pub struct RefreshEndpoint {
    http: HttpClient,
    base_url: String,
}

impl RefreshEndpoint {
    /// Create a refresh transport
    ///
    /// `http` must be the same transport the rest of the client uses, so
    /// the refresh call sees the cookie set at login.
    #[must_use]
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }
}

#[async_trait]
impl RefreshTransport for RefreshEndpoint {
    async fn refresh(&self) -> Result<String, SessionError> {
        let url = format!("{}{}", self.base_url, AUTH_REFRESH_PATH);
        debug!("requesting credential refresh");

        let request = self.http.request(Method::POST, &url);
        let response = self
            .http
            .send(request)
            .await
            .map_err(|err| SessionError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("refresh endpoint returned {status}: {body}");
            return if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                Err(SessionError::Expired(message))
            } else {
                Err(SessionError::Transport(message))
            };
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| SessionError::Transport(format!("invalid refresh response: {err}")))?;

        Ok(token.access_token)
    }
}

/// Authentication API
///
/// Account flows over the shared [`ApiClient`]. Login is exempt from the
/// unauthorized-recovery path, so a credential failure there surfaces
/// directly as [`ApiError::Auth`].
pub struct AuthApi {
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
}

impl AuthApi {
    /// Create the auth API over a shared client
    #[must_use]
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    /// Create an account
    ///
    /// # Errors
    /// Returns error if the backend rejects the registration
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.api.post(AUTH_REGISTER_PATH, request).await
    }

    /// Log in and store the issued access credential
    ///
    /// # Errors
    /// Returns [`ApiError::Auth`] on bad credentials; the failure is never
    /// retried and never triggers a refresh
    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        let response: LoginResponse = self.api.post(AUTH_LOGIN_PATH, request).await?;

        self.session.set_access_token(response.access_token).await?;
        info!(username = %response.user.username, "logged in");

        Ok(response.user)
    }

    /// Log out
    ///
    /// The local credential is cleared even when the server call fails; the
    /// server error is still reported so the caller can surface it.
    ///
    /// # Errors
    /// Returns error if the server call or the local clear fails
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.api.post_empty::<()>(AUTH_LOGOUT_PATH).await;

        self.session.clear().await?;
        info!("logged out");

        result
    }

    /// Fetch the authenticated account
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.api.get(AUTH_ME_PATH).await
    }
}
