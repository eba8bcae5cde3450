//! API client with transparent credential recovery
//!
//! Request dispatcher for the PeakForm backend. Every call attaches the
//! stored bearer credential when one exists; an unauthorized response
//! triggers one shared credential refresh followed by a single re-issue of
//! the original request. Nothing else is retried or transformed.

use std::sync::Arc;

use peakform_common::auth::SessionManager;
use peakform_domain::constants::AUTH_LOGIN_PATH;
use peakform_domain::ApiConfig;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::errors::ApiError;
use crate::http::HttpClient;

/// API client for the PeakForm backend
///
/// Holds the HTTP transport, the backend base URL, and the session handle
/// used for credential attachment and refresh recovery. Cheap to share via
/// `Arc`; the endpoint services each hold one.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `http` - Shared HTTP transport (must be the same instance the
    ///   refresh endpoint uses, so both see one cookie jar)
    /// * `config` - Remote API settings
    /// * `session` - Session manager for this application session
    #[must_use]
    pub fn new(http: HttpClient, config: &ApiConfig, session: Arc<SessionManager>) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Session handle backing this client
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Execute a GET request
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(Method::GET, path, None, None).await?;
        decode_response(response, path).await
    }

    /// Execute a GET request with query parameters
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_query<R: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<R, ApiError> {
        let query = serde_json::to_value(query)
            .map_err(|err| ApiError::Client(format!("Failed to serialize query: {err}")))?;
        let response = self.execute(Method::GET, path, Some(query), None).await?;
        decode_response(response, path).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::Client(format!("Failed to serialize body: {err}")))?;
        let response = self.execute(Method::POST, path, None, Some(body)).await?;
        decode_response(response, path).await
    }

    /// Execute a POST request without a body (like, follow, logout)
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(Method::POST, path, None, None).await?;
        decode_response(response, path).await
    }

    /// Execute a PATCH request with a JSON body
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::Client(format!("Failed to serialize body: {err}")))?;
        let response = self.execute(Method::PATCH, path, None, Some(body)).await?;
        decode_response(response, path).await
    }

    /// Execute a DELETE request
    ///
    /// Endpoints that answer 204 decode into `()`; endpoints that return
    /// the updated resource decode into it.
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(Method::DELETE, path, None, None).await?;
        decode_response(response, path).await
    }

    /// Dispatch a request, recovering once from an unauthorized response
    ///
    /// The login endpoint is exempt, and the re-issued request is final: a
    /// second unauthorized response propagates through the status mapping
    /// without touching the refresh path again. Concurrent unauthorized
    /// responses collapse into one refresh call inside
    /// [`SessionManager::refresh_access_token`].
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<Value>,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let bearer = self.session.access_token().await;
        let response =
            self.dispatch(method.clone(), path, query.as_ref(), body.as_ref(), bearer).await?;

        if response.status() != StatusCode::UNAUTHORIZED || path == AUTH_LOGIN_PATH {
            return Ok(response);
        }

        debug!(path, "unauthorized response, entering refresh recovery");
        let token = self.session.refresh_access_token().await?;
        self.dispatch(method, path, query.as_ref(), body.as_ref(), Some(token)).await
    }

    /// Build and send one request, attaching the bearer credential if any
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: Option<&Value>,
        body: Option<&Value>,
        bearer: Option<String>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(token) = bearer {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        self.http.send(request).await.map_err(ApiError::from)
    }
}

/// Map the response status and parse the body
async fn decode_response<R: DeserializeOwned>(
    response: Response,
    path: &str,
) -> Result<R, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(map_status_error(status, path, body));
    }

    // 204/205 have no body by RFC spec
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Client(format!(
                "No content response ({}), but response type cannot be deserialized from empty body",
                status.as_u16()
            ))
        });
    }

    response
        .json()
        .await
        .map_err(|err| ApiError::Client(format!("Failed to parse response: {err}")))
}

fn map_status_error(status: StatusCode, path: &str, body: String) -> ApiError {
    let message = if body.is_empty() {
        format!("{path} returned status {status}")
    } else {
        format!("{path} returned status {status}: {body}")
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ApiError::Auth(message)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        ApiError::RateLimit(message)
    } else if status.is_server_error() {
        ApiError::Server(message)
    } else if status.is_client_error() {
        ApiError::Client(message)
    } else {
        ApiError::Network(message)
    }
}
