//! HTTP transport
//!
//! Thin wrapper over `reqwest` used by every remote call. The wrapper owns
//! exactly one concern beyond construction: mapping transport failures into
//! domain errors. Requests are sent once; error recovery (the 401 refresh
//! cycle) belongs to the API layer, and transport errors propagate to the
//! caller unchanged.
//!
//! The cookie store is enabled because the refresh credential travels in an
//! HTTP-managed cookie: the backend sets it at login and reads it at
//! refresh, and application code never touches it. Clones share the
//! underlying client, so every handle built from one [`HttpClient`] sees
//! the same cookie jar.

use std::time::Duration;

use peakform_domain::PeakFormError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

/// HTTP client with shared cookie store
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder exactly once.
    ///
    /// # Errors
    /// Returns `PeakFormError::Network` if the request cannot be built or
    /// the transport fails (connect, timeout, TLS).
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, PeakFormError> {
        let request = builder
            .build()
            .map_err(|err| PeakFormError::Network(format!("failed to build request: {err}")))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(map_transport_error(&err))
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `PeakFormError::Network` if the TLS backend cannot be
    /// initialized.
    pub fn build(self) -> Result<HttpClient, PeakFormError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).cookie_store(true);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| PeakFormError::Network(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client })
    }
}

fn map_transport_error(err: &reqwest::Error) -> PeakFormError {
    if err.is_timeout() {
        PeakFormError::Network(format!("request timed out: {err}"))
    } else {
        PeakFormError::Network(format!("http transport error: {err}"))
    }
}
