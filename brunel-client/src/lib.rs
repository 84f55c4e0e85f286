//! Brunel HTTP Client
//!
//! A type-safe HTTP client for the Brunel CI server API.
//!
//! This crate covers the endpoints the progress tooling consumes: job
//! lookup, cancellation, rescheduling, the incremental progress fetch and
//! full container log retrieval. Every request carries the bearer token the
//! client was configured with.
//!
//! # Example
//!
//! ```no_run
//! use brunel_client::BrunelClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BrunelClient::new("http://localhost:8080")
//!         .with_token("secret-token");
//!
//!     let job = client.get_job("5d1db4e3").await?;
//!     println!("job {} is {}", job.id, job.state);
//!     Ok(())
//! }
//! ```

pub mod error;
mod containers;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ErrorBody;

/// HTTP client for the Brunel server API
///
/// Endpoints are grouped into:
/// - Job lifecycle (get, cancel, reschedule)
/// - Job progress (incremental delta fetch)
/// - Container logs (full-text fetch)
#[derive(Debug, Clone)]
pub struct BrunelClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// Bearer token attached to every request, if configured
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl BrunelClient {
    /// Create a new client without authentication
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server API (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client: Client::new(),
        }
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Attach a bearer token that will be sent with every request
    ///
    /// Token acquisition and persistence are the caller's concern; the
    /// client only forwards what it is given.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Apply the configured bearer token to a request
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(format!("{}{}", self.base_url, path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(format!("{}{}", self.base_url, path)))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.delete(format!("{}{}", self.base_url, path)))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::DecodeError(e.to_string()))
    }

    /// Handle an API response that returns no useful body (e.g., DELETE)
    pub(crate) async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), response).await);
        }

        Ok(())
    }

    /// Handle an API response whose body is plain text
    pub(crate) async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), response).await);
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::DecodeError(e.to_string()))
    }

    /// Build an [`ClientError::ApiError`] from a non-success response.
    ///
    /// The server reports failures as `{"Error": "..."}`; fall back to the
    /// raw body when it does not.
    async fn status_error(status: u16, response: reqwest::Response) -> ClientError {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or(body);

        ClientError::api_error(status, message)
    }
}
