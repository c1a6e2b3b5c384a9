//! HTTP client for the homework status endpoint
//!
//! Issues exactly one authenticated GET per call. There is no retry here;
//! a failed request is reported to the caller and the watcher tries again on
//! its next cycle.

use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::utils::error::FetchError;
use crate::utils::unix_now;

/// Query parameter carrying the lower time bound
pub const FROM_DATE_PARAM: &str = "from_date";

/// Homework status API client
pub struct PracticumClient {
    /// HTTP client with configured timeout
    client: Client,

    /// Status endpoint URL
    endpoint: String,

    /// Value of the Authorization header
    auth_header: String,
}

impl PracticumClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Status endpoint URL
    /// * `token` - OAuth token
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            auth_header: format!("OAuth {token}"),
        })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            &config.practicum.endpoint,
            &config.practicum.token,
            config.request_timeout(),
        )
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses updated since `since`
    ///
    /// A non-positive `since` is treated as absent and replaced by the
    /// current time.
    ///
    /// # Errors
    ///
    /// - `FetchError::Status` for any non-200 answer
    /// - `FetchError::Timeout` / `FetchError::Http` for transport failures
    /// - `FetchError::Decode` if the body is not JSON
    pub async fn fetch(&self, since: i64) -> Result<Value, FetchError> {
        let timestamp = if since > 0 { since } else { unix_now() };

        tracing::debug!(endpoint = %self.endpoint, from_date = timestamp, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.auth_header)
            .query(&[(FROM_DATE_PARAM, timestamp)])
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Http(e)
                };
                tracing::error!(endpoint = %self.endpoint, "Homework API request failed: {err}");
                err
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(endpoint = %self.endpoint, status = status.as_u16(), "Homework API returned unexpected status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read homework API response body: {e}");
            FetchError::Http(e)
        })?;

        Self::decode_body(&bytes)
    }

    /// Decode a response body as JSON
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Decode` if the body is not valid JSON
    pub fn decode_body(bytes: &[u8]) -> Result<Value, FetchError> {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::error!("Failed to parse homework API response as JSON: {e}");
            FetchError::Decode(e.to_string())
        })
    }
}
