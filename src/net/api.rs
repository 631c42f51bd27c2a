//! JSON API client for the panel backend.
//!
//! Every call is one form-encoded POST to `<prefix><path>` that expects a JSON
//! body back. The prefix comes from [`ApiConfig`] instead of a page global.
//!
//! ERROR HANDLING
//! ==============
//! [`ApiClient::post`] returns an explicit `Result` so callers can tell a
//! failed request from a pending one. [`ApiClient::post_ignoring_errors`]
//! keeps the old fire-and-forget behavior for callers that opt into it:
//! the success handler simply never runs on failure.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::form::{self, Payload};
use super::transport::{FormRequest, RawResponse, Transport};

pub const DEFAULT_API_PREFIX: &str = "/api";

/// Errors produced by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received (network failure, CORS, client build).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("request failed: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON the caller expected.
    #[error("response parse failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server accepted the request but reported an application error.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Called with the parsed response of a successful request.
pub type SuccessHandler = Box<dyn FnOnce(Value)>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prepended to every request path. A trailing `/` is ignored.
    pub prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { prefix: DEFAULT_API_PREFIX.to_owned() }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.trim_end_matches('/').to_owned() }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full request URL for `path`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let prefix = self.config.prefix.trim_end_matches('/');
        if path.is_empty() || path.starts_with('/') {
            format!("{prefix}{path}")
        } else {
            format!("{prefix}/{path}")
        }
    }

    /// POST `payload` to `path` and return the parsed JSON response.
    ///
    /// A 204 response yields [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if no response arrived,
    /// [`ApiError::Status`] for statuses other than 2xx/304, and
    /// [`ApiError::Decode`] if the body is not valid JSON.
    pub async fn post(&self, path: &str, payload: &Payload) -> Result<Value, ApiError> {
        let request = FormRequest { url: self.endpoint(path), body: form::encode(payload) };
        log::debug!("api POST {} ({} body bytes)", request.url, request.body.len());
        let response = self.transport.post_form(&request).await?;
        let value = parse_response(response)?;
        log::debug!("api POST {} succeeded", request.url);
        Ok(value)
    }

    /// Like [`post`](Self::post), then deserialize the JSON into `R`.
    ///
    /// # Errors
    ///
    /// Everything [`post`](Self::post) returns, plus [`ApiError::Decode`] when
    /// the JSON does not match `R`.
    pub async fn post_as<R: DeserializeOwned>(&self, path: &str, payload: &Payload) -> Result<R, ApiError> {
        let value = self.post(path, payload).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fire-and-forget form of [`post`](Self::post).
    ///
    /// Runs `on_success` exactly once with the parsed response on success,
    /// and also returns that response so callers can chain on it. On failure
    /// nothing runs and `None` comes back; the failure is only logged.
    pub async fn post_ignoring_errors(
        &self,
        path: &str,
        payload: &Payload,
        on_success: Option<SuccessHandler>,
    ) -> Option<Value> {
        match self.post(path, payload).await {
            Ok(value) => {
                if let Some(handler) = on_success {
                    handler(value.clone());
                }
                Some(value)
            }
            Err(e) => {
                log::warn!("api POST {} ignored failure: {e}", self.endpoint(path));
                None
            }
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status) || status == 304
}

fn parse_response(response: RawResponse) -> Result<Value, ApiError> {
    if !is_success(response.status) {
        return Err(ApiError::Status { status: response.status, body: response.body });
    }
    if response.status == 204 {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}
