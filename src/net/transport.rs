//! HTTP transports for form-encoded POST requests.
//!
//! Client-side (`browser`): page-relative requests via `gloo-net`.
//! Native (`native`): `reqwest` with an explicit origin, for scripts and
//! harnesses that talk to the same backend outside a browser.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use super::api::ApiError;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
pub const JSON_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";
pub const REQUESTED_WITH: &str = "XMLHttpRequest";

/// A single form-encoded POST, ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormRequest {
    pub url: String,
    pub body: String,
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one POST per call. Implementations never retry, cache, or dedupe.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Send `request` and return whatever status the server answered with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response was received at all.
    async fn post_form(&self, request: &FormRequest) -> Result<RawResponse, ApiError>;
}

// =============================================================================
// BROWSER
// =============================================================================

/// `fetch`-backed transport for pages; URLs stay relative to the document.
#[cfg(feature = "browser")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "browser")]
#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn post_form(&self, request: &FormRequest) -> Result<RawResponse, ApiError> {
        let resp = gloo_net::http::Request::post(&request.url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .header("Accept", JSON_ACCEPT)
            .header("X-Requested-With", REQUESTED_WITH)
            .body(request.body.clone())
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

// =============================================================================
// NATIVE
// =============================================================================

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Resolve a page-relative URL against `origin`. Absolute URLs pass through.
#[cfg(any(test, feature = "native"))]
fn absolute_url(origin: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_owned();
    }
    let origin = origin.trim_end_matches('/');
    if url.starts_with('/') { format!("{origin}{url}") } else { format!("{origin}/{url}") }
}

#[cfg(feature = "native")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    origin: String,
}

#[cfg(feature = "native")]
impl ReqwestTransport {
    /// Build a transport that resolves relative URLs against `origin`
    /// (e.g. `http://127.0.0.1:8080`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(origin: &str, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeouts.request_secs))
            .connect_timeout(std::time::Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("http client build failed: {e}")))?;
        Ok(Self { http, origin: origin.trim_end_matches('/').to_owned() })
    }
}

#[cfg(feature = "native")]
#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn post_form(&self, request: &FormRequest) -> Result<RawResponse, ApiError> {
        let resp = self
            .http
            .post(absolute_url(&self.origin, &request.url))
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, JSON_ACCEPT)
            .header("X-Requested-With", REQUESTED_WITH)
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
