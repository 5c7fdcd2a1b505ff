//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! Screens never talk to reqwest directly. They go through [`HttpClient`],
//! which takes a method, path, headers and optional JSON body and yields a
//! status code plus raw body text. Tests substitute a scripted fake; the
//! binary uses [`ReqwestHttpClient`].

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by the transport before any HTTP status is available.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request could not be sent or the response body could not be read.
    #[error("request failed: {0}")]
    Transport(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A request relative to the configured API base address.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute path such as `/api/auth/login`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    /// Serialized as the JSON request body when present.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self { method: Method::Post, path: path.into(), headers: Vec::new(), body: Some(body) }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// `true` for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Capability to issue one HTTP request against the API.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request and return the status and body.
    ///
    /// Non-2xx statuses are returned as `Ok`; only failures to obtain a
    /// response at all are errors.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] when the request cannot be sent or the
    /// body cannot be read.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =============================================================================
// REQWEST CLIENT
// =============================================================================

pub struct ReqwestHttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestHttpClient {
    /// Build a client for the configured base address and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if reqwest cannot build its client.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_secs(config.timeouts.connect_secs));
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| HttpError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[async_trait::async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = join_url(&self.base_url, &request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = request.method.as_str(), %url, "sending request");
        let response = builder.send().await.map_err(|e| HttpError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| HttpError::Transport(e.to_string()))?;
        tracing::debug!(method = request.method.as_str(), %url, status, "response received");

        Ok(HttpResponse { status, body })
    }
}
