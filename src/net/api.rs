//! REST calls against the authentication API.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns a typed [`ApiError`]. Screens reduce it to a single
//! banner string with [`ApiError::display_message`], preferring the server's
//! `message` field over their own fallback text.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;

use super::http::{HttpClient, HttpError, HttpRequest, HttpResponse};
use super::types::{Credentials, LoginResponse, RegistrationProfile, SessionToken, UserProfile, server_message};

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const CURRENT_USER_PATH: &str = "/api/auth/me";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No HTTP response was obtained.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("server rejected request: status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// A 2xx body did not match the expected schema.
    #[error("unexpected response body: {0}")]
    Schema(String),

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),
}

impl ApiError {
    /// `true` when the server refused the bearer token (401 or 403).
    #[must_use]
    pub fn is_session_rejected(&self) -> bool {
        matches!(self, Self::Rejected { status: 401 | 403, .. })
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Banner text: the server's message when it sent one, else `fallback`.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

fn rejected(response: &HttpResponse) -> ApiError {
    ApiError::Rejected { status: response.status, message: server_message(&response.body) }
}

fn json_body<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))
}

// =============================================================================
// CLIENT
// =============================================================================

/// The three authentication endpoints over an injected [`HttpClient`].
#[derive(Clone)]
pub struct AuthApi {
    http: Arc<dyn HttpClient>,
}

impl AuthApi {
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// `POST /api/auth/register`. Any 2xx body is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] on a non-2xx status and
    /// [`ApiError::Http`] when no response arrives.
    pub async fn register(&self, profile: &RegistrationProfile) -> Result<(), ApiError> {
        let request = HttpRequest::post(REGISTER_PATH, json_body(profile)?);
        let response = self.http.send(request).await?;
        if !response.is_success() {
            tracing::info!(status = response.status, "register rejected");
            return Err(rejected(&response));
        }
        tracing::info!(status = response.status, "register succeeded");
        Ok(())
    }

    /// `POST /api/auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] on a non-2xx status,
    /// [`ApiError::Schema`] when the body is not a login response, and
    /// [`ApiError::Http`] when no response arrives.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = HttpRequest::post(LOGIN_PATH, json_body(credentials)?);
        let response = self.http.send(request).await?;
        if !response.is_success() {
            tracing::info!(status = response.status, "login rejected");
            return Err(rejected(&response));
        }
        let body = response.json::<LoginResponse>().map_err(|e| ApiError::Schema(e.to_string()))?;
        tracing::info!(has_token = body.session_token().is_some(), "login succeeded");
        Ok(body)
    }

    /// `GET /api/auth/me` with the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] on a non-2xx status (check
    /// [`ApiError::is_session_rejected`] for 401/403), [`ApiError::Schema`]
    /// when the body is not a user profile, and [`ApiError::Http`] when no
    /// response arrives.
    pub async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, ApiError> {
        let request = HttpRequest::get(CURRENT_USER_PATH)
            .header("Authorization", token.bearer())
            .header("Accept", "application/json");
        let response = self.http.send(request).await?;
        if !response.is_success() {
            tracing::info!(status = response.status, "current user request rejected");
            return Err(rejected(&response));
        }
        response.json::<UserProfile>().map_err(|e| ApiError::Schema(e.to_string()))
    }
}
