//! Landing screen with email + password login.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use super::{SESSION_SAVE_FAILED, SubmitOutcome, banner, lock, masked};
use crate::app::{Navigator, Route};
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::Credentials;
use crate::state::session::SessionStore;

pub(crate) const LOGIN_FAILED: &str = "Login failed.";
pub(crate) const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Debug, Default)]
struct LoginState {
    form: Credentials,
    error: Option<String>,
    busy: bool,
}

pub struct LoginPage {
    api: AuthApi,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<LoginState>,
}

impl LoginPage {
    #[must_use]
    pub fn new(api: AuthApi, session: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, session, navigator, state: Mutex::new(LoginState::default()) }
    }

    pub fn set_email(&self, value: impl Into<String>) {
        let mut state = lock(&self.state);
        state.form.email = value.into();
        state.error = None;
    }

    pub fn set_password(&self, value: impl Into<String>) {
        let mut state = lock(&self.state);
        state.form.password = value.into();
        state.error = None;
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        lock(&self.state).busy
    }

    /// Log in with the current form values.
    ///
    /// On success the returned token (if any) is stored and the page
    /// navigates to the dashboard; otherwise the banner is set.
    pub async fn submit(&self) -> SubmitOutcome {
        let credentials = {
            let mut state = lock(&self.state);
            if state.busy {
                return SubmitOutcome::Ignored;
            }
            state.busy = true;
            state.error = None;
            state.form.clone()
        };

        let result = self.login(&credentials).await;

        let mut state = lock(&self.state);
        state.busy = false;
        match result {
            Ok(()) => {
                drop(state);
                self.navigator.push(Route::Dashboard);
                SubmitOutcome::Navigated(Route::Dashboard)
            }
            Err(message) => {
                state.error = Some(message);
                SubmitOutcome::Failed
            }
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), String> {
        let response = self.api.login(credentials).await.map_err(|e| {
            tracing::info!(error = %e, "login failed");
            match e {
                ApiError::Rejected { .. } => e.display_message(LOGIN_FAILED),
                _ => INVALID_CREDENTIALS.to_owned(),
            }
        })?;
        if let Some(token) = response.session_token() {
            self.session.set(token).map_err(|e| {
                tracing::error!(error = %e, "failed to store session token");
                SESSION_SAVE_FAILED.to_owned()
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn render(&self) -> String {
        let state = lock(&self.state);
        let mut out = String::new();
        out.push_str("Welcome!\n");
        out.push_str("Track your income, expenses, and savings all in one place.\n");
        out.push_str("Get a simple overview of where your money is going.\n\n");
        out.push_str("Login or Signup?\n");
        out.push_str(&banner(state.error.as_deref()));
        let _ = writeln!(out, "Email:    {}", state.form.email);
        let _ = writeln!(out, "Password: {}", masked(&state.form.password));
        out.push_str(if state.busy { "[ Logging in… ]\n" } else { "[ Login ]\n" });
        out.push_str("\nCreate a new account? Run `fintrack register`.\n");
        out
    }
}
