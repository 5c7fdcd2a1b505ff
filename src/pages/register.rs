//! Registration screen: local validation, register, then automatic login.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::fmt::Write as _;
use std::sync::{Arc, LazyLock, Mutex};

use regex::Regex;

use super::{SESSION_SAVE_FAILED, SubmitOutcome, banner, lock, masked};
use crate::app::{Navigator, Route};
use crate::net::api::AuthApi;
use crate::net::types::RegistrationProfile;
use crate::state::session::SessionStore;

pub(crate) const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub(crate) const AUTO_LOGIN_FAILED: &str = "Registered, but automatic login failed. Please log in manually.";

pub(crate) const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub(crate) const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub(crate) const EMAIL_REQUIRED: &str = "Email is required.";
pub(crate) const EMAIL_INVALID: &str = "Enter a valid email address.";
pub(crate) const PASSWORD_REQUIRED: &str = "Password is required.";
pub(crate) const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";

pub const MIN_PASSWORD_CHARS: usize = 6;

// Unanchored: any `x@y.z` run inside the input matches.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    FirstName,
    LastName,
    Email,
    Password,
}

/// Per-field validation messages. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none() && self.password.is_none()
    }

    #[must_use]
    pub fn get(&self, field: RegisterField) -> Option<&'static str> {
        match field {
            RegisterField::FirstName => self.first_name,
            RegisterField::LastName => self.last_name,
            RegisterField::Email => self.email,
            RegisterField::Password => self.password,
        }
    }

    fn clear(&mut self, field: RegisterField) {
        match field {
            RegisterField::FirstName => self.first_name = None,
            RegisterField::LastName => self.last_name = None,
            RegisterField::Email => self.email = None,
            RegisterField::Password => self.password = None,
        }
    }
}

/// Check every field and collect all failures.
#[must_use]
pub fn validate(profile: &RegistrationProfile) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if profile.first_name.trim().is_empty() {
        errors.first_name = Some(FIRST_NAME_REQUIRED);
    }
    if profile.last_name.trim().is_empty() {
        errors.last_name = Some(LAST_NAME_REQUIRED);
    }

    if profile.email.trim().is_empty() {
        errors.email = Some(EMAIL_REQUIRED);
    } else if !EMAIL_SHAPE.is_match(&profile.email) {
        errors.email = Some(EMAIL_INVALID);
    }

    if profile.password.is_empty() {
        errors.password = Some(PASSWORD_REQUIRED);
    } else if profile.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.password = Some(PASSWORD_TOO_SHORT);
    }

    errors
}

// =============================================================================
// PAGE
// =============================================================================

#[derive(Debug, Default)]
struct RegisterState {
    form: RegistrationProfile,
    errors: FieldErrors,
    general_error: Option<String>,
    busy: bool,
}

pub struct RegisterPage {
    api: AuthApi,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<RegisterState>,
}

impl RegisterPage {
    #[must_use]
    pub fn new(api: AuthApi, session: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, session, navigator, state: Mutex::new(RegisterState::default()) }
    }

    /// Update one field, clearing its message and the banner.
    pub fn set_field(&self, field: RegisterField, value: impl Into<String>) {
        let mut state = lock(&self.state);
        let value = value.into();
        match field {
            RegisterField::FirstName => state.form.first_name = value,
            RegisterField::LastName => state.form.last_name = value,
            RegisterField::Email => state.form.email = value,
            RegisterField::Password => state.form.password = value,
        }
        state.errors.clear(field);
        state.general_error = None;
    }

    /// Set every field at once.
    pub fn fill(&self, profile: RegistrationProfile) {
        self.set_field(RegisterField::FirstName, profile.first_name);
        self.set_field(RegisterField::LastName, profile.last_name);
        self.set_field(RegisterField::Email, profile.email);
        self.set_field(RegisterField::Password, profile.password);
    }

    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        lock(&self.state).errors.clone()
    }

    #[must_use]
    pub fn general_error(&self) -> Option<String> {
        lock(&self.state).general_error.clone()
    }

    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        lock(&self.state).busy
    }

    /// Validate, register, then log in with the same credentials.
    pub async fn submit(&self) -> SubmitOutcome {
        let profile = {
            let mut state = lock(&self.state);
            if state.busy {
                return SubmitOutcome::Ignored;
            }
            state.errors = validate(&state.form);
            if !state.errors.is_empty() {
                tracing::debug!(errors = ?state.errors, "registration form invalid");
                return SubmitOutcome::Invalid;
            }
            state.busy = true;
            state.general_error = None;
            state.form.clone()
        };

        let result = self.register_and_login(&profile).await;

        let mut state = lock(&self.state);
        state.busy = false;
        match result {
            Ok(()) => {
                drop(state);
                self.navigator.push(Route::Dashboard);
                SubmitOutcome::Navigated(Route::Dashboard)
            }
            Err(message) => {
                state.general_error = Some(message);
                SubmitOutcome::Failed
            }
        }
    }

    async fn register_and_login(&self, profile: &RegistrationProfile) -> Result<(), String> {
        self.api.register(profile).await.map_err(|e| {
            tracing::info!(error = %e, "registration failed");
            e.display_message(REGISTER_FAILED)
        })?;

        let response = self.api.login(&profile.credentials()).await.map_err(|e| {
            tracing::warn!(error = %e, server_message = ?e.server_message(), "automatic login after registration failed");
            AUTO_LOGIN_FAILED.to_owned()
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
        out.push_str("Create your account\n");
        out.push_str("Start tracking your money in just a few steps.\n\n");
        out.push_str(&banner(state.general_error.as_deref()));

        let password = masked(&state.form.password);
        let rows = [
            ("First name:", state.form.first_name.as_str(), state.errors.first_name),
            ("Last name:", state.form.last_name.as_str(), state.errors.last_name),
            ("Email:", state.form.email.as_str(), state.errors.email),
            ("Password:", password.as_str(), state.errors.password),
        ];
        for (label, value, error) in rows {
            let _ = writeln!(out, "{label:<12}{value}");
            if let Some(error) = error {
                let _ = writeln!(out, "            ! {error}");
            }
        }

        out.push_str(if state.busy { "[ Creating account… ]\n" } else { "[ Sign up ]\n" });
        out.push_str("\nAlready have an account? Run `fintrack login`.\n");
        out
    }
}
