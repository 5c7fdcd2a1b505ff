//! Dashboard screen and session guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard is the only authenticated screen. Loading it doubles as the
//! liveness check for the stored token: a 401/403 from the current-user
//! endpoint clears the token and sends the user back to the landing screen.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::app::{Navigator, Route};
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::UserProfile;
use crate::state::session::SessionStore;

pub(crate) const LOAD_FAILED: &str = "Failed to load user data.";
pub(crate) const PROFILE_UNREADABLE: &str = "Could not load user data.";
pub(crate) const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// What the dashboard is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Loading,
    Authenticated(UserProfile),
    /// No usable session; the page has navigated to the landing screen.
    Unauthenticated,
    Error(String),
}

/// Static summary card shown until real financial data exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Widget {
    pub title: &'static str,
    pub value: &'static str,
    pub hint: &'static str,
}

pub const PLACEHOLDER_WIDGETS: [Widget; 3] = [
    Widget { title: "Total balance", value: "€0.00", hint: "Connect accounts to see your balance." },
    Widget { title: "This month's spending", value: "€0.00", hint: "Start adding expenses to track spending." },
    Widget { title: "Upcoming bills", value: "0", hint: "No upcoming bills yet." },
];

const NAV_ITEMS: [&str; 3] = ["Profile settings", "Billing (coming soon)", "Notifications (coming soon)"];

pub struct DashboardPage {
    api: AuthApi,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    view: Mutex<DashboardView>,
}

impl DashboardPage {
    #[must_use]
    pub fn new(api: AuthApi, session: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, session, navigator, view: Mutex::new(DashboardView::Loading) }
    }

    #[must_use]
    pub fn view(&self) -> DashboardView {
        lock(&self.view).clone()
    }

    /// Logout is only offered on an authenticated dashboard.
    #[must_use]
    pub fn can_logout(&self) -> bool {
        matches!(*lock(&self.view), DashboardView::Authenticated(_))
    }

    /// Check the session and fetch the current user. Returns the final view.
    pub async fn load(&self) -> DashboardView {
        self.set_view(DashboardView::Loading);

        let Some(token) = self.session.get() else {
            tracing::info!("no session token; redirecting to landing");
            return self.leave();
        };

        let view = match self.api.current_user(&token).await {
            Ok(user) => DashboardView::Authenticated(user),
            Err(e) if e.is_session_rejected() => {
                tracing::info!(status = ?e.status(), "session rejected; clearing token");
                self.clear_session();
                return self.leave();
            }
            Err(e) => {
                tracing::warn!(error = %e, "dashboard load failed");
                DashboardView::Error(load_error_message(&e).to_owned())
            }
        };
        self.set_view(view.clone());
        view
    }

    /// Clear the session and go to the landing screen, from any state.
    pub fn logout(&self) {
        self.clear_session();
        self.leave();
    }

    fn clear_session(&self) {
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "failed to clear session token");
        }
    }

    fn leave(&self) -> DashboardView {
        self.set_view(DashboardView::Unauthenticated);
        self.navigator.push(Route::Landing);
        DashboardView::Unauthenticated
    }

    fn set_view(&self, view: DashboardView) {
        *lock(&self.view) = view;
    }

    #[must_use]
    pub fn render(&self) -> String {
        match &*lock(&self.view) {
            DashboardView::Loading => "Loading your dashboard…\n".to_owned(),
            DashboardView::Unauthenticated => "Redirecting to login…\n".to_owned(),
            DashboardView::Error(message) => format!("[!] {message}\n"),
            DashboardView::Authenticated(user) => render_authenticated(user),
        }
    }
}

fn load_error_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::Rejected { .. } => LOAD_FAILED,
        ApiError::Schema(_) => PROFILE_UNREADABLE,
        ApiError::Http(_) | ApiError::Encode(_) => SOMETHING_WENT_WRONG,
    }
}

fn render_authenticated(user: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Hello, {}", user.first_name);
    out.push_str("Here's an overview of your budget.\n\n");

    out.push_str("ACCOUNT\n");
    let _ = writeln!(out, "  {}", user.full_name());
    let _ = writeln!(out, "  {}", user.email);
    out.push('\n');
    for item in NAV_ITEMS {
        let _ = writeln!(out, "  - {item}");
    }
    out.push_str("  [ Logout: run `fintrack logout` ]\n\n");

    for widget in &PLACEHOLDER_WIDGETS {
        let _ = writeln!(out, "{}", widget.title.to_uppercase());
        let _ = writeln!(out, "  {}", widget.value);
        let _ = writeln!(out, "  {}", widget.hint);
    }
    out
}
