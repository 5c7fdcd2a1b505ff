//! Routes, navigation, and the driver that runs one user action end to end.
//!
//! SYSTEM CONTEXT
//! ==============
//! Screens only ever talk to each other through navigation. A page pushes a
//! [`Route`] onto the injected [`Navigator`]; [`App`] then follows the latest
//! route the way a browser would and renders whatever screen it lands on.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::net::api::AuthApi;
use crate::net::types::{Credentials, RegistrationProfile};
use crate::pages::SubmitOutcome;
use crate::pages::dashboard::{DashboardPage, DashboardView};
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::state::session::SessionStore;

// =============================================================================
// ROUTING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Register,
    Dashboard,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Client-side navigation.
pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

/// Navigator that records every pushed route.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<Route>>,
}

impl History {
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).last().copied()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Route> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for History {
    fn push(&self, route: Route) {
        tracing::debug!(path = route.path(), "navigate");
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(route);
    }
}

// =============================================================================
// DRIVER
// =============================================================================

/// One user action issued from the command line.
#[derive(Debug, Clone)]
pub enum Action {
    Login(Credentials),
    Register(RegistrationProfile),
    Dashboard,
    Logout,
}

/// The screen the action ended on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub route: Route,
    pub output: String,
    /// `false` when the screen is showing an error or a rejected session.
    pub ok: bool,
}

pub struct App {
    api: AuthApi,
    session: Arc<dyn SessionStore>,
    history: Arc<History>,
}

impl App {
    #[must_use]
    pub fn new(api: AuthApi, session: Arc<dyn SessionStore>) -> Self {
        Self { api, session, history: Arc::new(History::default()) }
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub async fn run(&self, action: Action) -> Screen {
        match action {
            Action::Login(credentials) => {
                let page = self.login_page();
                page.set_email(credentials.email);
                page.set_password(credentials.password);
                match page.submit().await {
                    SubmitOutcome::Navigated(_) => self.follow().await,
                    _ => Screen { route: Route::Landing, output: page.render(), ok: false },
                }
            }
            Action::Register(profile) => {
                let page = self.register_page();
                page.fill(profile);
                match page.submit().await {
                    SubmitOutcome::Navigated(_) => self.follow().await,
                    _ => Screen { route: Route::Register, output: page.render(), ok: false },
                }
            }
            Action::Dashboard => self.show_dashboard().await,
            Action::Logout => {
                self.dashboard_page().logout();
                self.follow().await
            }
        }
    }

    /// Render whichever screen the last navigation pointed at.
    async fn follow(&self) -> Screen {
        match self.history.current() {
            Some(Route::Dashboard) => self.show_dashboard().await,
            Some(Route::Register) => Screen { route: Route::Register, output: self.register_page().render(), ok: true },
            Some(Route::Landing) | None => {
                Screen { route: Route::Landing, output: self.login_page().render(), ok: true }
            }
        }
    }

    async fn show_dashboard(&self) -> Screen {
        let page = self.dashboard_page();
        match page.load().await {
            DashboardView::Authenticated(_) => Screen { route: Route::Dashboard, output: page.render(), ok: true },
            DashboardView::Unauthenticated => {
                Screen { route: Route::Landing, output: self.login_page().render(), ok: false }
            }
            DashboardView::Loading | DashboardView::Error(_) => {
                Screen { route: Route::Dashboard, output: page.render(), ok: false }
            }
        }
    }

    fn login_page(&self) -> LoginPage {
        LoginPage::new(self.api.clone(), self.session.clone(), self.history.clone())
    }

    fn register_page(&self) -> RegisterPage {
        RegisterPage::new(self.api.clone(), self.session.clone(), self.history.clone())
    }

    fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(self.api.clone(), self.session.clone(), self.history.clone())
    }
}
