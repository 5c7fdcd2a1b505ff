//! Page controllers for the three screens.
//!
//! DESIGN
//! ======
//! Each page owns its form state behind a mutex so a second submit issued
//! while the first is in flight can observe the busy flag and back off.
//! Pages render to plain text for the terminal.

pub mod dashboard;
pub mod login;
pub mod register;

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::app::Route;

/// Result of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The page navigated away.
    Navigated(Route),
    /// Local validation failed; nothing was sent.
    Invalid,
    /// A remote call failed; the banner holds the message.
    Failed,
    /// A submission was already in flight.
    Ignored,
}

pub(crate) const SESSION_SAVE_FAILED: &str = "Signed in, but the session could not be saved.";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn masked(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}

fn banner(message: Option<&str>) -> String {
    message.map(|m| format!("[!] {m}\n")).unwrap_or_default()
}
