//! # fintrack
//!
//! Terminal client for the Fintrack personal finance tracker.
//!
//! The crate holds the login, registration and dashboard screens as headless
//! page controllers, the REST calls they make against the authentication API,
//! and the persistent session slot that carries the bearer token between runs.
//! The `fintrack` binary drives these screens from the command line.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;
