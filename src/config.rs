//! Client configuration.
//!
//! Values arrive from clap (flags with environment fallbacks) and are checked
//! here so the library never sees an unusable base address.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const SESSION_DIR_NAME: &str = ".fintrack";
pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("cannot locate a session file: HOME is not set; pass --session-file")]
    MissingHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect_secs: u64,
    /// Overall request deadline. `None` waits for the server indefinitely.
    pub request_secs: Option<u64>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS, request_secs: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base address without a trailing slash.
    pub base_url: String,
    pub session_file: PathBuf,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a validated config. A missing `session_file` resolves to
    /// `$HOME/.fintrack/session.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for anything that is not an
    /// `http://` or `https://` address, and [`ConfigError::MissingHome`] when
    /// no session file is given and `HOME` is unset.
    pub fn new(base_url: &str, session_file: Option<PathBuf>, timeouts: Timeouts) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        let session_file = match session_file {
            Some(path) => path,
            None => default_session_file(std::env::var("HOME").ok().as_deref())?,
        };
        Ok(Self { base_url, session_file, timeouts })
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn default_session_file(home: Option<&str>) -> Result<PathBuf, ConfigError> {
    let home = home.filter(|h| !h.trim().is_empty()).ok_or(ConfigError::MissingHome)?;
    Ok(PathBuf::from(home).join(SESSION_DIR_NAME).join(SESSION_FILE_NAME))
}
