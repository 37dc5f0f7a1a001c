//! Client configuration read from the environment once, when the API client
//! is built. Values are trimmed and blank values count as unset so a
//! half-written `.env` falls back to the defaults. Configuration values are
//! public; do not store secrets here.

use super::errors::AppError;
use std::{env, time::Duration};
use tracing::warn;
use url::Url;

/// Environment variable selecting the API base URL.
pub const API_BASE_URL_ENV: &str = "NORIA_API_BASE_URL";
/// Environment variable setting an optional request timeout in seconds.
pub const API_TIMEOUT_ENV: &str = "NORIA_API_TIMEOUT_SECS";
/// Local development API used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Client configuration derived from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// `None` leaves requests without a deadline.
    pub timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl AppConfig {
    /// Loads config from environment variables, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(value) = env_value(API_BASE_URL_ENV) {
            config.api_base_url = value;
        }
        config.timeout = env_value(API_TIMEOUT_ENV).and_then(|value| parse_timeout(&value));

        config
    }

    /// Builds a config for an explicit base URL, mostly for tests and embedding.
    #[must_use]
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Checks that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the URL cannot be parsed or uses another scheme.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(self.api_base_url.trim()).map_err(|err| {
            AppError::Config(format!("Invalid API base URL {}: {err}", self.api_base_url))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::Config(format!(
                "Unsupported API base URL scheme: {scheme}"
            ))),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| normalize_value(&value))
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_timeout(value: &str) -> Option<Duration> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!("Ignoring {API_TIMEOUT_ENV}={value}: expected a positive number of seconds");
            None
        }
    }
}
