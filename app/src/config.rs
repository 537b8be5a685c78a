//! Environment-driven settings for the terminal front-end.

use std::env;

use thiserror::Error;
use tracing::info;
use url::Url;

pub const API_URL_KEY: &str = "DRINK_API_URL";
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin the `/api/drink` collection hangs off.
    pub api_url: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_KEY).unwrap_or_else(|| {
            info!("{API_URL_KEY} not set, using default: {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });
        validate_url(&api_url)?;
        Ok(Self { api_url })
    }
}

fn validate_url(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: API_URL_KEY,
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}
