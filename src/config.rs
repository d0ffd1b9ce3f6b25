use secrecy::SecretString;
use std::env;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: SecretString,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from the environment, reading a `.env` file first
    /// if one is present. Every value has a development default except the
    /// bearer token, which defaults to empty and must be checked with
    /// [`Config::validate`] before real API calls.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("PREPWISE_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            api_token: SecretString::from(
                env::var("PREPWISE_API_TOKEN").unwrap_or_default(),
            ),
            connect_timeout_secs: env::var("PREPWISE_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            request_timeout_secs: env::var("PREPWISE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Checks that the configuration can actually reach the API.
    pub fn validate(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        if self.api_base_url.trim().is_empty() {
            return Err(AppError::ValidationError(
                "PREPWISE_API_BASE_URL must not be empty".to_string(),
            ));
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(AppError::ValidationError(format!(
                "PREPWISE_API_BASE_URL must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }

        if self.api_token.expose_secret().is_empty() {
            return Err(AppError::Unauthorized(
                "PREPWISE_API_TOKEN is not set".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL with any trailing slash removed, so paths can be joined
    /// with a plain `format!`.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            api_token: SecretString::from("test_bearer_token".to_string()),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}
