use std::{env, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GENERATION_TIMEOUT: u64 = 120;
const DEFAULT_SOURCE_FETCH_TIMEOUT: u64 = 60;
const DEFAULT_MAX_REQUEST_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub search_grounding: bool,
    pub generation_timeout_secs: u64,
    pub source_fetch_timeout_secs: u64,
    pub max_request_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gemini_api_key: SecretString::from(env::var("GEMINI_API_KEY").unwrap_or_default()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            search_grounding: env::var("GENERATION_SEARCH_GROUNDING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_GENERATION_TIMEOUT),
            source_fetch_timeout_secs: env::var("SOURCE_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SOURCE_FETCH_TIMEOUT),
            max_request_bytes: env::var("MAX_REQUEST_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_REQUEST_BYTES),
        }
    }

    /// Checks the settings the server cannot run without.
    pub fn validate(&self) -> AppResult<()> {
        if self.gemini_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }

        if self.generation_timeout_secs == 0 || self.source_fetch_timeout_secs == 0 {
            return Err(AppError::ValidationError(
                "timeouts must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn source_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.source_fetch_timeout_secs)
    }

    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3001,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            gemini_api_key: SecretString::from("test-api-key".to_string()),
            gemini_model: "gemini-test".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            search_grounding: true,
            generation_timeout_secs: 5,
            source_fetch_timeout_secs: 5,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}
