//! Gateway configuration with sensible defaults.
//!
//! [`GatewayConfig`] carries the generation parameters for the outbound model
//! call. The API credential is read separately with [`api_key_from_env`] so
//! that a missing key is reported before anything else starts.

use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the OpenRouter API key.
pub const API_KEY_ENV: &str = "OPENROUTER_KEY";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Startup configuration failure. Fatal: the process exits with a diagnostic.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set. Please set it before running the application.")]
    MissingApiKey(&'static str),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Generation parameters for the model gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,
    /// Sampling temperature. Default: `0.7`.
    pub temperature: f32,
    /// Maximum tokens in the response. Default: `2048`.
    pub max_tokens: u32,
    /// Upper bound on a single model call. Default: 60 seconds.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            timeout: Duration::from_secs(60),
        }
    }
}

impl GatewayConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Read the API key from [`API_KEY_ENV`]. Blank values count as missing.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    api_key_from(std::env::var(API_KEY_ENV).ok())
}

fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))
}
