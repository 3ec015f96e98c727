use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(16);
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(64);

/// Settings for the page fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl FetchConfig {
    /// Read configuration from environment variables.
    ///
    /// - `SCRAPELM_FETCH_TIMEOUT_SECS` (optional, defaults to 16)
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            timeout: timeout_from_env("SCRAPELM_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT)?,
        })
    }
}

/// Where and how to reach the inference endpoint.
///
/// Resolved once per run and handed to the client; nothing else reads the
/// environment for it.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_HOST.to_string(),
            timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }
}

impl InferenceConfig {
    /// Read configuration from environment variables.
    ///
    /// - `OLLAMA_HOST` (optional, defaults to `http://localhost:11434`)
    /// - `SCRAPELM_INFERENCE_TIMEOUT_SECS` (optional, defaults to 64)
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = std::env::var("OLLAMA_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string());

        Ok(Self {
            base_url,
            timeout: timeout_from_env(
                "SCRAPELM_INFERENCE_TIMEOUT_SECS",
                DEFAULT_INFERENCE_TIMEOUT,
            )?,
        })
    }

    /// Full URL of the generate endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

fn timeout_from_env(key: &str, default: Duration) -> Result<Duration, AppError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => parse_timeout_secs(key, &raw),
    }
}

fn parse_timeout_secs(key: &str, raw: &str) -> Result<Duration, AppError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        AppError::ConfigError(format!(
            "Invalid {key} '{raw}': must be a positive integer"
        ))
    })?;
    if secs == 0 {
        return Err(AppError::ConfigError(format!("{key} must be at least 1")));
    }
    Ok(Duration::from_secs(secs))
}
