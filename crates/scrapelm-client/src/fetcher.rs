use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use scrapelm_core::config::FetchConfig;
use scrapelm_core::error::AppError;
use scrapelm_core::traits::Fetcher;

/// HTTP fetcher using reqwest.
///
/// Issues a single GET with a fixed timeout and reqwest's default redirect
/// policy. No retries.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::from_config(&FetchConfig::default())
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self, AppError> {
        Self::with_timeout(config.timeout)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!("scrapelm/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::NetworkFailure(format!(
                    "Timed out after {}s fetching {url}",
                    self.timeout_secs
                ))
            } else if e.is_connect() {
                AppError::NetworkFailure(format!("Connection failed: {e}"))
            } else {
                AppError::NetworkFailure(e.to_string())
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "Non-200 response for {}", url);
            return Err(AppError::HttpStatus(status.as_u16()));
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_markup_type(content_type) {
                return Err(AppError::ParseFailure(format!(
                    "Content-Type '{content_type}' is not markup"
                )));
            }
        }

        response
            .text()
            .await
            .map_err(|e| AppError::NetworkFailure(format!("Failed to read response body: {e}")))
    }
}

/// Whether a Content-Type header value may carry something the markup parser can read.
///
/// Any `text/*` or `*+xml` type qualifies, as does `application/octet-stream`,
/// which misconfigured servers send for ordinary HTML.
fn is_markup_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    media_type.is_empty()
        || media_type.starts_with("text/")
        || media_type.ends_with("+xml")
        || media_type == "application/xml"
        || media_type == "application/octet-stream"
}
