use reqwest::{Client, StatusCode};
use scrapelm_core::config::InferenceConfig;
use scrapelm_core::error::AppError;
use scrapelm_core::models::{InferenceRequest, InferenceResponse};
use scrapelm_core::traits::InferenceClient;

/// Client for Ollama's one-shot `POST /api/generate` endpoint.
///
/// The endpoint base comes from [`InferenceConfig`], resolved once by the
/// caller. Requests never stream; the whole reply is read before returning.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    generate_url: String,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            generate_url: config.generate_url(),
            timeout_secs: config.timeout.as_secs(),
        })
    }

    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }
}

impl InferenceClient for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let request = InferenceRequest::new(model, prompt);

        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::EndpointUnreachable(format!(
                        "No answer from {} within {}s",
                        self.generate_url, self.timeout_secs
                    ))
                } else {
                    AppError::EndpointUnreachable(format!("{}: {e}", self.generate_url))
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = %truncate(&body, 200),
                "Inference endpoint returned an error"
            );
            return Err(AppError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                AppError::EndpointUnreachable(format!(
                    "Timed out after {}s reading the answer",
                    self.timeout_secs
                ))
            } else {
                AppError::EndpointUnreachable(format!("Failed to read response body: {e}"))
            }
        })?;

        let parsed: InferenceResponse = serde_json::from_slice(&body)
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        Ok(parsed.response)
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
