use std::future::Future;

use crate::error::AppError;
use crate::models::ExtractedText;

/// Fetches raw markup from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Parses raw markup and reduces it to normalized plain text.
pub trait Cleaner: Send + Sync + Clone {
    fn clean(&self, html: &str) -> Result<ExtractedText, AppError>;
}

/// Sends a prompt to an LLM inference endpoint and returns its raw text.
pub trait InferenceClient: Send + Sync + Clone {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Receives the extracted text of a page as a debugging artifact.
///
/// Nothing written here is read back by the pipeline.
pub trait ArtifactSink: Send + Sync {
    fn persist(&self, text: &ExtractedText) -> Result<(), AppError>;
}

/// An ArtifactSink that discards everything.
#[derive(Debug, Clone)]
pub struct NullSink;

impl ArtifactSink for NullSink {
    fn persist(&self, _text: &ExtractedText) -> Result<(), AppError> {
        Ok(())
    }
}

/// Writes the extracted text to a file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: std::path::PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArtifactSink for FileSink {
    fn persist(&self, text: &ExtractedText) -> Result<(), AppError> {
        std::fs::write(&self.path, text.as_str()).map_err(|e| {
            AppError::ArtifactError(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        tracing::info!("Scraped and cleaned text saved to {}", self.path.display());
        Ok(())
    }
}
