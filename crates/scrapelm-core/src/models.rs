use std::fmt;

use sha2::{Digest, Sha256};

/// Plain text reduced from a page: single-space separated tokens, no
/// leading or trailing whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Normalize arbitrary text: split on whitespace runs and rejoin with
    /// exactly one space.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Model answer with reasoning segments removed and ends trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanAnswer(pub(crate) String);

impl CleanAnswer {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a one-shot `POST /api/generate` call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InferenceRequest {
    pub model: String,
    pub prompt: String,
    /// Always `false`; answers are read whole.
    pub stream: bool,
}

impl InferenceRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// The part of an Ollama generate reply we care about.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct InferenceResponse {
    pub response: String,
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct Answer {
    pub answer: CleanAnswer,
    /// The text the answer was grounded on.
    pub extracted_text: ExtractedText,
    /// SHA-256 of `extracted_text`
    pub content_hash: String,
}

/// Compute a SHA-256 hash of a string, returned as 64-char hex.
pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
