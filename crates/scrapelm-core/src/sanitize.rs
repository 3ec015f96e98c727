//! Removal of reasoning segments from raw model output.
//!
//! Some local models (deepseek-r1, qwen3, ...) wrap their deliberation in a
//! pair of markers such as `<think>...</think>` before the actual answer.
//! [`ReasoningStripper`] drops every such span and trims the result. Only the
//! ends are trimmed; whitespace inside the answer is left as the model wrote it.

use regex::Regex;

use crate::error::AppError;
use crate::models::CleanAnswer;

pub const DEFAULT_OPEN_MARKER: &str = "<think>";
pub const DEFAULT_CLOSE_MARKER: &str = "</think>";

/// Strips `open ... close` spans (non-greedy, across newlines) together with
/// any whitespace right after the closing marker.
#[derive(Debug, Clone)]
pub struct ReasoningStripper {
    pattern: Regex,
}

impl ReasoningStripper {
    pub fn new(open: &str, close: &str) -> Result<Self, AppError> {
        if open.is_empty() || close.is_empty() {
            return Err(AppError::ConfigError(
                "reasoning markers must not be empty".into(),
            ));
        }
        let pattern = Regex::new(&format!(
            r"(?s){}.*?{}\s*",
            regex::escape(open),
            regex::escape(close)
        ))
        .map_err(|e| AppError::ConfigError(format!("Invalid reasoning markers: {e}")))?;

        Ok(Self { pattern })
    }

    /// Stripper for `<think>` / `</think>`.
    pub fn think_tags() -> Result<Self, AppError> {
        Self::new(DEFAULT_OPEN_MARKER, DEFAULT_CLOSE_MARKER)
    }

    pub fn sanitize(&self, raw: &str) -> CleanAnswer {
        let stripped = self.pattern.replace_all(raw, "");
        CleanAnswer(stripped.trim().to_string())
    }
}
