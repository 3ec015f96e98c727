use std::fmt;

use crate::error::AppError;
use crate::models::{Answer, compute_hash};
use crate::prompt::GroundingPrompt;
use crate::sanitize::ReasoningStripper;
use crate::traits::{ArtifactSink, Cleaner, Fetcher, InferenceClient};

/// Stages of a single run, in order. A run only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Fetching,
    Extracted,
    PromptBuilt,
    Inferring,
    Sanitized,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Fetching => write!(f, "fetch"),
            PipelineStage::Extracted => write!(f, "extract"),
            PipelineStage::PromptBuilt => write!(f, "prompt"),
            PipelineStage::Inferring => write!(f, "inference"),
            PipelineStage::Sanitized => write!(f, "sanitize"),
        }
    }
}

/// A failed run: the stage that failed plus the underlying error.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: AppError,
}

impl PipelineError {
    fn at(stage: PipelineStage) -> impl FnOnce(AppError) -> Self {
        move |source| Self { stage, source }
    }
}

/// Orchestrates one question about one page: fetch → extract → prompt → infer → sanitize.
///
/// Generic over all external dependencies via traits, so tests can run it
/// without real HTTP or LLM calls.
pub struct AskService<F, C, I, S>
where
    F: Fetcher,
    C: Cleaner,
    I: InferenceClient,
    S: ArtifactSink,
{
    fetcher: F,
    cleaner: C,
    inference: I,
    stripper: ReasoningStripper,
    artifact: Option<S>,
    model_name: String,
}

impl<F, C, I, S> AskService<F, C, I, S>
where
    F: Fetcher,
    C: Cleaner,
    I: InferenceClient,
    S: ArtifactSink,
{
    /// Create a new AskService that keeps no side artifact.
    pub fn new(
        fetcher: F,
        cleaner: C,
        inference: I,
        stripper: ReasoningStripper,
        model_name: String,
    ) -> Self {
        Self {
            fetcher,
            cleaner,
            inference,
            stripper,
            artifact: None,
            model_name,
        }
    }

    /// Create a new AskService that hands the extracted text to `artifact`.
    pub fn with_artifact(
        fetcher: F,
        cleaner: C,
        inference: I,
        stripper: ReasoningStripper,
        artifact: S,
        model_name: String,
    ) -> Self {
        Self {
            fetcher,
            cleaner,
            inference,
            stripper,
            artifact: Some(artifact),
            model_name,
        }
    }

    /// Run the full pipeline for a URL + question.
    ///
    /// 1. Fetch markup from the URL
    /// 2. Reduce it to plain text (and persist it, if an artifact sink is set)
    /// 3. Build the grounding prompt
    /// 4. Ask the model
    /// 5. Strip reasoning segments from the reply
    ///
    /// The first failure ends the run; no later stage is attempted.
    pub async fn ask(&self, url: &str, question: &str) -> Result<Answer, PipelineError> {
        use PipelineStage::*;

        require_non_empty("url", url).map_err(PipelineError::at(Fetching))?;
        require_non_empty("model", &self.model_name).map_err(PipelineError::at(Fetching))?;
        require_non_empty("question", question).map_err(PipelineError::at(Fetching))?;

        // 1. Fetch
        tracing::info!("Fetching {}", url);
        let html = self
            .fetcher
            .fetch(url)
            .await
            .map_err(PipelineError::at(Fetching))?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        // 2. Extract
        let text = self
            .cleaner
            .clean(&html)
            .map_err(PipelineError::at(Fetching))?;
        tracing::info!(
            "Extracted {} bytes of text ({}% reduction)",
            text.len(),
            reduction_percent(text.len(), html.len())
        );
        drop(html);
        if let Some(artifact) = &self.artifact {
            artifact.persist(&text).map_err(PipelineError::at(Fetching))?;
        }
        let content_hash = compute_hash(text.as_str());
        tracing::debug!(stage = %Extracted, content_hash = %&content_hash[..8]);

        // 3. Prompt
        let prompt = GroundingPrompt::build(&text, question);
        tracing::debug!(stage = %PromptBuilt, prompt_len = prompt.as_str().len());

        // 4. Infer
        tracing::info!("Asking model {} ...", self.model_name);
        let raw = self
            .inference
            .generate(&self.model_name, prompt.as_str())
            .await
            .map_err(PipelineError::at(Inferring))?;

        // 5. Sanitize
        let answer = self.stripper.sanitize(&raw);
        tracing::info!(
            stage = %Sanitized,
            raw_len = raw.len(),
            answer_len = answer.as_str().len(),
            "Answer ready"
        );

        Ok(Answer {
            answer,
            extracted_text: text,
            content_hash,
        })
    }
}

fn require_non_empty(name: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::InvalidInput(format!("{name} must not be empty")));
    }
    Ok(())
}

fn reduction_percent(after: usize, before: usize) -> usize {
    if before == 0 || after >= before {
        0
    } else {
        100 - (after * 100 / before)
    }
}
