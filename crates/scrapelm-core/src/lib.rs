pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod sanitize;
pub mod traits;


pub use config::{FetchConfig, InferenceConfig};
pub use error::AppError;
pub use models::{Answer, CleanAnswer, ExtractedText, compute_hash};
pub use pipeline::{AskService, PipelineError, PipelineStage};
pub use prompt::GroundingPrompt;
pub use sanitize::ReasoningStripper;
pub use traits::{ArtifactSink, Cleaner, FileSink, Fetcher, InferenceClient, NullSink};
