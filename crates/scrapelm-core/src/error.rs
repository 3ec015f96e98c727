use thiserror::Error;

/// Application-wide error types for scrapelm.
#[derive(Error, Debug)]
pub enum AppError {
    /// Connecting to or reading from the target page failed, including timeouts.
    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// A remote answered with something other than 200 OK.
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The fetched body could not be turned into a markup tree.
    #[error("Markup parse error: {0}")]
    ParseFailure(String),

    /// The inference endpoint could not be reached or did not answer in time.
    #[error("Inference endpoint unreachable: {0}")]
    EndpointUnreachable(String),

    /// The inference endpoint answered 200 but the body was not the expected JSON.
    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),

    /// Caller-supplied input was rejected before any work started.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Environment or client configuration is unusable.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Writing the extracted-text side artifact failed.
    #[error("Artifact error: {0}")]
    ArtifactError(String),
}
