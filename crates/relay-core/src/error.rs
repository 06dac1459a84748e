//! Error types shared across the pipeline
use thiserror::Error;

/// Missing required configuration, detected at a construction boundary.
///
/// This is the only error class that is fatal to a whole invocation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("webhook URL is not configured")]
    MissingWebhook,
}

/// A decoded payload had the wrong shape for notification extraction.
///
/// Distinct from a decode failure: text that is not JSON at all is
/// recovered as an opaque payload, while JSON of the wrong shape is a
/// record-level failure.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("payload is not a JSON object (got {0})")]
    NotAnObject(String),
}
