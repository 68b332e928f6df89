//! Error types for Buildr
//!
//! Centralized error handling using thiserror. Only request-validation and
//! configuration errors ever escape a build run; per-iteration model-call
//! failures are absorbed into the run result.

use thiserror::Error;

/// All error types that can occur in Buildr
#[derive(Debug, Error)]
pub enum BuildrError {
    /// A required request field is missing or empty
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream credential is not configured
    #[error("Missing API key: environment variable {0} not set")]
    MissingApiKey(String),

    /// Non-success response from the model API
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure talking to the model API
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Model output contained no balanced JSON object
    #[error("No JSON object found in model output")]
    JsonNotFound,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model output had an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid wizard state transition
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Buildr operations
pub type Result<T> = std::result::Result<T, BuildrError>;
