//! Error types for the behaviour scoring engine
//!
//! Scoring itself is total over its inputs; these errors only surface at the
//! boundaries (JSON parsing, configuration, report encoding, coach replies).

use thiserror::Error;

/// Errors that can occur at the engine boundary
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown log field: {0}")]
    UnknownField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Coach error: {0}")]
    Coach(String),
}
