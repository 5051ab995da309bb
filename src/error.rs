//! Error types for the matching service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

/// Service-level failures. The scoring core itself never fails.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Request body is missing a required field
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requirement document normalized to an empty tree
    #[error("No valid user requirements found")]
    NoRequirements,

    /// Backend answered with a non-success status
    #[error("Upstream {endpoint} returned {status}: {body}")]
    Upstream {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Per-variant normalization failure; only that variant is skipped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("variant is not a JSON object")]
    NotAnObject,

    #[error("variant '{variant}' has no menu items")]
    EmptyMenu { variant: String },
}
